#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("storefront-effects runs in the browser. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    storefront_effects::frontend::run();
}
