//! Page behavior for the shop landing page: menu, scroll effects, count-ups,
//! sparkles, form validation and the review slider.
//!
//! Everything outside [`frontend`] is plain state and arithmetic so it builds
//! and tests on the host. `frontend` binds it to the DOM through `web-sys`
//! and only exists on `wasm32`.

pub mod accordion;
pub mod config;
pub mod count_up;
pub mod environment;
pub mod error;
pub mod form;
pub mod logging;
pub mod menu;
pub mod pointer;
pub mod scheduler;
pub mod scroll;
pub mod slider;
pub mod sparkle;
pub mod styles;
pub mod timing;
pub mod typewriter;
pub mod visibility;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
