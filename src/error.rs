use thiserror::Error;

/// Why a page feature did not start. Each feature fails on its own; the
/// rest of the page keeps working.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no element matches `{0}`")]
    MissingElement(&'static str),
    #[error("disabled by reduced-motion preference")]
    ReducedMotion,
    #[error("browser call failed: {0}")]
    Js(String),
}

impl SetupError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingElement(_) => "missing_element",
            Self::ReducedMotion => "reduced_motion",
            Self::Js(_) => "js",
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SetupError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
