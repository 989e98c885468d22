use thiserror::Error;

/// Startup failures. Anything past startup is logged where it happens.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("no global window")]
    MissingWindow,
    #[error("window has no document")]
    MissingDocument,
    #[error("javascript exception: {0}")]
    Js(String),
}

/// Why the primary clipboard path did not copy.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CopyError {
    #[error("clipboard api unavailable")]
    Unavailable,
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for InitError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(crate::frontend::dom::describe_js_value(&value))
    }
}
