use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures from the host environment. The simulation itself has none; these
/// come from looking up the page and creating markers in it.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("no global `window` exists")]
    NoWindow,
    #[error("window has no `document`")]
    NoDocument,
    #[error("no element with id `{0}`")]
    MissingElement(String),
    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for FieldError {
    fn from(value: JsValue) -> Self {
        let message = value.as_string().unwrap_or_else(|| format!("{:?}", value));
        FieldError::Dom(message)
    }
}

impl From<FieldError> for JsValue {
    fn from(error: FieldError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}
