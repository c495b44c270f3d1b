//! Error types for the JavaScript boundary
//!
//! The layout core itself cannot fail: malformed input degrades to elements
//! that are not drawn. Errors only arise when talking to JavaScript.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, Error)]
pub enum ViewerError {
    /// No text pack has been loaded yet
    #[error("No text pack loaded")]
    NoDocument,

    #[error("Viewer state lock poisoned")]
    LockPoisoned,

    #[error("Deserialization error: {0}")]
    Deserialize(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    /// DOM handles needed for measurement are missing
    #[error("DOM measurement unavailable: {0}")]
    Dom(String),
}

impl From<ViewerError> for JsValue {
    fn from(error: ViewerError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(ViewerError::NoDocument.to_string(), "No text pack loaded");
        assert_eq!(
            ViewerError::Deserialize("missing field `text`".to_string()).to_string(),
            "Deserialization error: missing field `text`"
        );
    }
}
