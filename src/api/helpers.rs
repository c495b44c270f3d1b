//! Shared helpers for WASM API operations
//!
//! Logging macros and serde-wasm-bindgen conversions that report failures
//! as `ViewerError`s.

use crate::error::ViewerError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ============================================================================
// Logging Macros
// ============================================================================
//
// Routed through the `log` facade under the `viewer` target. With the
// `console_log` feature the facade writes to the browser console.

/// Debug-level viewer message
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        ::log::debug!(target: "viewer", $($arg)*)
    };
}

#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        ::log::info!(target: "viewer", $($arg)*)
    };
}

#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        ::log::warn!(target: "viewer", $($arg)*)
    };
}

/// Error-level viewer message, used for failures crossing the JS boundary
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        ::log::error!(target: "viewer", $($arg)*)
    };
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript, logging failures
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, ViewerError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        crate::wasm_error!("{}", msg);
        ViewerError::Deserialize(msg)
    })
}

/// Deserialize an optional value; `undefined` and `null` give the default
pub fn deserialize_or_default<T: DeserializeOwned + Default>(
    value: JsValue,
    error_context: &str,
) -> Result<T, ViewerError> {
    if value.is_undefined() || value.is_null() {
        Ok(T::default())
    } else {
        deserialize(value, error_context)
    }
}

/// Serialize a value to JavaScript, logging failures
///
/// Maps become plain objects so span maps read naturally on the JS side.
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, ViewerError> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        crate::wasm_error!("{}", msg);
        ViewerError::Serialize(msg)
    })
}
