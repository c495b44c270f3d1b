//! Text Viewer WASM API
//!
//! # Module Structure
//!
//! - `helpers`: Console logging macros and serde-wasm-bindgen conversions
//! - `dom`: DOM `Range` geometry measurement
//! - `viewer`: Exported functions over the loaded viewer session

pub mod dom;
pub mod helpers;
pub mod viewer;

pub use viewer::*;
