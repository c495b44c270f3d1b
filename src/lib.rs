//! Text Viewer WASM Module
//!
//! Layout engine for a text viewer that overlays span annotations and the
//! links between them. Given a document, a legend selection and a set of
//! collapsed lines, it produces spaced text with room for annotation labels,
//! annotation rects, link lanes and the vertical space each line reserves.

pub mod api;
pub mod error;
pub mod layout;
pub mod models;
pub mod store;
pub mod text;
pub mod utils;

// Re-export commonly used types
pub use error::ViewerError;
pub use layout::{DisplayList, GeometryResolver, LayoutConfig, LayoutEngine};
pub use models::core::*;
pub use models::geometry::*;
pub use store::{ViewerCommand, ViewerSession, ViewerSnapshot, ViewerState};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        if console_log::init_with_level(log::Level::Debug).is_err() {
            wasm_warn!("logger already initialized");
        }
    }

    log::info!("Text viewer WASM module initialized");
}
