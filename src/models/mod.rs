//! Data models for the text viewer
//!
//! Domain entities loaded with a document, plus the geometry values the
//! layout pipeline derives from them.

pub mod core;
pub mod geometry;

// Re-export commonly used types
pub use self::core::*;
pub use self::geometry::*;
