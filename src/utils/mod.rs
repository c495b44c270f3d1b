//! Utility modules for the text viewer

pub mod throttle;

// Re-export commonly used types
pub use throttle::*;
