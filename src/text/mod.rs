//! Text reflow for annotation labels
//!
//! ## Modules
//!
//! - `lines`: Hard-line segmentation of the original text
//! - `spacer`: Inserts padding so annotation labels have room to render

pub mod lines;
pub mod spacer;

// Re-exports for convenience
pub use lines::HardLines;
pub use spacer::{space_out_text, Insertion, SpacedAnnotationSpan, SpacedText, SpacingOptions};
