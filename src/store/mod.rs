//! Viewer state store
//!
//! ## Modules
//!
//! - `commands`: Typed messages accepted from the surrounding controller
//! - `state`: The store and its reducer
//! - `session`: One loaded document with its store, engine and event streams

pub mod commands;
pub mod session;
pub mod state;

pub use commands::ViewerCommand;
pub use session::{SpacedView, ViewerSession};
pub use state::{LinkEditState, ViewerSnapshot, ViewerState};
