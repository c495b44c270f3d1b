//! Layout Engine
//!
//! Turns a text pack plus a viewer snapshot into renderable geometry:
//! spaced text, annotation rects, link lanes and reserved line heights.
//!
//! Pipeline: spacing (`text::spacer`) -> measurement (`geometry`) ->
//! `merge` -> `lanes` -> `height` -> `display_list`.

pub mod collapse;
pub mod config;
pub mod display_list;
pub mod engine;
pub mod geometry;
pub mod height;
pub mod lanes;
pub mod merge;

pub use collapse::{CollapsedLines, LineState};
pub use config::LayoutConfig;
pub use display_list::{DisplayList, LineToggle, LinkEditConnector, LinkShape, RenderLink};
pub use engine::{LayoutEngine, MeasureRequest};
pub use geometry::{GeometryResolver, MeasuredGeometry, MeasuredSpan, MonospaceMetrics, MonospaceResolver};
pub use height::{calculate_link_height, LineHeight, LinkHeights};
pub use lanes::{calculate_lines_levels, LinesLevels, LinkLanes};
pub use merge::{merge_annotation_with_position, merge_link_with_position, PositionIndex};
