//! Display List for rendering
//!
//! The output handed to JavaScript. It carries every position needed to draw
//! annotations, labels, links and line toggles without further layout work.

use super::height::LineHeight;
use crate::models::{AnnotationWithPosition, LinkWithPosition, Span, TextNodeDimension};
use serde::{Deserialize, Serialize};

/// Top-level display list
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayList {
    /// Text to render, including label padding
    pub spaced_text: String,

    /// Spaced-text ranges of collapsed lines
    pub collapsed_ranges: Vec<Span>,

    pub text_node: TextNodeDimension,

    /// Annotations of selected legends, with measured positions
    pub annotations: Vec<AnnotationWithPosition>,

    pub links: Vec<RenderLink>,

    /// Reserved link space per visual line, in reading order
    pub lines: Vec<LineHeight>,

    /// Collapse buttons, one per line that carries links
    pub line_toggles: Vec<LineToggle>,

    pub total_link_height: f32,

    /// Rubber-band connector while a link is being created
    pub link_edit_connector: Option<LinkEditConnector>,
}

/// A positioned link with its lane data
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderLink {
    pub position: LinkWithPosition,
    pub shape: LinkShape,

    /// Vertical shift of the from/to lines
    pub from_offset: f32,
    pub to_offset: f32,
}

/// How a link is drawn relative to its baselines
///
/// `lift` is the height of the link above its baseline; zero on collapsed
/// lines.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum LinkShape {
    SingleLine {
        lane: usize,
        collapsed: bool,
        lift: f32,
    },
    MultiLine {
        from_lane: usize,
        to_lane: usize,
        from_lift: f32,
        to_lift: f32,
        from_segment: (f32, f32),
        to_segment: (f32, f32),
    },
}

/// Collapse/expand affordance for one line
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineToggle {
    pub line_index: usize,
    pub top: f32,
    pub collapsed: bool,
}

/// Connector from the source annotation to the pointer, relative to the
/// text area
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinkEditConnector {
    pub from_x: f32,
    pub from_y: f32,
    pub to_x: f32,
    pub to_y: f32,
}
