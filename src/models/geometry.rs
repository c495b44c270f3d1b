//! Geometry values derived by the layout pipeline
//!
//! These are recreated on every layout pass and never mutated in place.

use super::core::{Annotation, Link};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Rectangle relative to the rendering surface's top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// A point in client coordinates, e.g. the pointer position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Y coordinate of a horizontal text line, usable as an ordered map key
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Baseline(pub f32);

impl PartialEq for Baseline {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Baseline {}

impl PartialOrd for Baseline {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Baseline {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Size and placement of the rendered text block
///
/// `x`/`y` are relative to the text area; `client_x`/`client_y` are the text
/// area's own origin in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNodeDimension {
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
    pub client_x: f32,
    pub client_y: f32,
}

/// On-screen geometry of one annotation, one rect per visual line crossed
///
/// An empty `rects` list means the position is unknown (not rendered yet,
/// or off-screen).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnotationPosition {
    pub rects: Vec<Rect>,
}

impl AnnotationPosition {
    pub fn new(rects: Vec<Rect>) -> Self {
        Self { rects }
    }

    /// Representative anchor: first rect's horizontal centre and bottom edge
    pub fn anchor(&self) -> Option<(f32, f32)> {
        self.rects.first().map(|rect| (rect.center_x(), rect.bottom()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationWithPosition {
    pub annotation: Annotation,
    pub position: AnnotationPosition,
}

/// A link joined with the anchors of both endpoint annotations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkWithPosition {
    pub link: Link,
    pub from_x: f32,
    pub to_x: f32,
    pub from_link_y: f32,
    pub to_link_y: f32,
}

impl LinkWithPosition {
    /// Both endpoints sit on the same baseline
    pub fn is_single_line(&self) -> bool {
        Baseline(self.from_link_y) == Baseline(self.to_link_y)
    }

    /// Horizontal extent `[min_x, max_x]` of a single-line link
    pub fn extent(&self) -> (f32, f32) {
        (self.from_x.min(self.to_x), self.from_x.max(self.to_x))
    }
}
