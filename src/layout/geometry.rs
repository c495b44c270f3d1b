//! Text geometry measurement
//!
//! The layout core never measures text itself. It asks a `GeometryResolver`
//! for the rects a span occupies in the rendered spaced text. Implementations:
//!
//! - `MonospaceResolver`: headless fixed-pitch layout, also the test double
//! - `MeasuredGeometry`: rects measured by JavaScript and passed in
//! - `api::dom::DomGeometryResolver`: DOM `Range` measurement in the browser

use crate::models::{Baseline, Rect, Span, TextNodeDimension};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Measures spans of the rendered spaced text
pub trait GeometryResolver {
    /// Rects covered by `span`, one per visual line, in reading order
    ///
    /// Returns an empty list when the span is not rendered.
    fn measure(&self, span: Span) -> Vec<Rect>;

    /// Size and placement of the text block
    fn text_node(&self) -> TextNodeDimension;

    /// Bottom edge of every visual line, top to bottom
    fn line_baselines(&self) -> Vec<f32>;

    /// Char span of every visual line in the measured text, top to bottom
    ///
    /// Aligned with `line_baselines`. An empty list means the line structure
    /// is unknown.
    fn line_spans(&self) -> Vec<Span>;
}

/// Fixed-pitch font metrics for headless layout
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MonospaceMetrics {
    pub char_width: f32,
    pub line_height: f32,
    pub origin_x: f32,
    pub origin_y: f32,
    /// Soft-wrap after this many columns
    pub wrap_columns: Option<usize>,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 16.0,
            origin_x: 0.0,
            origin_y: 0.0,
            wrap_columns: None,
        }
    }
}

/// Lays text out on a fixed grid, breaking at `'\n'` and the wrap column
#[derive(Debug, Clone)]
pub struct MonospaceResolver {
    metrics: MonospaceMetrics,
    /// Char range of each visual line
    rows: Vec<Span>,
    text_len: usize,
}

impl MonospaceResolver {
    pub fn new(text: &str, metrics: MonospaceMetrics) -> Self {
        let mut rows = Vec::new();
        let mut begin = 0;
        let mut len = 0;

        for (i, c) in text.chars().enumerate() {
            len = i + 1;
            if c == '\n' {
                rows.push(Span::new(begin, i));
                begin = i + 1;
                continue;
            }
            if let Some(wrap) = metrics.wrap_columns.filter(|w| *w > 0) {
                if i - begin == wrap {
                    rows.push(Span::new(begin, i));
                    begin = i;
                }
            }
        }
        rows.push(Span::new(begin, len));

        Self {
            metrics,
            rows,
            text_len: len,
        }
    }

    fn row_rect(&self, row: usize, line: &Span, begin: usize, end: usize) -> Rect {
        let m = &self.metrics;
        Rect::new(
            m.origin_x + (begin - line.begin) as f32 * m.char_width,
            m.origin_y + row as f32 * m.line_height,
            (end - begin) as f32 * m.char_width,
            m.line_height,
        )
    }
}

impl GeometryResolver for MonospaceResolver {
    fn measure(&self, span: Span) -> Vec<Rect> {
        if span.begin > self.text_len || span.begin > span.end {
            return Vec::new();
        }
        let end = span.end.min(self.text_len);

        if span.begin == end {
            // Caret-sized rect on the first row that can hold the offset
            return self
                .rows
                .iter()
                .enumerate()
                .find(|(_, line)| line.begin <= span.begin && span.begin <= line.end)
                .map(|(row, line)| vec![self.row_rect(row, line, span.begin, span.begin)])
                .unwrap_or_default();
        }

        self.rows
            .iter()
            .enumerate()
            .filter_map(|(row, line)| {
                let begin = span.begin.max(line.begin);
                let end = end.min(line.end);
                (begin < end).then(|| self.row_rect(row, line, begin, end))
            })
            .collect()
    }

    fn text_node(&self) -> TextNodeDimension {
        let columns = self.rows.iter().map(Span::len).max().unwrap_or(0);
        TextNodeDimension {
            width: columns as f32 * self.metrics.char_width,
            height: self.rows.len() as f32 * self.metrics.line_height,
            x: self.metrics.origin_x,
            y: self.metrics.origin_y,
            client_x: 0.0,
            client_y: 0.0,
        }
    }

    fn line_baselines(&self) -> Vec<f32> {
        (1..=self.rows.len())
            .map(|row| self.metrics.origin_y + row as f32 * self.metrics.line_height)
            .collect()
    }

    fn line_spans(&self) -> Vec<Span> {
        self.rows.clone()
    }
}

/// Rects JavaScript measured for one span
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MeasuredSpan {
    pub begin: usize,
    pub end: usize,
    pub rects: Vec<Rect>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMeasuredGeometry {
    text_node: TextNodeDimension,
    spans: Vec<MeasuredSpan>,
    #[serde(default)]
    line_baselines: Vec<f32>,
    #[serde(default)]
    line_spans: Vec<Span>,
}

/// Geometry measured outside the engine, looked up by span
#[derive(Deserialize, Clone, Debug)]
#[serde(from = "RawMeasuredGeometry")]
pub struct MeasuredGeometry {
    text_node: TextNodeDimension,
    rects: HashMap<Span, Vec<Rect>>,
    line_baselines: Vec<f32>,
    line_spans: Vec<Span>,
}

impl MeasuredGeometry {
    pub fn new(text_node: TextNodeDimension, spans: Vec<MeasuredSpan>, line_baselines: Vec<f32>) -> Self {
        let line_baselines = if line_baselines.is_empty() {
            // Fall back to the distinct bottoms of every measured rect
            spans
                .iter()
                .flat_map(|measured| measured.rects.iter().map(|rect| Baseline(rect.bottom())))
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(|baseline| baseline.0)
                .collect()
        } else {
            line_baselines
        };

        let rects = spans
            .into_iter()
            .map(|measured| (Span::new(measured.begin, measured.end), measured.rects))
            .collect();

        Self {
            text_node,
            rects,
            line_baselines,
            line_spans: Vec::new(),
        }
    }

    /// Attach the char span of each visual line, as measured by the caller
    pub fn with_line_spans(mut self, line_spans: Vec<Span>) -> Self {
        self.line_spans = line_spans;
        self
    }
}

impl From<RawMeasuredGeometry> for MeasuredGeometry {
    fn from(raw: RawMeasuredGeometry) -> Self {
        Self::new(raw.text_node, raw.spans, raw.line_baselines).with_line_spans(raw.line_spans)
    }
}

impl GeometryResolver for MeasuredGeometry {
    fn measure(&self, span: Span) -> Vec<Rect> {
        self.rects.get(&span).cloned().unwrap_or_default()
    }

    fn text_node(&self) -> TextNodeDimension {
        self.text_node
    }

    fn line_baselines(&self) -> Vec<f32> {
        self.line_baselines.clone()
    }

    fn line_spans(&self) -> Vec<Span> {
        self.line_spans.clone()
    }
}
