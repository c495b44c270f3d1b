//! DOM geometry measurement
//!
//! Measures spans of the rendered spaced text with DOM `Range`s over the
//! text element's first text node. The spaced text must already be rendered
//! into that element. Range offsets are UTF-16 code units, so char offsets
//! are converted first.

use crate::error::ViewerError;
use crate::layout::GeometryResolver;
use crate::models::{Baseline, Rect, Span, TextNodeDimension};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Node};

pub struct DomGeometryResolver {
    document: Document,
    text_node: Option<Node>,
    dimension: TextNodeDimension,
    /// UTF-16 offset of every char boundary, `len + 1` entries
    utf16_offsets: Vec<u32>,
}

impl DomGeometryResolver {
    /// Measure relative to `text_area`, reading text from `text_element`
    pub fn new(text_area: &Element, text_element: &Element, spaced_text: &str) -> Result<Self, ViewerError> {
        let document = text_area
            .owner_document()
            .ok_or_else(|| ViewerError::Dom("text area is not attached to a document".to_string()))?;

        let area = text_area.get_bounding_client_rect();
        let node = text_element.get_bounding_client_rect();
        let dimension = TextNodeDimension {
            width: node.width() as f32,
            height: node.height() as f32,
            x: (node.x() - area.x()) as f32,
            y: (node.y() - area.y()) as f32,
            client_x: area.x() as f32,
            client_y: area.y() as f32,
        };

        let mut utf16_offsets = Vec::with_capacity(spaced_text.len() + 1);
        let mut offset = 0u32;
        utf16_offsets.push(offset);
        for c in spaced_text.chars() {
            offset += c.len_utf16() as u32;
            utf16_offsets.push(offset);
        }

        Ok(Self {
            document,
            text_node: text_element.first_child(),
            dimension,
            utf16_offsets,
        })
    }

    fn client_rects(&self, span: Span) -> Result<Vec<Rect>, JsValue> {
        let node = match &self.text_node {
            Some(node) => node,
            None => return Ok(Vec::new()),
        };
        let (begin, end) = match (self.utf16_offsets.get(span.begin), self.utf16_offsets.get(span.end)) {
            (Some(begin), Some(end)) if begin <= end => (*begin, *end),
            _ => return Ok(Vec::new()),
        };

        let range = self.document.create_range()?;
        range.set_start(node, begin)?;
        range.set_end(node, end)?;

        let list = match range.get_client_rects() {
            Some(list) => list,
            None => return Ok(Vec::new()),
        };

        Ok((0..list.length())
            .filter_map(|i| list.get(i))
            .map(|rect| {
                Rect::new(
                    rect.x() as f32 - self.dimension.client_x,
                    rect.y() as f32 - self.dimension.client_y,
                    rect.width() as f32,
                    rect.height() as f32,
                )
            })
            .collect())
    }

    /// Group chars into visual lines by the bottom edge of their first rect
    fn visual_lines(&self) -> Vec<(Span, Baseline)> {
        let len = self.utf16_offsets.len().saturating_sub(1);
        let mut lines: Vec<(Span, Baseline)> = Vec::new();

        for i in 0..len {
            let bottom = match self.measure(Span::new(i, i + 1)).first() {
                Some(rect) => Baseline(rect.bottom()),
                None => continue,
            };
            match lines.last_mut() {
                Some((span, baseline)) if *baseline == bottom => span.end = i + 1,
                _ => lines.push((Span::new(i, i + 1), bottom)),
            }
        }
        lines
    }
}

impl GeometryResolver for DomGeometryResolver {
    fn measure(&self, span: Span) -> Vec<Rect> {
        self.client_rects(span).unwrap_or_else(|e| {
            log::warn!("range measurement failed for {:?}: {:?}", span, e);
            Vec::new()
        })
    }

    fn text_node(&self) -> TextNodeDimension {
        self.dimension
    }

    fn line_baselines(&self) -> Vec<f32> {
        self.visual_lines().into_iter().map(|(_, baseline)| baseline.0).collect()
    }

    fn line_spans(&self) -> Vec<Span> {
        self.visual_lines().into_iter().map(|(span, _)| span).collect()
    }
}
