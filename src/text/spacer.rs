//! Text spacing for annotation labels
//!
//! Labels render starting at their annotation's first character. When a
//! label is wider than the text it annotates, padding characters are
//! inserted right after the span so the label does not run into the next
//! word. Every span is then shifted by the padding inserted before it.
//!
//! Offsets count `char`s. The function is pure: identical inputs produce an
//! identical `SpacedText`.

use crate::models::{Annotation, Span};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::iter;

/// Annotation id -> span in spaced-text coordinates
///
/// Only annotations whose span moved have an entry; absent ids keep their
/// original span.
pub type SpacedAnnotationSpan = BTreeMap<String, Span>;

/// Padding run inserted into the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insertion {
    /// Offset in the original text the padding precedes
    pub at: usize,
    /// Offset of the first padding character in the spaced text
    pub spaced_at: usize,
    pub len: usize,
}

/// Spacing parameters taken from the layout configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacingOptions {
    /// Columns kept free after a non-empty label
    pub label_padding: usize,
    pub padding_char: char,
}

impl Default for SpacingOptions {
    fn default() -> Self {
        Self {
            label_padding: 1,
            padding_char: ' ',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacedText {
    pub text: String,
    pub annotation_span_map: SpacedAnnotationSpan,
    pub insertions: Vec<Insertion>,
    /// Spaced-text range of each collapsed line
    pub collapsed_ranges: Vec<Span>,
}

impl SpacedText {
    /// Span to measure for an annotation, clamped to the spaced text
    pub fn span_for(&self, annotation: &Annotation) -> Span {
        let span = self
            .annotation_span_map
            .get(&annotation.id)
            .copied()
            .unwrap_or(annotation.span);
        span.clamped(self.text.chars().count())
    }

    /// Map a spaced-text offset back onto the original text
    ///
    /// Offsets inside a padding run map to the original offset the run
    /// precedes.
    pub fn original_offset(&self, spaced_offset: usize) -> usize {
        let mut removed = 0;
        for insertion in &self.insertions {
            if spaced_offset >= insertion.spaced_at + insertion.len {
                removed += insertion.len;
            } else if spaced_offset > insertion.spaced_at {
                return insertion.at;
            } else {
                break;
            }
        }
        spaced_offset - removed
    }

    /// Substring covered by `span` with inserted padding removed
    pub fn strip_padding(&self, span: Span) -> String {
        self.text
            .chars()
            .enumerate()
            .skip(span.begin)
            .take(span.len())
            .filter(|(i, _)| {
                !self
                    .insertions
                    .iter()
                    .any(|ins| *i >= ins.spaced_at && *i < ins.spaced_at + ins.len)
            })
            .map(|(_, c)| c)
            .collect()
    }
}

/// Reflow `text` so that every selected annotation's label fits
///
/// Annotations whose legend is not selected neither receive padding nor a
/// map entry. `collapsed_ranges` are original-text ranges of collapsed lines;
/// annotations that lie fully inside one are remapped but receive no label
/// padding, since their labels are hidden.
pub fn space_out_text(
    text: &str,
    annotations: &[Annotation],
    selected_legend_ids: &BTreeSet<String>,
    selected_legend_attribute_ids: &BTreeSet<String>,
    collapsed_ranges: &[Span],
    options: &SpacingOptions,
) -> SpacedText {
    let chars: Vec<char> = text.chars().collect();
    let collapsed: Vec<Span> = collapsed_ranges.iter().map(|range| range.clamped(chars.len())).collect();
    let attribute_ids: Vec<&str> = selected_legend_attribute_ids.iter().map(String::as_str).collect();

    let mut selected: Vec<(&Annotation, Span)> = annotations
        .iter()
        .filter(|annotation| selected_legend_ids.contains(&annotation.legend_id))
        .map(|annotation| (annotation, annotation.span.clamped(chars.len())))
        .collect();
    selected.sort_by(|(a, a_span), (b, b_span)| {
        (a_span.end, a_span.begin, &a.id).cmp(&(b_span.end, b_span.begin, &b.id))
    });

    // Original offset -> padding inserted before the character at that offset
    let mut padding: BTreeMap<usize, usize> = BTreeMap::new();

    for (annotation, span) in &selected {
        if collapsed.iter().any(|range| range.contains_span(span)) {
            continue;
        }

        let label_width = annotation.label(&attribute_ids).chars().count();
        if label_width == 0 {
            continue;
        }

        let required = label_width + options.label_padding;
        let inner: usize = if span.begin < span.end {
            padding.range(span.begin + 1..span.end).map(|(_, n)| n).sum()
        } else {
            0
        };
        let width = span.len() + inner;

        if width < required {
            let slot = padding.entry(span.end).or_insert(0);
            *slot = (*slot).max(required - width);
        }
    }

    let mut spaced = String::with_capacity(text.len() + padding.values().sum::<usize>());
    let mut insertions = Vec::with_capacity(padding.len());
    let mut shift = 0;
    for (offset, len) in &padding {
        insertions.push(Insertion {
            at: *offset,
            spaced_at: *offset + shift,
            len: *len,
        });
        shift += len;
    }

    let mut pending = insertions.iter().peekable();
    for offset in 0..=chars.len() {
        if let Some(insertion) = pending.next_if(|ins| ins.at == offset) {
            spaced.extend(iter::repeat(options.padding_char).take(insertion.len));
        }
        if let Some(c) = chars.get(offset) {
            spaced.push(*c);
        }
    }

    let annotation_span_map: SpacedAnnotationSpan = selected
        .iter()
        .filter_map(|(annotation, span)| {
            let remapped = remap(&padding, span);
            (remapped != annotation.span).then(|| (annotation.id.clone(), remapped))
        })
        .collect();

    let collapsed_ranges = collapsed
        .iter()
        .map(|line| {
            Span::new(
                line.begin + padding_before(&padding, line.begin),
                line.end + padding_before(&padding, line.end) + padding_at(&padding, line.end),
            )
        })
        .collect();

    log::debug!(
        "spaced {} annotations: {} padding runs, {} chars added",
        selected.len(),
        insertions.len(),
        shift
    );

    SpacedText {
        text: spaced,
        annotation_span_map,
        insertions,
        collapsed_ranges,
    }
}

fn padding_before(padding: &BTreeMap<usize, usize>, offset: usize) -> usize {
    padding.range(..offset).map(|(_, n)| n).sum()
}

fn padding_at(padding: &BTreeMap<usize, usize>, offset: usize) -> usize {
    padding.get(&offset).copied().unwrap_or(0)
}

/// Shift a clamped span into spaced coordinates
///
/// A non-empty span starts after any padding placed at its first offset,
/// since that padding belongs to the preceding annotation.
fn remap(padding: &BTreeMap<usize, usize>, span: &Span) -> Span {
    let end = span.end + padding_before(padding, span.end);
    if span.is_empty() {
        let begin = span.begin + padding_before(padding, span.begin);
        return Span::new(begin, begin);
    }

    let begin = span.begin + padding_before(padding, span.begin) + padding_at(padding, span.begin);
    Span::new(begin, end)
}
