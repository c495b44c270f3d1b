//! Layout pipeline
//!
//! Runs spacing, measurement, merging, lane assignment and height
//! calculation for one document. Spacing is the only stage whose output is
//! cached: it is keyed by a hash of everything it depends on and recomputed
//! only when that hash changes or the cache is invalidated.
//!
//! Collapsed line indices refer to visual lines as the resolver last
//! reported them. Before anything has been measured they fall back to
//! `'\n'`-separated lines of the original text.

use super::config::LayoutConfig;
use super::display_list::{DisplayList, LineToggle, LinkEditConnector, LinkShape, RenderLink};
use super::geometry::GeometryResolver;
use super::height::{calculate_link_height, LinkHeights};
use super::lanes::calculate_lines_levels;
use super::merge::{merge_annotation_with_position, merge_link_with_position, PositionIndex};
use crate::models::{AnnotationPosition, AnnotationWithPosition, Span, TextNodeDimension, TextPack};
use crate::store::state::{LinkEditState, ViewerSnapshot};
use crate::text::{space_out_text, HardLines, SpacedText};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// A span JavaScript should measure for one annotation
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeasureRequest {
    pub annotation_id: String,
    pub begin: usize,
    pub end: usize,
}

#[derive(Debug, Default)]
struct SpacingCache {
    key: Option<u64>,
    spaced: SpacedText,
}

/// Main layout engine for computing display lists
#[derive(Debug)]
pub struct LayoutEngine {
    config: LayoutConfig,
    cache: SpacingCache,
    /// Visual lines of the last measurement, in original-text offsets
    visual_lines: Vec<Span>,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            cache: SpacingCache::default(),
            visual_lines: Vec::new(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Drop the cached spacing so the next pass recomputes it
    pub fn invalidate(&mut self) {
        self.cache.key = None;
    }

    /// Check if spacing for these inputs is already cached
    pub fn is_cached(&self, pack: &TextPack, snapshot: &ViewerSnapshot) -> bool {
        let legends = annotation_legends(pack, snapshot);
        let collapsed = self.collapsed_ranges(pack, snapshot);
        self.cache.key == Some(self.spacing_key(pack, snapshot, &legends, &collapsed))
    }

    /// Spaced text for the current inputs, recomputed only when they changed
    pub fn space_out(&mut self, pack: &TextPack, snapshot: &ViewerSnapshot) -> &SpacedText {
        let legends = annotation_legends(pack, snapshot);
        self.ensure_spaced(pack, snapshot, &legends);
        &self.cache.spaced
    }

    /// Spans to measure, in spaced-text coordinates, for visible annotations
    pub fn measurement_requests(&mut self, pack: &TextPack, snapshot: &ViewerSnapshot) -> Vec<MeasureRequest> {
        let legends = annotation_legends(pack, snapshot);
        self.ensure_spaced(pack, snapshot, &legends);
        let spaced = &self.cache.spaced;

        pack.annotations
            .iter()
            .filter(|annotation| legends.contains(&annotation.legend_id))
            .map(|annotation| {
                let span = spaced.span_for(annotation);
                MeasureRequest {
                    annotation_id: annotation.id.clone(),
                    begin: span.begin,
                    end: span.end,
                }
            })
            .collect()
    }

    /// Compute complete layout for a document
    ///
    /// `resolver` must measure the spaced text this engine produced for the
    /// same `pack` and `snapshot`.
    pub fn compute_layout<R: GeometryResolver + ?Sized>(
        &mut self,
        pack: &TextPack,
        snapshot: &ViewerSnapshot,
        resolver: &R,
    ) -> DisplayList {
        let legends = annotation_legends(pack, snapshot);
        self.ensure_spaced(pack, snapshot, &legends);
        let spaced = &self.cache.spaced;
        let config = &self.config;

        let positions: PositionIndex = pack
            .annotations
            .iter()
            .filter(|annotation| legends.contains(&annotation.legend_id))
            .map(|annotation| {
                let rects = resolver.measure(spaced.span_for(annotation));
                (annotation.id.clone(), AnnotationPosition::new(rects))
            })
            .collect();

        let annotations = merge_annotation_with_position(&positions, &pack.annotations, &legends);
        let links = merge_link_with_position(&pack.links, &annotations, &snapshot.selected_legend_ids);

        let text_node = resolver.text_node();
        let mut levels = calculate_lines_levels(&links, text_node.x, text_node.width);
        levels.seed_baselines(resolver.line_baselines());
        let heights = calculate_link_height(&levels, config.link_gap, config.min_line_extent, &snapshot.collapsed);

        let render_links = links
            .into_iter()
            .filter_map(|position| {
                let lanes = levels.lanes_of(&position.link.id)?;
                let from_offset = heights.offset_of(position.from_link_y);
                let to_offset = heights.offset_of(position.to_link_y);
                let lift = |lane: usize, baseline: f32| {
                    if heights.is_collapsed(baseline) {
                        0.0
                    } else {
                        (lane + 1) as f32 * config.link_gap
                    }
                };

                let shape = match (lanes.from_segment, lanes.to_segment) {
                    (Some(from_segment), Some(to_segment)) => LinkShape::MultiLine {
                        from_lane: lanes.from_lane,
                        to_lane: lanes.to_lane,
                        from_lift: lift(lanes.from_lane, position.from_link_y),
                        to_lift: lift(lanes.to_lane, position.to_link_y),
                        from_segment,
                        to_segment,
                    },
                    _ => LinkShape::SingleLine {
                        lane: lanes.from_lane,
                        collapsed: heights.is_collapsed(position.from_link_y),
                        lift: lift(lanes.from_lane, position.from_link_y),
                    },
                };

                Some(RenderLink {
                    position,
                    shape,
                    from_offset,
                    to_offset,
                })
            })
            .collect();

        let link_edit_connector = connector(&snapshot.link_edit, &annotations, &text_node);
        let visual_lines: Vec<Span> = resolver
            .line_spans()
            .into_iter()
            .map(|line| Span::new(spaced.original_offset(line.begin), spaced.original_offset(line.end)))
            .collect();

        let display = DisplayList {
            spaced_text: spaced.text.clone(),
            collapsed_ranges: spaced.collapsed_ranges.clone(),
            text_node,
            annotations,
            links: render_links,
            line_toggles: line_toggles(&heights),
            total_link_height: heights.total,
            lines: heights.lines,
            link_edit_connector,
        };
        self.visual_lines = visual_lines;
        display
    }

    fn ensure_spaced(&mut self, pack: &TextPack, snapshot: &ViewerSnapshot, legends: &BTreeSet<String>) {
        let collapsed = self.collapsed_ranges(pack, snapshot);
        let key = self.spacing_key(pack, snapshot, legends, &collapsed);
        if self.cache.key == Some(key) {
            log::debug!("reusing cached spacing");
            return;
        }

        log::debug!("recomputing spacing for {} annotations", pack.annotations.len());
        self.cache.spaced = space_out_text(
            &pack.text,
            &pack.annotations,
            legends,
            &snapshot.selected_legend_attribute_ids,
            &collapsed,
            &self.config.spacing_options(),
        );
        self.cache.key = Some(key);
    }

    /// Original-text ranges of the collapsed lines
    fn collapsed_ranges(&self, pack: &TextPack, snapshot: &ViewerSnapshot) -> Vec<Span> {
        if snapshot.collapsed.is_empty() {
            return Vec::new();
        }
        let lines: Vec<Span> = if self.visual_lines.is_empty() {
            let chars: Vec<char> = pack.text.chars().collect();
            HardLines::split(&chars).iter().collect()
        } else {
            self.visual_lines.clone()
        };
        snapshot
            .collapsed
            .iter()
            .filter_map(|line_index| lines.get(line_index).copied())
            .collect()
    }

    fn spacing_key(
        &self,
        pack: &TextPack,
        snapshot: &ViewerSnapshot,
        legends: &BTreeSet<String>,
        collapsed: &[Span],
    ) -> u64 {
        let mut hasher = DefaultHasher::new();
        pack.text.hash(&mut hasher);
        for annotation in &pack.annotations {
            annotation.id.hash(&mut hasher);
            annotation.span.hash(&mut hasher);
            annotation.legend_id.hash(&mut hasher);
            for (name, value) in &annotation.attributes {
                name.hash(&mut hasher);
                value.to_string().hash(&mut hasher);
            }
        }
        legends.hash(&mut hasher);
        snapshot.selected_legend_attribute_ids.hash(&mut hasher);
        collapsed.hash(&mut hasher);
        self.config.label_padding.hash(&mut hasher);
        self.config.padding_char.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

/// Selected legend ids that are defined as annotation legends
fn annotation_legends(pack: &TextPack, snapshot: &ViewerSnapshot) -> BTreeSet<String> {
    snapshot
        .selected_legend_ids
        .iter()
        .filter(|id| pack.has_annotation_legend(id))
        .cloned()
        .collect()
}

fn line_toggles(heights: &LinkHeights) -> Vec<LineToggle> {
    heights
        .lines
        .iter()
        .filter(|line| line.lane_count > 0)
        .map(|line| LineToggle {
            line_index: line.line_index,
            top: line.baseline,
            collapsed: line.collapsed,
        })
        .collect()
}

fn connector(
    link_edit: &LinkEditState,
    annotations: &[AnnotationWithPosition],
    text_node: &TextNodeDimension,
) -> Option<LinkEditConnector> {
    if !link_edit.is_creating {
        return None;
    }
    let from_id = link_edit.from_entry_id.as_deref()?;
    let rect = annotations
        .iter()
        .find(|ann| ann.annotation.id == from_id)?
        .position
        .rects
        .first()?;

    let from_x = rect.center_x();
    let from_y = rect.y;
    let (to_x, to_y) = match link_edit.move_position {
        Some(pos) => (pos.x - text_node.client_x, pos.y - text_node.client_y),
        None => (from_x, from_y),
    };

    Some(LinkEditConnector {
        from_x,
        from_y,
        to_x,
        to_y,
    })
}
