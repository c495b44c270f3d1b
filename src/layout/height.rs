//! Vertical space reserved for stacked links
//!
//! Each line reserves `lane_count * link_gap` above its text (or the
//! configured minimum when it has no lanes). A line is shifted down by the
//! sum of everything reserved above it. Collapsed lines reserve nothing.

use super::collapse::CollapsedLines;
use super::lanes::LinesLevels;
use crate::models::Baseline;
use serde::{Deserialize, Serialize};

/// Reserved space and shift of one line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineHeight {
    /// Reading-order index, the index used by line collapsing
    pub line_index: usize,
    pub baseline: f32,
    pub lane_count: usize,
    pub reserved: f32,
    /// Sum of `reserved` over all lines above this one
    pub offset: f32,
    pub collapsed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkHeights {
    pub lines: Vec<LineHeight>,
    /// Total reserved over every line
    pub total: f32,
}

impl LinkHeights {
    fn find(&self, baseline: f32) -> Option<&LineHeight> {
        self.lines
            .iter()
            .find(|line| Baseline(line.baseline) == Baseline(baseline))
    }

    /// Shift applied to the line at `baseline` (0 for unknown baselines)
    pub fn offset_of(&self, baseline: f32) -> f32 {
        self.find(baseline).map_or(0.0, |line| line.offset)
    }

    pub fn is_collapsed(&self, baseline: f32) -> bool {
        self.find(baseline).map_or(false, |line| line.collapsed)
    }
}

pub fn calculate_link_height(
    levels: &LinesLevels,
    link_gap: f32,
    min_line_extent: f32,
    collapsed: &CollapsedLines,
) -> LinkHeights {
    let mut lines = Vec::with_capacity(levels.len());
    let mut cumulative = 0.0;

    for (line_index, (baseline, lane_count)) in levels.baselines().enumerate() {
        let is_collapsed = collapsed.is_collapsed(line_index);
        let reserved = if is_collapsed {
            0.0
        } else if lane_count == 0 {
            min_line_extent
        } else {
            lane_count as f32 * link_gap
        };

        lines.push(LineHeight {
            line_index,
            baseline: baseline.0,
            lane_count,
            reserved,
            offset: cumulative,
            collapsed: is_collapsed,
        });
        cumulative += reserved;
    }

    LinkHeights {
        lines,
        total: cumulative,
    }
}
