//! Collapsible text lines
//!
//! Each line index is either expanded (the initial state) or collapsed.
//! Collapsing is idempotent: repeating a transition reports no change, which
//! lets callers skip invalidating the spacing cache.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineState {
    Expanded,
    Collapsed,
}

/// Set of collapsed line indices (0-based, reading order)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollapsedLines(BTreeSet<usize>);

impl CollapsedLines {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Collapse a line, returning true if its state changed
    pub fn collapse(&mut self, line_index: usize) -> bool {
        self.0.insert(line_index)
    }

    /// Expand a line, returning true if its state changed
    pub fn uncollapse(&mut self, line_index: usize) -> bool {
        self.0.remove(&line_index)
    }

    pub fn state(&self, line_index: usize) -> LineState {
        if self.is_collapsed(line_index) {
            LineState::Collapsed
        } else {
            LineState::Expanded
        }
    }

    pub fn is_collapsed(&self, line_index: usize) -> bool {
        self.0.contains(&line_index)
    }

    /// Collapsed indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<usize> for CollapsedLines {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
