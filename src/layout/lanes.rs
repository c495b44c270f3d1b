//! Lane assignment for links sharing a baseline
//!
//! Same-line links are horizontal intervals on their baseline. Lanes are
//! handed out by greedy interval colouring: intervals sorted by start (then
//! link id), each taking the lowest lane whose previous interval ended
//! strictly before it starts. This uses exactly as many lanes as the largest
//! set of mutually overlapping intervals.
//!
//! Cross-line links are not scheduled against each other. Every baseline a
//! cross-line link touches reserves one shared lane above its same-line lanes.

use crate::models::{Baseline, LinkWithPosition};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Lanes a link occupies at its two endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkLanes {
    pub from_lane: usize,
    pub to_lane: usize,
    /// Horizontal run from each endpoint to the right edge of the text, for
    /// cross-line links
    pub from_segment: Option<(f32, f32)>,
    pub to_segment: Option<(f32, f32)>,
}

/// Lane count per baseline plus each link's lane
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinesLevels {
    levels: BTreeMap<Baseline, usize>,
    lanes: BTreeMap<String, LinkLanes>,
}

impl LinesLevels {
    /// Lanes used at `baseline` (0 when no link touches it)
    pub fn lane_count(&self, baseline: f32) -> usize {
        self.levels.get(&Baseline(baseline)).copied().unwrap_or(0)
    }

    pub fn lanes_of(&self, link_id: &str) -> Option<LinkLanes> {
        self.lanes.get(link_id).copied()
    }

    /// `(baseline, lane count)` in reading order
    pub fn baselines(&self) -> impl Iterator<Item = (Baseline, usize)> + '_ {
        self.levels.iter().map(|(baseline, count)| (*baseline, *count))
    }

    /// Ensure every given baseline has an entry, with zero lanes if new
    pub fn seed_baselines<I: IntoIterator<Item = f32>>(&mut self, baselines: I) {
        for baseline in baselines {
            self.levels.entry(Baseline(baseline)).or_insert(0);
        }
    }

    /// Override one baseline's lane count
    pub fn set_lane_count(&mut self, baseline: f32, count: usize) {
        self.levels.insert(Baseline(baseline), count);
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Assign lanes to `links` and count the lanes used per baseline
///
/// `line_start_x` and `line_width` bound the text block; extents are clamped
/// to it when `line_width` is positive.
pub fn calculate_lines_levels(
    links: &[LinkWithPosition],
    line_start_x: f32,
    line_width: f32,
) -> LinesLevels {
    let line_end = line_start_x + line_width;
    let clamp = |x: f32| {
        if line_width > 0.0 {
            x.clamp(line_start_x, line_end)
        } else {
            x
        }
    };

    let mut same_line: BTreeMap<Baseline, Vec<(f32, f32, &str)>> = BTreeMap::new();
    let mut cross_line: Vec<&LinkWithPosition> = Vec::new();

    for link in links {
        if link.is_single_line() {
            let (min_x, max_x) = link.extent();
            same_line
                .entry(Baseline(link.from_link_y))
                .or_default()
                .push((clamp(min_x), clamp(max_x), link.link.id.as_str()));
        } else {
            cross_line.push(link);
        }
    }

    let mut result = LinesLevels::default();

    for (baseline, mut intervals) in same_line {
        intervals.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.2.cmp(b.2)));

        // End of the interval currently holding each lane
        let mut lane_ends: Vec<f32> = Vec::new();
        for (min_x, max_x, id) in intervals {
            let lane = match lane_ends.iter().position(|end| *end < min_x) {
                Some(free) => {
                    lane_ends[free] = max_x;
                    free
                }
                None => {
                    lane_ends.push(max_x);
                    lane_ends.len() - 1
                }
            };
            result.lanes.insert(
                id.to_string(),
                LinkLanes {
                    from_lane: lane,
                    to_lane: lane,
                    from_segment: None,
                    to_segment: None,
                },
            );
        }
        result.levels.insert(baseline, lane_ends.len());
    }

    let mut touched: BTreeSet<Baseline> = BTreeSet::new();
    for link in cross_line {
        let from = Baseline(link.from_link_y);
        let to = Baseline(link.to_link_y);
        let from_x = clamp(link.from_x);
        let to_x = clamp(link.to_x);
        let edge = if line_width > 0.0 { line_end } else { from_x.max(to_x) };
        let from_lane = result.lane_count(from.0);
        let to_lane = result.lane_count(to.0);

        result.lanes.insert(
            link.link.id.clone(),
            LinkLanes {
                from_lane,
                to_lane,
                from_segment: Some((from_x, edge)),
                to_segment: Some((to_x, edge)),
            },
        );
        touched.insert(from);
        touched.insert(to);
    }

    for baseline in touched {
        *result.levels.entry(baseline).or_insert(0) += 1;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Link;

    fn link(id: &str, from_x: f32, to_x: f32, y: f32) -> LinkWithPosition {
        cross(id, from_x, y, to_x, y)
    }

    fn cross(id: &str, from_x: f32, from_y: f32, to_x: f32, to_y: f32) -> LinkWithPosition {
        LinkWithPosition {
            link: Link::new(id, "a", "b", "rel"),
            from_x,
            to_x,
            from_link_y: from_y,
            to_link_y: to_y,
        }
    }

    #[test]
    fn test_overlapping_links_take_separate_lanes() {
        let links = vec![
            link("L1", 10.0, 50.0, 20.0),
            link("L2", 70.0, 30.0, 20.0),
            link("L3", 60.0, 90.0, 20.0),
        ];
        let levels = calculate_lines_levels(&links, 0.0, 200.0);

        assert_eq!(levels.lanes_of("L1").unwrap().from_lane, 0);
        assert_eq!(levels.lanes_of("L2").unwrap().from_lane, 1);
        assert_eq!(levels.lanes_of("L3").unwrap().from_lane, 0);
        assert_eq!(levels.lane_count(20.0), 2);
    }

    #[test]
    fn test_touching_intervals_overlap() {
        let links = vec![link("a", 10.0, 50.0, 20.0), link("b", 50.0, 90.0, 20.0)];
        let levels = calculate_lines_levels(&links, 0.0, 200.0);
        assert_eq!(levels.lane_count(20.0), 2);
    }

    #[test]
    fn test_equal_starts_break_ties_by_id() {
        let links = vec![link("z", 10.0, 40.0, 20.0), link("m", 10.0, 30.0, 20.0)];
        let levels = calculate_lines_levels(&links, 0.0, 200.0);

        assert_eq!(levels.lanes_of("m").unwrap().from_lane, 0);
        assert_eq!(levels.lanes_of("z").unwrap().from_lane, 1);
    }

    #[test]
    fn test_baselines_are_independent() {
        let links = vec![link("a", 10.0, 50.0, 20.0), link("b", 10.0, 50.0, 40.0)];
        let levels = calculate_lines_levels(&links, 0.0, 200.0);

        assert_eq!(levels.lane_count(20.0), 1);
        assert_eq!(levels.lane_count(40.0), 1);
        assert_eq!(levels.lanes_of("b").unwrap().from_lane, 0);
    }

    #[test]
    fn test_cross_line_links_share_one_lane_per_baseline() {
        let links = vec![
            link("same", 10.0, 50.0, 20.0),
            cross("down1", 30.0, 20.0, 10.0, 40.0),
            cross("down2", 60.0, 20.0, 5.0, 40.0),
        ];
        let levels = calculate_lines_levels(&links, 0.0, 200.0);

        assert_eq!(levels.lane_count(20.0), 2);
        assert_eq!(levels.lane_count(40.0), 1);

        let lanes = levels.lanes_of("down1").unwrap();
        assert_eq!(lanes.from_lane, 1);
        assert_eq!(lanes.to_lane, 0);
        assert_eq!(lanes.from_segment, Some((30.0, 200.0)));
        assert_eq!(lanes.to_segment, Some((10.0, 200.0)));
        assert_eq!(levels.lanes_of("down2").unwrap().from_lane, 1);
    }

    #[test]
    fn test_seeded_baselines_keep_existing_counts() {
        let mut levels = calculate_lines_levels(&[link("a", 0.0, 10.0, 20.0)], 0.0, 100.0);
        levels.seed_baselines([20.0, 40.0]);

        let entries: Vec<(f32, usize)> = levels.baselines().map(|(b, n)| (b.0, n)).collect();
        assert_eq!(entries, vec![(20.0, 1), (40.0, 0)]);
    }
}
