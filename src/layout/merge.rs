//! Joins domain entities with measured geometry
//!
//! Both joins are keyed by id. Positions are never matched to annotations by
//! array index, so filtering or reordering either side cannot misalign them.

use crate::models::{
    Annotation, AnnotationPosition, AnnotationWithPosition, Link, LinkWithPosition,
};
use std::collections::{BTreeSet, HashMap};

/// Annotation id -> measured position
pub type PositionIndex = HashMap<String, AnnotationPosition>;

/// Pair each selected annotation with its measured position
///
/// Annotations with no entry in `positions` get an empty (unknown) position;
/// they are kept so labels can still be listed, and links to them drop out
/// later.
pub fn merge_annotation_with_position(
    positions: &PositionIndex,
    annotations: &[Annotation],
    selected_legend_ids: &BTreeSet<String>,
) -> Vec<AnnotationWithPosition> {
    annotations
        .iter()
        .filter(|annotation| selected_legend_ids.contains(&annotation.legend_id))
        .map(|annotation| AnnotationWithPosition {
            annotation: annotation.clone(),
            position: positions.get(&annotation.id).cloned().unwrap_or_default(),
        })
        .collect()
}

/// Resolve each selected link's endpoints against positioned annotations
///
/// A link is dropped without error when either endpoint is missing, hidden
/// by legend filtering, or has no known position.
pub fn merge_link_with_position(
    links: &[Link],
    annotations_with_position: &[AnnotationWithPosition],
    selected_legend_ids: &BTreeSet<String>,
) -> Vec<LinkWithPosition> {
    let by_id: HashMap<&str, &AnnotationPosition> = annotations_with_position
        .iter()
        .map(|ann| (ann.annotation.id.as_str(), &ann.position))
        .collect();

    links
        .iter()
        .filter(|link| selected_legend_ids.contains(&link.legend_id))
        .filter_map(|link| {
            let from = by_id.get(link.from_entry_id.as_str()).and_then(|pos| pos.anchor());
            let to = by_id.get(link.to_entry_id.as_str()).and_then(|pos| pos.anchor());

            match (from, to) {
                (Some((from_x, from_link_y)), Some((to_x, to_link_y))) => Some(LinkWithPosition {
                    link: link.clone(),
                    from_x,
                    to_x,
                    from_link_y,
                    to_link_y,
                }),
                _ => {
                    log::trace!("dropping link {}: endpoint not positioned", link.id);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Rect, Span};

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn positioned(x: f32, y: f32) -> AnnotationPosition {
        AnnotationPosition::new(vec![Rect::new(x, y, 20.0, 16.0)])
    }

    fn annotations() -> Vec<Annotation> {
        vec![
            Annotation::new("a", Span::new(0, 3), "person"),
            Annotation::new("b", Span::new(4, 7), "place"),
            Annotation::new("c", Span::new(8, 11), "person"),
        ]
    }

    #[test]
    fn test_join_is_by_id_not_index() {
        let mut positions = PositionIndex::new();
        positions.insert("c".to_string(), positioned(100.0, 0.0));
        positions.insert("a".to_string(), positioned(0.0, 0.0));

        let merged = merge_annotation_with_position(&positions, &annotations(), &set(&["person"]));

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].annotation.id, "a");
        assert_eq!(merged[0].position.rects[0].x, 0.0);
        assert_eq!(merged[1].annotation.id, "c");
        assert_eq!(merged[1].position.rects[0].x, 100.0);
    }

    #[test]
    fn test_missing_position_is_unknown_not_error() {
        let merged = merge_annotation_with_position(&PositionIndex::new(), &annotations(), &set(&["place"]));
        assert_eq!(merged.len(), 1);
        assert!(merged[0].position.rects.is_empty());
    }

    #[test]
    fn test_links_resolve_anchors() {
        let mut positions = PositionIndex::new();
        positions.insert("a".to_string(), positioned(0.0, 0.0));
        positions.insert("c".to_string(), positioned(100.0, 16.0));
        let merged = merge_annotation_with_position(&positions, &annotations(), &set(&["person"]));

        let links = vec![Link::new("l1", "a", "c", "rel")];
        let with_pos = merge_link_with_position(&links, &merged, &set(&["person", "rel"]));

        assert_eq!(with_pos.len(), 1);
        assert_eq!(with_pos[0].from_x, 10.0);
        assert_eq!(with_pos[0].to_x, 110.0);
        assert_eq!(with_pos[0].from_link_y, 16.0);
        assert_eq!(with_pos[0].to_link_y, 32.0);
        assert!(!with_pos[0].is_single_line());
    }

    #[test]
    fn test_unresolvable_links_are_dropped() {
        let mut positions = PositionIndex::new();
        positions.insert("a".to_string(), positioned(0.0, 0.0));
        positions.insert("b".to_string(), positioned(40.0, 0.0));
        let merged = merge_annotation_with_position(&positions, &annotations(), &set(&["person", "rel"]));

        let links = vec![
            // "b" is filtered out by legend
            Link::new("hidden", "a", "b", "rel"),
            Link::new("dangling", "a", "zzz", "rel"),
            // "c" has no position
            Link::new("unmeasured", "a", "c", "rel"),
            Link::new("unselected", "a", "a", "other"),
            Link::new("self", "a", "a", "rel"),
        ];
        let with_pos = merge_link_with_position(&links, &merged, &set(&["person", "rel"]));

        let ids: Vec<&str> = with_pos.iter().map(|l| l.link.id.as_str()).collect();
        assert_eq!(ids, vec!["self"]);
    }
}
