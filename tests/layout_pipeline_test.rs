//! End-to-end layout through a viewer session
//!
//! Loads a two-line document from JSON, lays it out against a fixed-pitch
//! resolver and follows the display list through collapse and legend changes.

use serde_json::json;
use text_viewer_wasm::layout::{LinkShape, MonospaceMetrics, MonospaceResolver, RenderLink};
use text_viewer_wasm::{DisplayList, LayoutConfig, Span, TextPack, ViewerCommand, ViewerSession};

const TEXT: &str = "Ann met Bob\nBob saw Cy";

fn pack() -> TextPack {
    serde_json::from_value(json!({
        "text": TEXT,
        "annotations": [
            {"id": "ann", "span": {"begin": 0, "end": 3}, "legendId": "ent"},
            {"id": "bob", "span": {"begin": 8, "end": 11}, "legendId": "ent"},
            {"id": "bob2", "span": {"begin": 12, "end": 15}, "legendId": "ent"},
            {"id": "cy", "span": {"begin": 20, "end": 22}, "legendId": "ent",
             "attributes": {"type": "PERSON"}}
        ],
        "links": [
            {"id": "met", "fromEntryId": "ann", "toEntryId": "bob", "legendId": "rel"},
            {"id": "same", "fromEntryId": "bob", "toEntryId": "bob2", "legendId": "rel"},
            {"id": "saw", "fromEntryId": "bob2", "toEntryId": "cy", "legendId": "rel"}
        ],
        "legends": {
            "annotations": [{"id": "ent", "displayName": "Entity", "attributes": ["type"]}],
            "links": [{"id": "rel", "displayName": "Relation"}]
        }
    }))
    .expect("text pack should deserialize")
}

fn layout(session: &mut ViewerSession) -> DisplayList {
    let spaced = session.spaced_text().spaced_text;
    let resolver = MonospaceResolver::new(&spaced, MonospaceMetrics::default());
    session.compute_layout(&resolver)
}

fn link<'a>(display: &'a DisplayList, id: &str) -> &'a RenderLink {
    display
        .links
        .iter()
        .find(|link| link.position.link.id == id)
        .unwrap_or_else(|| panic!("link {} missing", id))
}

#[test]
fn test_two_line_document_layout() {
    let mut session = ViewerSession::new(pack(), LayoutConfig::default());
    let display = layout(&mut session);

    // No attribute selected, so no label needs room
    assert_eq!(display.spaced_text, TEXT);
    assert_eq!(display.annotations.len(), 4);
    assert_eq!(display.links.len(), 3);

    let lane_counts: Vec<usize> = display.lines.iter().map(|line| line.lane_count).collect();
    assert_eq!(lane_counts, vec![2, 2]);
    assert_eq!(display.lines[0].offset, 0.0);
    assert_eq!(display.lines[1].offset, 16.0);
    assert_eq!(display.total_link_height, 32.0);

    let met = link(&display, "met");
    assert_eq!(met.position.from_x, 12.0);
    assert_eq!(met.position.to_x, 76.0);
    assert_eq!(
        met.shape,
        LinkShape::SingleLine {
            lane: 0,
            collapsed: false,
            lift: 8.0
        }
    );

    let same = link(&display, "same");
    assert_eq!(
        same.shape,
        LinkShape::MultiLine {
            from_lane: 1,
            to_lane: 1,
            from_lift: 16.0,
            to_lift: 16.0,
            from_segment: (76.0, 88.0),
            to_segment: (12.0, 88.0),
        }
    );
    assert_eq!(same.from_offset, 0.0);
    assert_eq!(same.to_offset, 16.0);

    assert_eq!(display.line_toggles.len(), 2);
    assert!(display.link_edit_connector.is_none());
}

#[test]
fn test_collapsing_a_line_releases_its_space() {
    let mut session = ViewerSession::new(pack(), LayoutConfig::default());
    let expanded = layout(&mut session);

    assert!(session.dispatch(ViewerCommand::CollapseLine { line_index: 1 }));
    assert!(!session.state().spacing_calculated);
    let collapsed = layout(&mut session);

    assert!(collapsed.lines[1].collapsed);
    assert_eq!(collapsed.lines[1].reserved, 0.0);
    assert_eq!(collapsed.total_link_height, 16.0);
    assert_eq!(collapsed.collapsed_ranges.len(), 1);
    assert_eq!(
        link(&collapsed, "saw").shape,
        LinkShape::SingleLine {
            lane: 0,
            collapsed: true,
            lift: 0.0
        }
    );
    assert!(collapsed.line_toggles[1].collapsed);

    assert!(session.dispatch(ViewerCommand::UncollapseLine { line_index: 1 }));
    let restored = layout(&mut session);
    assert_eq!(restored, expanded);
}

#[test]
fn test_collapsing_a_soft_wrapped_line() {
    let pack: TextPack = serde_json::from_value(json!({
        "text": "aa bb cc\ncc dd",
        "annotations": [
            {"id": "cc", "span": {"begin": 9, "end": 11}, "legendId": "ent",
             "attributes": {"type": "LONGLABEL"}}
        ],
        "legends": {
            "annotations": [{"id": "ent", "displayName": "Entity", "attributes": ["type"]}]
        }
    }))
    .expect("text pack should deserialize");
    let metrics = MonospaceMetrics {
        wrap_columns: Some(6),
        ..MonospaceMetrics::default()
    };
    let wrapped_layout = |session: &mut ViewerSession| {
        let spaced = session.spaced_text().spaced_text;
        let resolver = MonospaceResolver::new(&spaced, metrics);
        session.compute_layout(&resolver)
    };

    let mut session = ViewerSession::new(pack, LayoutConfig::default());
    session.dispatch(ViewerCommand::SelectLegendAttribute {
        attribute_id: "ent_type".to_string(),
    });
    let expanded = wrapped_layout(&mut session);
    assert_eq!(expanded.spaced_text, "aa bb cc\ncc         dd");
    assert!(expanded.collapsed_ranges.is_empty());

    // Rows are "aa bb ", "cc", "cc    ", ... so the label row is line 2
    assert!(session.dispatch(ViewerCommand::CollapseLine { line_index: 2 }));
    let collapsed = wrapped_layout(&mut session);
    assert_eq!(collapsed.spaced_text, "aa bb cc\ncc dd");
    assert_eq!(collapsed.collapsed_ranges, vec![Span::new(9, 11)]);
    assert!(collapsed.lines[2].collapsed);
}

#[test]
fn test_deselecting_link_legend_clears_lanes() {
    let mut session = ViewerSession::new(pack(), LayoutConfig::default());
    session.dispatch(ViewerCommand::DeselectLegend {
        legend_id: "rel".to_string(),
    });

    let display = layout(&mut session);
    assert!(display.links.is_empty());
    assert!(display.line_toggles.is_empty());
    assert_eq!(display.total_link_height, 0.0);
    assert_eq!(display.annotations.len(), 4);
}

#[test]
fn test_selected_attribute_spaces_out_label() {
    let mut session = ViewerSession::new(pack(), LayoutConfig::default());
    assert!(session.dispatch(ViewerCommand::SelectLegendAttribute {
        attribute_id: "ent_type".to_string(),
    }));

    let view = session.spaced_text();
    // "Cy" needs 7 columns for "PERSON" plus padding
    assert_eq!(view.spaced_text, format!("{}     ", TEXT));
    assert!(view.spaced_annotation_span.is_empty());

    let display = layout(&mut session);
    let cy = display
        .annotations
        .iter()
        .find(|a| a.annotation.id == "cy")
        .expect("cy laid out");
    assert_eq!(cy.position.rects[0].width, 16.0);
}

#[test]
fn test_link_creation_connector_tracks_pointer() {
    let mut session = ViewerSession::new(pack(), LayoutConfig::default());
    session.dispatch(ViewerCommand::StartCreateLink {
        from_entry_id: "ann".to_string(),
    });
    session.pointer_move(40.0, 30.0);
    assert!(session.animation_frame());

    let display = layout(&mut session);
    let connector = display.link_edit_connector.expect("connector while creating");
    assert_eq!((connector.to_x, connector.to_y), (40.0, 30.0));

    session.dispatch(ViewerCommand::EndCreateLink);
    assert!(layout(&mut session).link_edit_connector.is_none());
}
