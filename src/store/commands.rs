//! Typed commands accepted by the viewer state store
//!
//! Commands arrive from JavaScript as tagged objects, e.g.
//! `{"type": "collapse-line", "lineIndex": 2}`.

use crate::models::Position;
use crate::text::SpacedAnnotationSpan;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ViewerCommand {
    CollapseLine {
        line_index: usize,
    },
    UncollapseLine {
        line_index: usize,
    },
    /// Store the result of a spacing pass
    SetSpacedAnnotationSpan {
        spaced_annotation_span: SpacedAnnotationSpan,
        spaced_text: String,
    },
    /// Force spacing to be recomputed on the next layout pass
    ResetCalculatedTextSpace,
    SelectLegend {
        legend_id: String,
    },
    DeselectLegend {
        legend_id: String,
    },
    SelectLegendAttribute {
        attribute_id: String,
    },
    DeselectLegendAttribute {
        attribute_id: String,
    },
    StartCreateLink {
        from_entry_id: String,
    },
    UpdateMovePos {
        pos: Position,
    },
    EndCreateLink,
}

impl ViewerCommand {
    /// Command name as it appears in the `type` tag
    pub fn name(&self) -> &'static str {
        match self {
            ViewerCommand::CollapseLine { .. } => "collapse-line",
            ViewerCommand::UncollapseLine { .. } => "uncollapse-line",
            ViewerCommand::SetSpacedAnnotationSpan { .. } => "set-spaced-annotation-span",
            ViewerCommand::ResetCalculatedTextSpace => "reset-calculated-text-space",
            ViewerCommand::SelectLegend { .. } => "select-legend",
            ViewerCommand::DeselectLegend { .. } => "deselect-legend",
            ViewerCommand::SelectLegendAttribute { .. } => "select-legend-attribute",
            ViewerCommand::DeselectLegendAttribute { .. } => "deselect-legend-attribute",
            ViewerCommand::StartCreateLink { .. } => "start-create-link",
            ViewerCommand::UpdateMovePos { .. } => "update-move-pos",
            ViewerCommand::EndCreateLink => "end-create-link",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Span;
    use serde_json::json;

    #[test]
    fn test_parse_tagged_commands() {
        let collapse: ViewerCommand =
            serde_json::from_value(json!({"type": "collapse-line", "lineIndex": 2})).unwrap();
        assert_eq!(collapse, ViewerCommand::CollapseLine { line_index: 2 });

        let reset: ViewerCommand =
            serde_json::from_value(json!({"type": "reset-calculated-text-space"})).unwrap();
        assert_eq!(reset, ViewerCommand::ResetCalculatedTextSpace);

        let moved: ViewerCommand =
            serde_json::from_value(json!({"type": "update-move-pos", "pos": {"x": 3, "y": 4}}))
                .unwrap();
        assert_eq!(moved, ViewerCommand::UpdateMovePos { pos: Position { x: 3.0, y: 4.0 } });
    }

    #[test]
    fn test_set_spaced_annotation_span_payload() {
        let command: ViewerCommand = serde_json::from_value(json!({
            "type": "set-spaced-annotation-span",
            "spacedAnnotationSpan": {"a1": {"begin": 5, "end": 9}},
            "spacedText": "padded text"
        }))
        .unwrap();

        match command {
            ViewerCommand::SetSpacedAnnotationSpan { spaced_annotation_span, spaced_text } => {
                assert_eq!(spaced_annotation_span["a1"], Span::new(5, 9));
                assert_eq!(spaced_text, "padded text");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_name_matches_tag() {
        let command = ViewerCommand::StartCreateLink { from_entry_id: "a".to_string() };
        let value = serde_json::to_value(&command).unwrap();
        assert_eq!(value["type"], command.name());
        assert_eq!(value["fromEntryId"], "a");
    }
}
