//! Viewer state store
//!
//! The single owner of mutable viewer state: legend selection, collapsed
//! lines, the cached spacing result and the link-creation interaction. The
//! layout engine never sees this struct, only an immutable `ViewerSnapshot`.

use super::commands::ViewerCommand;
use crate::layout::collapse::CollapsedLines;
use crate::models::{Position, TextPack};
use crate::text::SpacedAnnotationSpan;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Link-creation interaction state
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinkEditState {
    pub from_entry_id: Option<String>,
    pub is_creating: bool,
    pub move_position: Option<Position>,
}

/// Complete viewer state
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewerState {
    pub selected_legend_ids: BTreeSet<String>,
    pub selected_legend_attribute_ids: BTreeSet<String>,

    /// False until the current inputs have been spaced
    pub spacing_calculated: bool,
    pub spaced_annotation_span: SpacedAnnotationSpan,
    pub spaced_text: Option<String>,

    pub collapsed_line_indexes: CollapsedLines,
    pub link_edit: LinkEditState,
}

/// Immutable inputs for one layout pass
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewerSnapshot {
    pub selected_legend_ids: BTreeSet<String>,
    pub selected_legend_attribute_ids: BTreeSet<String>,
    pub collapsed: CollapsedLines,
    pub link_edit: LinkEditState,
}

impl ViewerState {
    /// State for a freshly loaded document, with every legend selected
    pub fn for_text_pack(pack: &TextPack) -> Self {
        let selected_legend_ids = pack
            .legends
            .annotations
            .iter()
            .chain(pack.legends.links.iter())
            .map(|legend| legend.id.clone())
            .collect();

        Self {
            selected_legend_ids,
            ..Self::default()
        }
    }

    /// Apply a command, returning true if the state changed
    pub fn dispatch(&mut self, command: ViewerCommand) -> bool {
        log::debug!("dispatch {}", command.name());

        match command {
            ViewerCommand::CollapseLine { line_index } => {
                let changed = self.collapsed_line_indexes.collapse(line_index);
                self.invalidate_if(changed)
            }
            ViewerCommand::UncollapseLine { line_index } => {
                let changed = self.collapsed_line_indexes.uncollapse(line_index);
                self.invalidate_if(changed)
            }
            ViewerCommand::SetSpacedAnnotationSpan {
                spaced_annotation_span,
                spaced_text,
            } => {
                self.spaced_annotation_span = spaced_annotation_span;
                self.spaced_text = Some(spaced_text);
                self.spacing_calculated = true;
                true
            }
            ViewerCommand::ResetCalculatedTextSpace => {
                let changed = self.spacing_calculated;
                self.spacing_calculated = false;
                changed
            }
            ViewerCommand::SelectLegend { legend_id } => {
                let changed = self.selected_legend_ids.insert(legend_id);
                self.invalidate_if(changed)
            }
            ViewerCommand::DeselectLegend { legend_id } => {
                let changed = self.selected_legend_ids.remove(&legend_id);
                self.invalidate_if(changed)
            }
            ViewerCommand::SelectLegendAttribute { attribute_id } => {
                let changed = self.selected_legend_attribute_ids.insert(attribute_id);
                self.invalidate_if(changed)
            }
            ViewerCommand::DeselectLegendAttribute { attribute_id } => {
                let changed = self.selected_legend_attribute_ids.remove(&attribute_id);
                self.invalidate_if(changed)
            }
            ViewerCommand::StartCreateLink { from_entry_id } => {
                self.link_edit = LinkEditState {
                    from_entry_id: Some(from_entry_id),
                    is_creating: true,
                    move_position: None,
                };
                true
            }
            ViewerCommand::UpdateMovePos { pos } => {
                if !self.link_edit.is_creating {
                    return false;
                }
                self.link_edit.move_position = Some(pos);
                true
            }
            ViewerCommand::EndCreateLink => {
                let changed = self.link_edit.is_creating;
                self.link_edit = LinkEditState::default();
                changed
            }
        }
    }

    fn invalidate_if(&mut self, changed: bool) -> bool {
        if changed {
            self.spacing_calculated = false;
        }
        changed
    }

    pub fn snapshot(&self) -> ViewerSnapshot {
        ViewerSnapshot {
            selected_legend_ids: self.selected_legend_ids.clone(),
            selected_legend_attribute_ids: self.selected_legend_attribute_ids.clone(),
            collapsed: self.collapsed_line_indexes.clone(),
            link_edit: self.link_edit.clone(),
        }
    }
}
