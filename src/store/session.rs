//! Viewer session
//!
//! Ties one loaded document to its state store and layout engine, and
//! consumes the two external event streams:
//!
//! - window resize, throttled before it resets the spacing
//! - pointer movement during link creation, sampled once per frame
//!
//! The pointer sampler only exists while link creation is active. It is
//! created by `start-create-link` and dropped by `end-create-link`, so moves
//! outside that mode have nowhere to go.

use super::commands::ViewerCommand;
use super::state::ViewerState;
use crate::layout::{DisplayList, GeometryResolver, LayoutConfig, LayoutEngine, MeasureRequest};
use crate::models::{Position, TextPack};
use crate::text::SpacedAnnotationSpan;
use crate::utils::{FrameSampler, Throttle};
use serde::{Deserialize, Serialize};

/// Spacing result plus the spans JavaScript must measure
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpacedView {
    pub spaced_text: String,
    pub spaced_annotation_span: SpacedAnnotationSpan,
    pub measurements: Vec<MeasureRequest>,
}

pub struct ViewerSession {
    pack: TextPack,
    state: ViewerState,
    engine: LayoutEngine,
    resize: Throttle,
    pointer: Option<FrameSampler<Position>>,
}

impl ViewerSession {
    pub fn new(pack: TextPack, config: LayoutConfig) -> Self {
        let state = ViewerState::for_text_pack(&pack);
        let resize = Throttle::new(config.resize_throttle_ms);

        Self {
            pack,
            state,
            engine: LayoutEngine::new(config),
            resize,
            pointer: None,
        }
    }

    pub fn pack(&self) -> &TextPack {
        &self.pack
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn is_creating_link(&self) -> bool {
        self.pointer.is_some()
    }

    /// Apply a command to the store, returning true if state changed
    pub fn dispatch(&mut self, command: ViewerCommand) -> bool {
        match &command {
            ViewerCommand::StartCreateLink { .. } => self.pointer = Some(FrameSampler::new()),
            ViewerCommand::EndCreateLink => self.pointer = None,
            _ => {}
        }
        self.state.dispatch(command)
    }

    /// Spaced text for the current state, recomputed if the store says so
    pub fn spaced_text(&mut self) -> SpacedView {
        let snapshot = self.state.snapshot();

        if !self.state.spacing_calculated {
            self.engine.invalidate();
            let spaced = self.engine.space_out(&self.pack, &snapshot).clone();
            self.dispatch(ViewerCommand::SetSpacedAnnotationSpan {
                spaced_annotation_span: spaced.annotation_span_map,
                spaced_text: spaced.text,
            });
        }

        SpacedView {
            spaced_text: self.state.spaced_text.clone().unwrap_or_default(),
            spaced_annotation_span: self.state.spaced_annotation_span.clone(),
            measurements: self.engine.measurement_requests(&self.pack, &snapshot),
        }
    }

    /// Lay out the document against geometry measured from the spaced text
    pub fn compute_layout<R: GeometryResolver + ?Sized>(&mut self, resolver: &R) -> DisplayList {
        if !self.state.spacing_calculated {
            self.spaced_text();
        }
        let snapshot = self.state.snapshot();
        self.engine.compute_layout(&self.pack, &snapshot, resolver)
    }

    /// Window resized at `now_ms`; returns true if spacing was reset
    pub fn notify_resize(&mut self, now_ms: f64) -> bool {
        if self.resize.call(now_ms) {
            self.dispatch(ViewerCommand::ResetCalculatedTextSpace);
            true
        } else {
            false
        }
    }

    /// Run a throttled trailing resize, if one is due
    pub fn poll_resize(&mut self, now_ms: f64) -> bool {
        if self.resize.poll(now_ms) {
            self.dispatch(ViewerCommand::ResetCalculatedTextSpace);
            true
        } else {
            false
        }
    }

    /// Record a pointer position; ignored unless a link is being created
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if let Some(sampler) = self.pointer.as_mut() {
            sampler.sample(Position { x, y });
        }
    }

    /// Flush this frame's pointer sample, returning true if one was applied
    pub fn animation_frame(&mut self) -> bool {
        match self.pointer.as_mut().and_then(FrameSampler::take) {
            Some(pos) => self.dispatch(ViewerCommand::UpdateMovePos { pos }),
            None => false,
        }
    }
}
