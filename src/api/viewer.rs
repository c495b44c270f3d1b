//! Text viewer WASM API
//!
//! One document is loaded at a time and lives in a WASM-owned session.
//! A layout pass from JavaScript looks like:
//!
//! 1. `getSpacedText()` and render `spacedText` into the text element
//! 2. after paint, `computeLayoutFromDom(textArea, textNode)` (or measure the
//!    returned `measurements` in JS and call `computeLayout(geometry)`)
//! 3. draw the returned display list
//!
//! State changes go through `dispatch`; after one that returns `true`, run
//! another pass.

use super::dom::DomGeometryResolver;
use super::helpers::{deserialize, deserialize_or_default, serialize};
use crate::error::ViewerError;
use crate::layout::{CollapsedLines, LayoutConfig, MeasuredGeometry};
use crate::models::{Annotation, Span, TextPack};
use crate::store::{ViewerCommand, ViewerSession};
use crate::text::{space_out_text, HardLines};
use crate::{wasm_info, wasm_log};
use lazy_static::lazy_static;
use std::collections::BTreeSet;
use std::sync::Mutex;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

// WASM-owned session (canonical source of truth)
lazy_static! {
    static ref VIEWER: Mutex<Option<ViewerSession>> = Mutex::new(None);
}

fn with_session<T>(f: impl FnOnce(&mut ViewerSession) -> Result<T, ViewerError>) -> Result<T, ViewerError> {
    let mut guard = VIEWER.lock().map_err(|_| ViewerError::LockPoisoned)?;
    let session = guard.as_mut().ok_or(ViewerError::NoDocument)?;
    f(session)
}

/// Timestamp from JS, or `performance.now()` when omitted
fn now_ms(explicit: Option<f64>) -> f64 {
    explicit
        .or_else(|| web_sys::window().and_then(|w| w.performance()).map(|p| p.now()))
        .unwrap_or(0.0)
}

/// Load a text pack, replacing any current session
///
/// # Parameters
/// - `pack_js`: `{text, annotations, links, legends}`
/// - `config_js`: optional `LayoutConfig` object
#[wasm_bindgen(js_name = loadTextPack)]
pub fn load_text_pack(pack_js: JsValue, config_js: JsValue) -> Result<(), JsValue> {
    let pack: TextPack = deserialize(pack_js, "Failed to deserialize text pack")?;
    let config: LayoutConfig = deserialize_or_default(config_js, "Failed to deserialize layout config")?;

    wasm_info!(
        "loadTextPack: {} chars, {} annotations, {} links",
        pack.text.chars().count(),
        pack.annotations.len(),
        pack.links.len()
    );

    let mut guard = VIEWER.lock().map_err(|_| ViewerError::LockPoisoned)?;
    *guard = Some(ViewerSession::new(pack, config));
    Ok(())
}

/// Apply a command such as `{type: "collapse-line", lineIndex: 2}`
///
/// Returns true if the viewer state changed.
#[wasm_bindgen]
pub fn dispatch(command_js: JsValue) -> Result<bool, JsValue> {
    let command: ViewerCommand = deserialize(command_js, "Failed to deserialize command")?;
    wasm_log!("dispatch: {}", command.name());
    Ok(with_session(|session| Ok(session.dispatch(command)))?)
}

#[wasm_bindgen(js_name = getViewerState)]
pub fn get_viewer_state() -> Result<JsValue, JsValue> {
    Ok(with_session(|session| serialize(session.state(), "Failed to serialize viewer state"))?)
}

/// Spaced text, span map and the spans to measure
#[wasm_bindgen(js_name = getSpacedText)]
pub fn get_spaced_text() -> Result<JsValue, JsValue> {
    Ok(with_session(|session| serialize(&session.spaced_text(), "Failed to serialize spaced text"))?)
}

/// Lay out against geometry measured in JavaScript
#[wasm_bindgen(js_name = computeLayout)]
pub fn compute_layout(geometry_js: JsValue) -> Result<JsValue, JsValue> {
    let geometry: MeasuredGeometry = deserialize(geometry_js, "Failed to deserialize measured geometry")?;
    Ok(with_session(|session| {
        let display = session.compute_layout(&geometry);
        serialize(&display, "Failed to serialize display list")
    })?)
}

/// Lay out by measuring the rendered text with DOM ranges
///
/// `text_node` must already contain the current spaced text.
#[wasm_bindgen(js_name = computeLayoutFromDom)]
pub fn compute_layout_from_dom(text_area: &HtmlElement, text_node: &HtmlElement) -> Result<JsValue, JsValue> {
    Ok(with_session(|session| {
        let spaced = session.spaced_text();
        let resolver = DomGeometryResolver::new(text_area, text_node, &spaced.spaced_text)?;
        let display = session.compute_layout(&resolver);
        serialize(&display, "Failed to serialize display list")
    })?)
}

/// Window resize; returns true if spacing was reset and a pass is due
#[wasm_bindgen(js_name = notifyResize)]
pub fn notify_resize(now: Option<f64>) -> Result<bool, JsValue> {
    let now = now_ms(now);
    Ok(with_session(|session| Ok(session.notify_resize(now)))?)
}

/// Release a throttled trailing resize; returns true if it fired
#[wasm_bindgen(js_name = pollResize)]
pub fn poll_resize(now: Option<f64>) -> Result<bool, JsValue> {
    let now = now_ms(now);
    Ok(with_session(|session| Ok(session.poll_resize(now)))?)
}

/// Pointer moved; sampled until the next `animationFrame`
#[wasm_bindgen(js_name = pointerMove)]
pub fn pointer_move(x: f32, y: f32) -> Result<(), JsValue> {
    Ok(with_session(|session| {
        session.pointer_move(x, y);
        Ok(())
    })?)
}

/// Apply this frame's pointer sample; returns true if one was applied
#[wasm_bindgen(js_name = animationFrame)]
pub fn animation_frame() -> Result<bool, JsValue> {
    Ok(with_session(|session| Ok(session.animation_frame()))?)
}

/// Pure spacing pass, independent of any loaded session
#[wasm_bindgen(js_name = spaceOutText)]
pub fn space_out_text_js(
    text: &str,
    annotations_js: JsValue,
    selected_legend_ids_js: JsValue,
    selected_legend_attribute_ids_js: JsValue,
    collapsed_line_indexes_js: JsValue,
) -> Result<JsValue, JsValue> {
    let annotations: Vec<Annotation> = deserialize(annotations_js, "Failed to deserialize annotations")?;
    let selected_legend_ids: BTreeSet<String> =
        deserialize(selected_legend_ids_js, "Failed to deserialize selected legend ids")?;
    let selected_legend_attribute_ids: BTreeSet<String> = deserialize_or_default(
        selected_legend_attribute_ids_js,
        "Failed to deserialize selected legend attribute ids",
    )?;
    let collapsed: CollapsedLines =
        deserialize_or_default(collapsed_line_indexes_js, "Failed to deserialize collapsed lines")?;
    // Unmeasured text has no soft wraps, so indexes name hard lines
    let chars: Vec<char> = text.chars().collect();
    let lines: Vec<Span> = HardLines::split(&chars).iter().collect();
    let collapsed_ranges: Vec<Span> = collapsed.iter().filter_map(|index| lines.get(index).copied()).collect();

    let spaced = space_out_text(
        text,
        &annotations,
        &selected_legend_ids,
        &selected_legend_attribute_ids,
        &collapsed_ranges,
        &LayoutConfig::default().spacing_options(),
    );
    Ok(serialize(&spaced, "Failed to serialize spaced text")?)
}
