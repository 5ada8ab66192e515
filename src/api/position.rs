//! Stateless positioning binding

use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, serialize};
use crate::models::{Rect, Side, Viewport};
use crate::positioning::compute_position;

/// Compute where to place an overlay next to a trigger.
///
/// `trigger` and `overlay` are plain `{top, left, width, height}` objects,
/// `viewport` is `{width, height, scrollX, scrollY}`.
/// Returns `{top, left, side}`.
#[wasm_bindgen(js_name = computePosition)]
pub fn compute_position_js(
    trigger: JsValue,
    overlay: JsValue,
    side: &str,
    viewport: JsValue,
    margin: f64,
    padding: f64,
) -> Result<JsValue, JsValue> {
    let trigger: Rect = deserialize(trigger, "trigger rect")?;
    let overlay: Rect = deserialize(overlay, "overlay rect")?;
    let viewport: Viewport = deserialize(viewport, "viewport")?;
    let side: Side = side.parse()?;

    let result = compute_position(&trigger, &overlay, side, &viewport, margin, padding);
    if result.side != side {
        log::debug!("overlay flipped from {} to {}", side, result.side);
    }

    Ok(serialize(&result, "position result")?)
}
