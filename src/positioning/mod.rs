//! Overlay positioning
//!
//! Computes where a floating overlay (tooltip body) should be drawn so that it
//! sits next to its trigger, flips to the opposite side when the requested one
//! would overflow the viewport, and stays `padding` away from viewport edges.
//!
//! The flip is single-hop: only the direct opposite of the requested side is
//! ever tried. When neither fits the requested side is kept and clamping does
//! the rest.

use serde::{Deserialize, Serialize};
use crate::models::{PositionResult, Rect, Side, Viewport};

/// Default gap between trigger edge and overlay edge, in px
pub const DEFAULT_MARGIN_PX: f64 = 8.0;

/// Default minimum distance between overlay and viewport edges, in px
pub const DEFAULT_VIEWPORT_PADDING_PX: f64 = 8.0;

/// Spacing parameters for a positioning pass
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct PositionOptions {
    pub margin: f64,
    pub padding: f64,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN_PX,
            padding: DEFAULT_VIEWPORT_PADDING_PX,
        }
    }
}

/// Which sides have room for the overlay without crossing the viewport edge
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fits {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Fits {
    pub fn compute(trigger: &Rect, overlay: &Rect, viewport: &Viewport, margin: f64) -> Self {
        Self {
            top: trigger.top - margin - overlay.height >= 0.0,
            bottom: viewport.height - (trigger.bottom() + margin + overlay.height) >= 0.0,
            left: trigger.left - margin - overlay.width >= 0.0,
            right: viewport.width - (trigger.right() + margin + overlay.width) >= 0.0,
        }
    }

    pub fn for_side(&self, side: Side) -> bool {
        match side {
            Side::Top => self.top,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Requested side, or its opposite when only the opposite has room
    pub fn resolve(&self, requested: Side) -> Side {
        let opposite = requested.opposite();
        if !self.for_side(requested) && self.for_side(opposite) {
            opposite
        } else {
            requested
        }
    }
}

/// Compute the overlay's document-relative top-left corner
pub fn compute_position(
    trigger: &Rect,
    overlay: &Rect,
    requested_side: Side,
    viewport: &Viewport,
    margin: f64,
    padding: f64,
) -> PositionResult {
    let side = Fits::compute(trigger, overlay, viewport, margin).resolve(requested_side);

    let (top, left) = raw_coordinates(trigger, overlay, side, viewport, margin);

    let left = clamp_axis(left, viewport.scroll_x, viewport.width, overlay.width, padding);
    let top = clamp_axis(top, viewport.scroll_y, viewport.height, overlay.height, padding);

    PositionResult { top, left, side }
}

/// Same as [`compute_position`] with margin and padding taken from `options`
pub fn compute_position_with(
    trigger: &Rect,
    overlay: &Rect,
    requested_side: Side,
    viewport: &Viewport,
    options: &PositionOptions,
) -> PositionResult {
    compute_position(trigger, overlay, requested_side, viewport, options.margin, options.padding)
}

/// Unclamped (top, left) for an already-resolved side, centred on the cross axis
fn raw_coordinates(
    trigger: &Rect,
    overlay: &Rect,
    side: Side,
    viewport: &Viewport,
    margin: f64,
) -> (f64, f64) {
    let centered_left = viewport.scroll_x + trigger.center_x() - overlay.width / 2.0;
    let centered_top = viewport.scroll_y + trigger.center_y() - overlay.height / 2.0;

    match side {
        Side::Top => (viewport.scroll_y + trigger.top - overlay.height - margin, centered_left),
        Side::Bottom => (viewport.scroll_y + trigger.bottom() + margin, centered_left),
        Side::Left => (centered_top, viewport.scroll_x + trigger.left - overlay.width - margin),
        Side::Right => (centered_top, viewport.scroll_x + trigger.right() + margin),
    }
}

/// Keep one coordinate inside `[scroll + padding, scroll + extent - size - padding]`.
///
/// An overlay bigger than the viewport makes the range empty; the lower bound
/// wins and the far edge overflows.
fn clamp_axis(value: f64, scroll: f64, extent: f64, size: f64, padding: f64) -> f64 {
    let min = padding + scroll;
    let max = scroll + extent - size - padding;
    value.min(max).max(min)
}
