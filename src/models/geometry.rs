//! Rectangles, viewport state and positioning results
//!
//! All values are snapshots taken at measurement time. Nothing here is cached
//! across positioning passes.

use serde::{Deserialize, Serialize};
use crate::models::side::Side;

/// Where a host parks an open overlay that has not been positioned yet
pub const OFFSCREEN_COORD: f64 = -9999.0;

/// Axis-aligned box in viewport-relative coordinates
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self { top, left, width, height }
    }

    /// A box with only a size, used for overlays measured before placement
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Horizontal midpoint
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Vertical midpoint
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Scrollable window state at measurement time
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub scroll_x: f64,
    #[serde(default)]
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, scroll_x: 0.0, scroll_y: 0.0 }
    }

    pub fn with_scroll(mut self, scroll_x: f64, scroll_y: f64) -> Self {
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self
    }
}

/// Final document-relative placement of the overlay's top-left corner
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PositionResult {
    pub top: f64,
    pub left: f64,
    /// Side actually used; differs from the requested one after a flip
    pub side: Side,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_derived_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 30.0);
        assert_eq!(rect.right(), 120.0);
        assert_eq!(rect.bottom(), 40.0);
        assert_eq!(rect.center_x(), 70.0);
        assert_eq!(rect.center_y(), 25.0);
    }

    #[test]
    fn test_viewport_scroll_defaults_to_zero() {
        let viewport: Viewport = serde_json::from_str(r#"{"width":800,"height":600}"#).unwrap();
        assert_eq!(viewport, Viewport::new(800.0, 600.0));
    }

    #[test]
    fn test_viewport_camel_case_fields() {
        let viewport = Viewport::new(800.0, 600.0).with_scroll(5.0, 120.0);
        let json = serde_json::to_value(viewport).unwrap();
        assert_eq!(json["scrollX"], 5.0);
        assert_eq!(json["scrollY"], 120.0);
    }

    #[test]
    fn test_position_result_serializes_side_lowercase() {
        let result = PositionResult { top: 48.0, left: 35.0, side: Side::Bottom };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"top":48.0,"left":35.0,"side":"bottom"}"#);
    }
}
