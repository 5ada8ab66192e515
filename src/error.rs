//! Error types for the overlay positioner
//!
//! The positioning math itself never fails. These errors come from the
//! boundary: malformed input from JavaScript and DOM calls that throw.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TooltipError {
    /// Side name not one of top/bottom/left/right
    #[error("Invalid side: '{0}' (expected top, bottom, left or right)")]
    InvalidSide(String),

    /// Trigger mode name not one of hover/focus/click
    #[error("Invalid trigger mode: '{0}' (expected hover, focus or click)")]
    InvalidTrigger(String),

    /// Value coming from JavaScript did not have the expected shape
    #[error("Failed to deserialize {context}: {message}")]
    Deserialize { context: String, message: String },

    /// Value could not be handed back to JavaScript
    #[error("Failed to serialize {context}: {message}")]
    Serialize { context: String, message: String },

    /// Running outside a browser window
    #[error("No global window available")]
    NoWindow,

    /// A DOM API threw
    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl TooltipError {
    /// Wrap a thrown JS value, keeping its string form when it has one
    pub fn dom(value: JsValue) -> Self {
        TooltipError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<TooltipError> for JsValue {
    fn from(err: TooltipError) -> Self {
        log::error!("{}", err);
        JsValue::from_str(&err.to_string())
    }
}
