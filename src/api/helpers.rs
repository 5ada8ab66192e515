//! Shared helpers for WASM API operations

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::TooltipError;

/// Deserialize a value from JavaScript, tagging failures with `context`
pub fn deserialize<T: DeserializeOwned>(value: JsValue, context: &str) -> Result<T, TooltipError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| TooltipError::Deserialize {
        context: context.to_string(),
        message: e.to_string(),
    })
}

/// Like [`deserialize`], but `undefined`/`null` give `T::default()`
pub fn deserialize_or_default<T: DeserializeOwned + Default>(
    value: JsValue,
    context: &str,
) -> Result<T, TooltipError> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    deserialize(value, context)
}

/// Serialize a value for JavaScript, tagging failures with `context`.
/// `Option::None` becomes `null` rather than `undefined`.
pub fn serialize<T: Serialize>(value: &T, context: &str) -> Result<JsValue, TooltipError> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_missing_as_null(true);
    value.serialize(&serializer).map_err(|e| TooltipError::Serialize {
        context: context.to_string(),
        message: e.to_string(),
    })
}
