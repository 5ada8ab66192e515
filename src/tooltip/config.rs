//! Tooltip configuration
//!
//! Deserialized from a plain JS object; every field is optional.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::error::TooltipError;
use crate::models::Side;
use crate::positioning::{PositionOptions, DEFAULT_MARGIN_PX, DEFAULT_VIEWPORT_PADDING_PX};

/// Delay between an opening interaction and the tooltip appearing
pub const DEFAULT_DELAY_MS: u32 = 500;

/// Which interactions open and close the tooltip
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    /// Pointer enter / focus open, pointer leave / blur close
    #[default]
    Hover,
    /// Focus opens, blur closes
    Focus,
    /// Click (or Enter / Space) toggles, pointer-down outside closes
    Click,
}

impl TriggerMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerMode::Hover => "hover",
            TriggerMode::Focus => "focus",
            TriggerMode::Click => "click",
        }
    }
}

impl fmt::Display for TriggerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TriggerMode {
    type Err = TooltipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hover" => Ok(TriggerMode::Hover),
            "focus" => Ok(TriggerMode::Focus),
            "click" => Ok(TriggerMode::Click),
            other => Err(TooltipError::InvalidTrigger(other.to_string())),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TooltipConfig {
    /// Requested side; the positioner may flip it
    pub placement: Side,
    pub trigger: TriggerMode,
    pub delay_ms: u32,
    /// While set the tooltip never leaves `Closed`
    pub disabled: bool,
    pub margin: f64,
    pub padding: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            placement: Side::Top,
            trigger: TriggerMode::Hover,
            delay_ms: DEFAULT_DELAY_MS,
            disabled: false,
            margin: DEFAULT_MARGIN_PX,
            padding: DEFAULT_VIEWPORT_PADDING_PX,
        }
    }
}

impl TooltipConfig {
    pub fn position_options(&self) -> PositionOptions {
        PositionOptions {
            margin: self.margin,
            padding: self.padding,
        }
    }

    /// True when a change from `self` to `other` moves an open overlay
    pub fn affects_position(&self, other: &TooltipConfig) -> bool {
        self.placement != other.placement
            || self.margin != other.margin
            || self.padding != other.padding
    }
}
