//! Overlay Positioner WASM Module
//!
//! Places floating overlays (tooltips) next to their trigger element, flipping
//! to the opposite side when the requested one would overflow the viewport.
//! Also provides the trigger state machine that opens, positions and closes
//! an overlay in response to user interaction.

pub mod api;
pub mod dom;
pub mod error;
pub mod models;
pub mod positioning;
pub mod tooltip;

// Re-export commonly used types
pub use error::TooltipError;
pub use models::*;
pub use positioning::{compute_position, compute_position_with, Fits, PositionOptions};
pub use tooltip::{TooltipConfig, TooltipMachine, TooltipState, TriggerMode};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Fails only if a logger is already installed
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Overlay positioner WASM module initialized");
}
