//! Overlay positioner WASM API
//!
//! JavaScript-facing surface of the crate.
//!
//! # Module Structure
//!
//! - `helpers`: serialization and error plumbing shared by the bindings
//! - `position`: the stateless `computePosition` binding
//! - `controller`: `TooltipController`, a DOM-backed trigger state machine

pub mod helpers;
pub mod position;
pub mod controller;

pub use position::compute_position_js;
pub use controller::TooltipController;
