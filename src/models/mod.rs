//! Geometry models for overlay positioning
//!
//! Value types that describe the measured world (trigger and overlay boxes,
//! the viewport) and the answer the positioner gives back.

pub mod geometry;
pub mod side;

// Re-export commonly used types
pub use geometry::*;
pub use side::*;
