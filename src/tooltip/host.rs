//! The seam between the trigger state machine and its environment

use crate::models::{PositionResult, Rect, Viewport};

/// Everything the tooltip machine needs from its environment.
///
/// Measurements return `None` when the element is not mounted yet; the machine
/// then skips that positioning pass instead of failing.
pub trait TooltipHost {
    fn measure_trigger(&self) -> Option<Rect>;

    fn measure_overlay(&self) -> Option<Rect>;

    fn viewport(&self) -> Option<Viewport>;

    /// Arm the single delay timer. When it fires the host must call
    /// `TooltipMachine::timer_elapsed`.
    fn start_timer(&mut self, delay_ms: u32);

    fn cancel_timer(&mut self);

    /// Start delivering scroll, resize and content-size notifications
    /// (plus outside pointer-down and Escape) to the machine.
    fn subscribe(&mut self);

    fn unsubscribe(&mut self);

    fn open_changed(&mut self, _open: bool) {}

    fn position_changed(&mut self, _position: &PositionResult) {}
}
