//! Tooltip trigger state machine
//!
//! Owns the open/closed state of one overlay, the single delay timer and the
//! notification subscriptions that keep an open overlay positioned.

use serde::{Deserialize, Serialize};
use crate::models::PositionResult;
use crate::positioning::compute_position_with;
use crate::tooltip::config::{TooltipConfig, TriggerMode};
use crate::tooltip::host::TooltipHost;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TooltipState {
    #[default]
    Closed,
    /// Delay timer running
    Pending,
    Open,
}

impl TooltipState {
    pub fn as_str(self) -> &'static str {
        match self {
            TooltipState::Closed => "closed",
            TooltipState::Pending => "pending",
            TooltipState::Open => "open",
        }
    }
}

/// Keys the machine reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Key {
        match key {
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            _ => Key::Other,
        }
    }
}

/// A user interaction reported by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interaction {
    PointerEnter,
    PointerLeave,
    Focus,
    Blur,
    Click,
    KeyDown(Key),
    /// Pointer pressed outside both trigger and overlay
    OutsidePointerDown,
}

/// What the host renders from
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TooltipSnapshot {
    pub state: TooltipState,
    pub open: bool,
    pub position: Option<PositionResult>,
}

#[derive(Debug, Default)]
pub struct TooltipMachine {
    config: TooltipConfig,
    state: TooltipState,
    position: Option<PositionResult>,
    timer_armed: bool,
    subscribed: bool,
}

impl TooltipMachine {
    pub fn new(config: TooltipConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    pub fn state(&self) -> TooltipState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == TooltipState::Open
    }

    /// Last successful placement; `None` while closed or before the first pass
    pub fn position(&self) -> Option<PositionResult> {
        self.position
    }

    pub fn snapshot(&self) -> TooltipSnapshot {
        TooltipSnapshot {
            state: self.state,
            open: self.is_open(),
            position: self.position,
        }
    }

    /// Feed one interaction through the rules of the configured trigger mode
    pub fn handle<H: TooltipHost>(&mut self, interaction: Interaction, host: &mut H) {
        if interaction == Interaction::KeyDown(Key::Escape) {
            self.close(host);
            return;
        }

        match (self.config.trigger, interaction) {
            (TriggerMode::Hover, Interaction::PointerEnter | Interaction::Focus) => self.request_open(host),
            (TriggerMode::Hover, Interaction::PointerLeave | Interaction::Blur) => self.close(host),

            (TriggerMode::Focus, Interaction::Focus) => self.request_open(host),
            (TriggerMode::Focus, Interaction::Blur) => self.close(host),

            (TriggerMode::Click, Interaction::Click)
            | (TriggerMode::Click, Interaction::KeyDown(Key::Enter | Key::Space)) => self.toggle(host),
            (TriggerMode::Click, Interaction::OutsidePointerDown) => self.close(host),

            _ => {}
        }
    }

    /// Delay timer fired. Stale firings (no longer pending) are ignored.
    pub fn timer_elapsed<H: TooltipHost>(&mut self, host: &mut H) {
        if self.state != TooltipState::Pending {
            return;
        }
        self.timer_armed = false;
        self.state = TooltipState::Open;
        log::debug!("tooltip open");
        host.open_changed(true);

        host.subscribe();
        self.subscribed = true;

        self.reposition(host);
    }

    /// Measure and place the overlay. Only runs while open; a missing
    /// measurement skips the pass and keeps the previous result.
    pub fn reposition<H: TooltipHost>(&mut self, host: &mut H) -> Option<PositionResult> {
        if !self.is_open() {
            return None;
        }

        let (Some(trigger), Some(overlay), Some(viewport)) =
            (host.measure_trigger(), host.measure_overlay(), host.viewport())
        else {
            log::debug!("tooltip measurements unavailable, skipping positioning pass");
            return self.position;
        };

        let position = compute_position_with(
            &trigger,
            &overlay,
            self.config.placement,
            &viewport,
            &self.config.position_options(),
        );

        if self.position != Some(position) {
            self.position = Some(position);
            host.position_changed(&position);
        }
        Some(position)
    }

    /// Replace the configuration. Disabling closes; moving the placement of
    /// an open overlay re-runs the positioner.
    pub fn set_config<H: TooltipHost>(&mut self, config: TooltipConfig, host: &mut H) {
        let previous = std::mem::replace(&mut self.config, config);

        if config.disabled {
            self.close(host);
        } else if previous.affects_position(&config) {
            self.reposition(host);
        }
    }

    /// Release the timer and every subscription. Used when the trigger unmounts.
    pub fn destroy<H: TooltipHost>(&mut self, host: &mut H) {
        self.close(host);
        self.release(host);
    }

    fn request_open<H: TooltipHost>(&mut self, host: &mut H) {
        if self.config.disabled {
            return;
        }

        match self.state {
            TooltipState::Open => {}
            TooltipState::Pending | TooltipState::Closed => {
                if self.timer_armed {
                    host.cancel_timer();
                }
                host.start_timer(self.config.delay_ms);
                self.timer_armed = true;
                self.state = TooltipState::Pending;
                log::debug!("tooltip pending ({} ms)", self.config.delay_ms);
            }
        }
    }

    fn toggle<H: TooltipHost>(&mut self, host: &mut H) {
        match self.state {
            TooltipState::Closed => self.request_open(host),
            TooltipState::Pending | TooltipState::Open => self.close(host),
        }
    }

    fn close<H: TooltipHost>(&mut self, host: &mut H) {
        if self.state == TooltipState::Closed {
            return;
        }
        let was_open = self.is_open();

        self.release(host);
        self.state = TooltipState::Closed;
        self.position = None;

        if was_open {
            log::debug!("tooltip closed");
            host.open_changed(false);
        }
    }

    fn release<H: TooltipHost>(&mut self, host: &mut H) {
        if self.timer_armed {
            host.cancel_timer();
            self.timer_armed = false;
        }
        if self.subscribed {
            host.unsubscribe();
            self.subscribed = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Rect, Side};
    use crate::tooltip::host::recording::RecordingHost;

    fn open_hover(host: &mut RecordingHost) -> TooltipMachine {
        let mut machine = TooltipMachine::new(TooltipConfig::default());
        machine.handle(Interaction::PointerEnter, host);
        machine.timer_elapsed(host);
        machine
    }

    #[test]
    fn test_hover_goes_pending_then_open() {
        let mut host = RecordingHost::mounted();
        let mut machine = TooltipMachine::new(TooltipConfig::default());

        machine.handle(Interaction::PointerEnter, &mut host);
        assert_eq!(machine.state(), TooltipState::Pending);
        assert_eq!(host.timers_started, vec![500]);
        assert!(host.open_events.is_empty());

        machine.timer_elapsed(&mut host);
        assert_eq!(machine.state(), TooltipState::Open);
        assert_eq!(host.open_events, vec![true]);
        assert_eq!(host.subscriptions, 1);
        assert_eq!(machine.position().map(|p| p.side), Some(Side::Top));
        assert_eq!(host.positions.len(), 1);
    }

    #[test]
    fn test_leave_while_pending_cancels_timer_without_opening() {
        let mut host = RecordingHost::mounted();
        let mut machine = TooltipMachine::new(TooltipConfig::default());

        machine.handle(Interaction::PointerEnter, &mut host);
        machine.handle(Interaction::PointerLeave, &mut host);

        assert_eq!(machine.state(), TooltipState::Closed);
        assert_eq!(host.armed_timers(), 0);
        assert!(host.open_events.is_empty());

        // A late firing of the cancelled timer is ignored
        machine.timer_elapsed(&mut host);
        assert_eq!(machine.state(), TooltipState::Closed);
        assert_eq!(host.subscriptions, 0);
    }

    #[test]
    fn test_repeated_enter_keeps_single_pending_timer() {
        let mut host = RecordingHost::mounted();
        let mut machine = TooltipMachine::new(TooltipConfig::default());

        machine.handle(Interaction::PointerEnter, &mut host);
        machine.handle(Interaction::Focus, &mut host);
        machine.handle(Interaction::PointerEnter, &mut host);

        assert_eq!(host.timers_started.len(), 3);
        assert_eq!(host.armed_timers(), 1);
        assert_eq!(machine.state(), TooltipState::Pending);
    }

    #[test]
    fn test_close_releases_subscriptions() {
        let mut host = RecordingHost::mounted();
        let mut machine = open_hover(&mut host);

        machine.handle(Interaction::Blur, &mut host);

        assert_eq!(machine.state(), TooltipState::Closed);
        assert_eq!(host.subscriptions, 0);
        assert_eq!(host.open_events, vec![true, false]);
        assert_eq!(machine.position(), None);
    }

    #[test]
    fn test_escape_closes_in_every_mode() {
        for trigger in [TriggerMode::Hover, TriggerMode::Focus, TriggerMode::Click] {
            let mut host = RecordingHost::mounted();
            let config = TooltipConfig { trigger, delay_ms: 0, ..TooltipConfig::default() };
            let mut machine = TooltipMachine::new(config);

            let opener = match trigger {
                TriggerMode::Click => Interaction::Click,
                _ => Interaction::Focus,
            };
            machine.handle(opener, &mut host);
            machine.timer_elapsed(&mut host);
            assert!(machine.is_open(), "{} should open", trigger);

            machine.handle(Interaction::KeyDown(Key::Escape), &mut host);
            assert_eq!(machine.state(), TooltipState::Closed, "{} should close on Escape", trigger);
            assert_eq!(host.subscriptions, 0);
        }
    }

    #[test]
    fn test_disabled_suppresses_opening() {
        let mut host = RecordingHost::mounted();
        let config = TooltipConfig { disabled: true, ..TooltipConfig::default() };
        let mut machine = TooltipMachine::new(config);

        machine.handle(Interaction::PointerEnter, &mut host);
        machine.timer_elapsed(&mut host);

        assert_eq!(machine.state(), TooltipState::Closed);
        assert!(host.timers_started.is_empty());
    }

    #[test]
    fn test_disabling_closes_open_tooltip() {
        let mut host = RecordingHost::mounted();
        let mut machine = open_hover(&mut host);

        let disabled = TooltipConfig { disabled: true, ..*machine.config() };
        machine.set_config(disabled, &mut host);

        assert_eq!(machine.state(), TooltipState::Closed);
        assert_eq!(host.subscriptions, 0);
    }

    #[test]
    fn test_focus_mode_ignores_pointer() {
        let mut host = RecordingHost::mounted();
        let config = TooltipConfig { trigger: TriggerMode::Focus, ..TooltipConfig::default() };
        let mut machine = TooltipMachine::new(config);

        machine.handle(Interaction::PointerEnter, &mut host);
        assert_eq!(machine.state(), TooltipState::Closed);

        machine.handle(Interaction::Focus, &mut host);
        assert_eq!(machine.state(), TooltipState::Pending);
        machine.handle(Interaction::PointerLeave, &mut host);
        assert_eq!(machine.state(), TooltipState::Pending);
    }

    #[test]
    fn test_click_mode_toggles_and_closes_on_outside_pointer() {
        let mut host = RecordingHost::mounted();
        let config = TooltipConfig { trigger: TriggerMode::Click, delay_ms: 0, ..TooltipConfig::default() };
        let mut machine = TooltipMachine::new(config);

        machine.handle(Interaction::Click, &mut host);
        machine.timer_elapsed(&mut host);
        assert!(machine.is_open());

        machine.handle(Interaction::Click, &mut host);
        assert_eq!(machine.state(), TooltipState::Closed);

        machine.handle(Interaction::KeyDown(Key::Enter), &mut host);
        machine.timer_elapsed(&mut host);
        assert!(machine.is_open());

        machine.handle(Interaction::OutsidePointerDown, &mut host);
        assert_eq!(machine.state(), TooltipState::Closed);
        assert_eq!(host.subscriptions, 0);
    }

    #[test]
    fn test_outside_pointer_ignored_in_hover_mode() {
        let mut host = RecordingHost::mounted();
        let mut machine = open_hover(&mut host);

        machine.handle(Interaction::OutsidePointerDown, &mut host);
        assert!(machine.is_open());
    }

    #[test]
    fn test_missing_overlay_skips_positioning() {
        let mut host = RecordingHost { overlay: None, ..RecordingHost::mounted() };
        let mut machine = open_hover(&mut host);

        assert!(machine.is_open());
        assert_eq!(machine.position(), None);
        assert!(host.positions.is_empty());

        host.overlay = Some(Rect::sized(120.0, 30.0));
        assert!(machine.reposition(&mut host).is_some());
        assert_eq!(host.positions.len(), 1);
    }

    #[test]
    fn test_reposition_follows_trigger_and_reports_only_changes() {
        let mut host = RecordingHost::mounted();
        let mut machine = open_hover(&mut host);
        let first = machine.position().unwrap();

        machine.reposition(&mut host);
        assert_eq!(host.positions.len(), 1, "unchanged geometry is not re-reported");

        // Trigger scrolled up against the top edge: flips below
        host.trigger = Some(Rect::new(5.0, 200.0, 80.0, 32.0));
        let moved = machine.reposition(&mut host).unwrap();
        assert_ne!(moved, first);
        assert_eq!(moved.side, Side::Bottom);
        assert_eq!(host.positions.len(), 2);
    }

    #[test]
    fn test_reposition_is_noop_when_closed() {
        let mut host = RecordingHost::mounted();
        let mut machine = TooltipMachine::new(TooltipConfig::default());
        assert_eq!(machine.reposition(&mut host), None);
        assert!(host.positions.is_empty());
    }

    #[test]
    fn test_placement_change_repositions_open_tooltip() {
        let mut host = RecordingHost::mounted();
        let mut machine = open_hover(&mut host);

        let right = TooltipConfig { placement: Side::Right, ..*machine.config() };
        machine.set_config(right, &mut host);

        assert_eq!(machine.position().map(|p| p.side), Some(Side::Right));
    }

    #[test]
    fn test_destroy_releases_everything_from_any_state() {
        let mut host = RecordingHost::mounted();
        let mut pending = TooltipMachine::new(TooltipConfig::default());
        pending.handle(Interaction::PointerEnter, &mut host);
        pending.destroy(&mut host);
        assert_eq!(host.armed_timers(), 0);

        let mut open = open_hover(&mut host);
        open.destroy(&mut host);
        assert_eq!(host.subscriptions, 0);
        assert_eq!(open.state(), TooltipState::Closed);
    }

    #[test]
    fn test_snapshot_serializes_for_js() {
        let mut host = RecordingHost::mounted();
        let machine = open_hover(&mut host);
        let json = serde_json::to_value(machine.snapshot()).unwrap();
        assert_eq!(json["state"], "open");
        assert_eq!(json["open"], true);
        assert_eq!(json["position"]["side"], "top");
    }

    #[test]
    fn test_dom_key_mapping() {
        assert_eq!(Key::from_dom_key("Escape"), Key::Escape);
        assert_eq!(Key::from_dom_key(" "), Key::Space);
        assert_eq!(Key::from_dom_key("Enter"), Key::Enter);
        assert_eq!(Key::from_dom_key("a"), Key::Other);
    }
}
