//! DOM-backed tooltip controller
//!
//! `TooltipController` pairs a [`TooltipMachine`] with a [`DomHost`]. The JS
//! side forwards trigger events to it and renders from the snapshot passed to
//! its `onChange` callback: `{state, open, position}`.
//!
//! Enter/Space `preventDefault` on the trigger stays with the caller; the
//! controller only sees the key name.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::api::helpers::{deserialize, deserialize_or_default, serialize};
use crate::dom::{document_interaction, DomHost, HostSignal, SignalSink};
use crate::error::TooltipError;
use crate::tooltip::{Interaction, Key, TooltipConfig, TooltipMachine};

struct ControllerInner {
    machine: TooltipMachine,
    host: DomHost,
    on_change: Option<Function>,
}

/// Run `f` against the machine, then notify JS once the borrow is released
fn dispatch<F>(inner: &Rc<RefCell<ControllerInner>>, f: F)
where
    F: FnOnce(&mut TooltipMachine, &mut DomHost),
{
    let notify = {
        let mut guard = inner.borrow_mut();
        let ControllerInner { machine, host, on_change } = &mut *guard;
        f(machine, host);

        if host.take_dirty() {
            on_change.clone().map(|callback| (callback, machine.snapshot()))
        } else {
            None
        }
    };

    // The callback may call straight back into the controller
    if let Some((callback, snapshot)) = notify {
        match serialize(&snapshot, "tooltip snapshot") {
            Ok(value) => {
                if let Err(err) = callback.call1(&JsValue::NULL, &value) {
                    log::error!("tooltip onChange threw: {:?}", err);
                }
            }
            Err(err) => log::error!("{}", err),
        }
    }
}

fn handle_signal(inner: &Rc<RefCell<ControllerInner>>, signal: HostSignal) {
    match signal {
        HostSignal::TimerElapsed => dispatch(inner, |machine, host| machine.timer_elapsed(host)),
        HostSignal::Reposition => dispatch(inner, |machine, host| {
            machine.reposition(host);
        }),
        signal @ (HostSignal::PointerDown(_) | HostSignal::KeyDown(_)) => dispatch(inner, |machine, host| {
            let inside = match &signal {
                HostSignal::PointerDown(Some(node)) => host.contains(node),
                _ => false,
            };
            if let Some(interaction) = document_interaction(&signal, inside) {
                machine.handle(interaction, host);
            }
        }),
    }
}

#[wasm_bindgen]
pub struct TooltipController {
    inner: Rc<RefCell<ControllerInner>>,
}

#[wasm_bindgen]
impl TooltipController {
    /// Create a controller for `trigger`.
    ///
    /// `config` is an optional `{placement, trigger, delayMs, disabled, margin,
    /// padding}` object; `on_change` receives a snapshot after every change.
    #[wasm_bindgen(constructor)]
    pub fn new(
        trigger: Element,
        config: JsValue,
        on_change: Option<Function>,
    ) -> Result<TooltipController, JsValue> {
        let config: TooltipConfig = deserialize_or_default(config, "tooltip config")?;
        let window = web_sys::window().ok_or(TooltipError::NoWindow)?;

        let inner = Rc::new_cyclic(|weak: &Weak<RefCell<ControllerInner>>| {
            let weak = weak.clone();
            let sink: SignalSink = Rc::new(move |signal: HostSignal| {
                if let Some(inner) = weak.upgrade() {
                    handle_signal(&inner, signal);
                }
            });

            RefCell::new(ControllerInner {
                machine: TooltipMachine::new(config),
                host: DomHost::new(window, trigger, sink),
                on_change,
            })
        });

        log::debug!("tooltip controller created ({} on {})", config.trigger, config.placement);
        Ok(TooltipController { inner })
    }

    /// Register the rendered overlay element (or `null` once it unmounts)
    #[wasm_bindgen(js_name = setOverlay)]
    pub fn set_overlay(&self, overlay: Option<Element>) {
        let mounted = overlay.is_some();
        dispatch(&self.inner, |machine, host| {
            host.set_overlay(overlay);
            if mounted {
                machine.reposition(host);
            }
        });
    }

    #[wasm_bindgen(js_name = pointerEnter)]
    pub fn pointer_enter(&self) {
        self.interact(Interaction::PointerEnter);
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&self) {
        self.interact(Interaction::PointerLeave);
    }

    pub fn focus(&self) {
        self.interact(Interaction::Focus);
    }

    pub fn blur(&self) {
        self.interact(Interaction::Blur);
    }

    pub fn click(&self) {
        self.interact(Interaction::Click);
    }

    /// Key pressed on the trigger; `key` is `KeyboardEvent.key`
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&self, key: &str) {
        self.interact(Interaction::KeyDown(Key::from_dom_key(key)));
    }

    /// Re-run the positioner now. Returns the position, or `null` when closed
    /// or not yet measurable.
    pub fn reposition(&self) -> Result<JsValue, JsValue> {
        let mut position = None;
        dispatch(&self.inner, |machine, host| position = machine.reposition(host));
        Ok(serialize(&position, "position result")?)
    }

    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&self, config: JsValue) -> Result<(), JsValue> {
        let config: TooltipConfig = deserialize(config, "tooltip config")?;
        dispatch(&self.inner, |machine, host| machine.set_config(config, host));
        Ok(())
    }

    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.inner.borrow().machine.is_open()
    }

    /// `"closed"`, `"pending"` or `"open"`
    pub fn state(&self) -> String {
        self.inner.borrow().machine.state().as_str().to_string()
    }

    pub fn position(&self) -> Result<JsValue, JsValue> {
        let position = self.inner.borrow().machine.position();
        Ok(serialize(&position, "position result")?)
    }

    /// Cancel timers and drop every listener. Call when the trigger unmounts.
    pub fn destroy(&self) {
        dispatch(&self.inner, |machine, host| machine.destroy(host));
    }
}

impl TooltipController {
    fn interact(&self, interaction: Interaction) {
        dispatch(&self.inner, |machine, host| machine.handle(interaction, host));
    }
}

impl Drop for TooltipController {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            let ControllerInner { machine, host, .. } = &mut *inner;
            machine.destroy(host);
        }
    }
}
