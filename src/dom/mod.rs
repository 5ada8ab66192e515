//! Browser implementation of [`TooltipHost`]
//!
//! Measures elements with `getBoundingClientRect`, reads the window for the
//! viewport, drives the delay with `setTimeout` and listens for scroll,
//! resize and content-size changes while the tooltip is open.
//!
//! Callbacks never touch the state machine directly. They push a
//! [`HostSignal`] into the sink supplied by the owner, which dispatches it
//! once no other borrow of the machine is live.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, KeyboardEvent, Node, ResizeObserver, Window};

use crate::error::TooltipError;
use crate::models::{PositionResult, Rect, Viewport};
use crate::tooltip::{Interaction, Key, TooltipHost};

/// Something happened in the browser that the machine should hear about
#[derive(Debug, Clone)]
pub enum HostSignal {
    TimerElapsed,
    /// Scroll, resize or an observed element changed size
    Reposition,
    /// Pointer pressed somewhere in the document
    PointerDown(Option<Node>),
    /// Key pressed somewhere in the document
    KeyDown(String),
}

pub type SignalSink = Rc<dyn Fn(HostSignal)>;

/// Interaction a document-level signal stands for, if any.
///
/// Only Escape counts from the document; Enter and Space toggle a click
/// tooltip from the trigger's own key handler, never from elsewhere on the
/// page. `inside` says whether a pointer-down landed in the trigger or overlay.
pub fn document_interaction(signal: &HostSignal, inside: bool) -> Option<Interaction> {
    match signal {
        HostSignal::KeyDown(key) => {
            (Key::from_dom_key(key) == Key::Escape).then_some(Interaction::KeyDown(Key::Escape))
        }
        HostSignal::PointerDown(_) => (!inside).then_some(Interaction::OutsidePointerDown),
        HostSignal::TimerElapsed | HostSignal::Reposition => None,
    }
}

struct PendingTimer {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

/// Listeners registered while the tooltip is open. Dropping removes them.
struct Subscriptions {
    window: Window,
    document: Document,
    on_reposition: Closure<dyn FnMut()>,
    on_pointer_down: Closure<dyn FnMut(Event)>,
    on_key_down: Closure<dyn FnMut(Event)>,
    resize_observer: Option<ResizeObserver>,
}

impl Subscriptions {
    fn register(window: &Window, document: Document, sink: &SignalSink) -> Result<Self, TooltipError> {
        let reposition_sink = sink.clone();
        let on_reposition =
            Closure::<dyn FnMut()>::new(move || reposition_sink(HostSignal::Reposition));

        let pointer_sink = sink.clone();
        let on_pointer_down = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            pointer_sink(HostSignal::PointerDown(target));
        });

        let key_sink = sink.clone();
        let on_key_down = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Ok(event) = event.dyn_into::<KeyboardEvent>() {
                key_sink(HostSignal::KeyDown(event.key()));
            }
        });

        // Built before anything is registered so that Drop unhooks whatever
        // was added if a later registration fails
        let mut subscriptions = Self {
            window: window.clone(),
            document,
            on_reposition,
            on_pointer_down,
            on_key_down,
            resize_observer: None,
        };
        subscriptions.attach()?;
        Ok(subscriptions)
    }

    fn attach(&mut self) -> Result<(), TooltipError> {
        let reposition_fn: &js_sys::Function = self.on_reposition.as_ref().unchecked_ref();
        // Capture phase so scrolling any ancestor container is seen too
        self.window
            .add_event_listener_with_callback_and_bool("scroll", reposition_fn, true)
            .map_err(TooltipError::dom)?;
        self.window
            .add_event_listener_with_callback("resize", reposition_fn)
            .map_err(TooltipError::dom)?;
        self.document
            .add_event_listener_with_callback("mousedown", self.on_pointer_down.as_ref().unchecked_ref())
            .map_err(TooltipError::dom)?;
        self.document
            .add_event_listener_with_callback("keydown", self.on_key_down.as_ref().unchecked_ref())
            .map_err(TooltipError::dom)?;

        // Older engines lack ResizeObserver; scroll/resize still work there
        self.resize_observer = match ResizeObserver::new(reposition_fn) {
            Ok(observer) => {
                if let Some(body) = self.document.body() {
                    observer.observe(&body);
                }
                Some(observer)
            }
            Err(err) => {
                log::warn!("ResizeObserver unavailable: {:?}", err);
                None
            }
        };
        Ok(())
    }

    fn observe(&self, element: &Element) {
        if let Some(observer) = &self.resize_observer {
            observer.observe(element);
        }
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        if let Some(observer) = &self.resize_observer {
            observer.disconnect();
        }
        let reposition_fn: &js_sys::Function = self.on_reposition.as_ref().unchecked_ref();
        let _ = self
            .window
            .remove_event_listener_with_callback_and_bool("scroll", reposition_fn, true);
        let _ = self.window.remove_event_listener_with_callback("resize", reposition_fn);
        let _ = self
            .document
            .remove_event_listener_with_callback("mousedown", self.on_pointer_down.as_ref().unchecked_ref());
        let _ = self
            .document
            .remove_event_listener_with_callback("keydown", self.on_key_down.as_ref().unchecked_ref());
    }
}

pub struct DomHost {
    window: Window,
    trigger: Element,
    overlay: Option<Element>,
    sink: SignalSink,
    timer: Option<PendingTimer>,
    subscriptions: Option<Subscriptions>,
    dirty: bool,
}

impl DomHost {
    pub fn new(window: Window, trigger: Element, sink: SignalSink) -> Self {
        Self {
            window,
            trigger,
            overlay: None,
            sink,
            timer: None,
            subscriptions: None,
            dirty: false,
        }
    }

    /// Attach (or detach) the rendered overlay element
    pub fn set_overlay(&mut self, overlay: Option<Element>) {
        if let (Some(subscriptions), Some(element)) = (&self.subscriptions, &overlay) {
            subscriptions.observe(element);
        }
        self.overlay = overlay;
    }

    /// True when `node` lies inside the trigger or the overlay
    pub fn contains(&self, node: &Node) -> bool {
        self.trigger.contains(Some(node))
            || self.overlay.as_ref().is_some_and(|overlay| overlay.contains(Some(node)))
    }

    /// Whether open state or position changed since the last call
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

fn element_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.top(), rect.left(), rect.width(), rect.height())
}

impl TooltipHost for DomHost {
    fn measure_trigger(&self) -> Option<Rect> {
        if !self.trigger.is_connected() {
            return None;
        }
        Some(element_rect(&self.trigger))
    }

    fn measure_overlay(&self) -> Option<Rect> {
        self.overlay
            .as_ref()
            .filter(|overlay| overlay.is_connected())
            .map(element_rect)
    }

    fn viewport(&self) -> Option<Viewport> {
        let width = self.window.inner_width().ok()?.as_f64()?;
        let height = self.window.inner_height().ok()?.as_f64()?;
        let scroll_x = self.window.scroll_x().ok()?;
        let scroll_y = self.window.scroll_y().ok()?;
        Some(Viewport { width, height, scroll_x, scroll_y })
    }

    fn start_timer(&mut self, delay_ms: u32) {
        let sink = self.sink.clone();
        let callback = Closure::<dyn FnMut()>::new(move || sink(HostSignal::TimerElapsed));
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);

        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.as_ref().unchecked_ref(), delay)
        {
            Ok(handle) => {
                self.timer = Some(PendingTimer { handle, _callback: callback });
            }
            Err(err) => log::error!("{}", TooltipError::dom(err)),
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            self.window.clear_timeout_with_handle(timer.handle);
        }
    }

    fn subscribe(&mut self) {
        let Some(document) = self.window.document() else {
            log::warn!("no document; tooltip will not follow scroll or resize");
            return;
        };
        match Subscriptions::register(&self.window, document, &self.sink) {
            Ok(subscriptions) => {
                if let Some(overlay) = &self.overlay {
                    subscriptions.observe(overlay);
                }
                self.subscriptions = Some(subscriptions);
            }
            Err(err) => log::error!("{}", err),
        }
    }

    fn unsubscribe(&mut self) {
        self.subscriptions = None;
    }

    fn open_changed(&mut self, _open: bool) {
        self.dirty = true;
    }

    fn position_changed(&mut self, _position: &PositionResult) {
        self.dirty = true;
    }
}

impl Drop for DomHost {
    fn drop(&mut self) {
        // A timer left running would call into a dropped closure
        self.cancel_timer();
    }
}
