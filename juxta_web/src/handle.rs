//! The exported `create()` and the handle returned to JS.
//!
//! All browser listeners are `gloo` `EventListener`s owned by the binding, so
//! dropping them (on `destroy()`) unregisters them. Listener closures hold a
//! `Weak` back-reference to avoid a cycle through the binding.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use js_sys::{Function, Reflect};
use juxta_core::dom::Surface;
use juxta_core::geometry::PointerSample;
use juxta_core::position::SliderInput;
use juxta_core::{GateStatus, JxError, Side, SliderController};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlElement, MouseEvent};

use crate::config::{self, JsConfig};
use crate::logging;
use crate::surface::WebSurface;

type Controller = SliderController<WebSurface>;

struct Binding {
    slider: RefCell<Option<Controller>>,
    listeners: RefCell<Vec<EventListener>>,
    load_timer: RefCell<Option<Timeout>>,
    callback: RefCell<Option<Function>>,
    on_error: RefCell<Option<Function>>,
}

impl Binding {
    fn with_slider<T>(&self, f: impl FnOnce(&Controller) -> T) -> Option<T> {
        let guard = self.slider.try_borrow().ok()?;
        guard.as_ref().map(f)
    }

    fn with_slider_mut<T>(&self, f: impl FnOnce(&mut Controller) -> T) -> Option<T> {
        let mut guard = self.slider.try_borrow_mut().ok()?;
        guard.as_mut().map(f)
    }

    /// Listen for both images. Completions are deferred to a microtask so the
    /// gate never runs while `create()` is still on the stack.
    fn watch_images(self: &Rc<Self>) {
        let Some(images) = self.with_slider(|s| {
            [Side::Before, Side::After].map(|side| (side, s.image(side).image().clone()))
        }) else {
            return;
        };

        let mut listeners = Vec::new();
        for (side, image) in images {
            let weak = Rc::downgrade(self);
            listeners.push(EventListener::once(&image, "load", move |_| {
                defer(weak, move |binding| binding.image_loaded(side));
            }));

            let weak = Rc::downgrade(self);
            listeners.push(EventListener::once(&image, "error", move |_| {
                defer(weak, move |binding| binding.image_failed(side));
            }));

            // Already decoded (cached) images may have fired before we listened
            if image.complete() && image.natural_width() > 0 {
                defer(Rc::downgrade(self), move |binding| binding.image_loaded(side));
            }
        }
        self.listeners.borrow_mut().extend(listeners);
    }

    fn arm_timeout(self: &Rc<Self>, timeout_ms: u32) {
        let weak = Rc::downgrade(self);
        let timer = Timeout::new(timeout_ms, move || {
            if let Some(binding) = weak.upgrade() {
                let error = binding.with_slider_mut(|s| s.fail_load_timeout(timeout_ms)).flatten();
                if let Some(error) = error {
                    binding.report(error);
                }
            }
        });
        *self.load_timer.borrow_mut() = Some(timer);
    }

    fn image_loaded(self: &Rc<Self>, side: Side) {
        let status = self.with_slider_mut(|s| s.mark_loaded(side));
        if status == Some(GateStatus::Initialized) {
            self.on_initialized();
        }
    }

    fn image_failed(self: &Rc<Self>, side: Side) {
        if let Some(error) = self.with_slider_mut(|s| s.mark_failed(side)).flatten() {
            self.load_timer.borrow_mut().take();
            self.report(error);
        }
    }

    fn report(&self, error: JxError) {
        let Some(on_error) = self.on_error.borrow().clone() else {
            return;
        };
        if let Err(e) = on_error.call1(&JsValue::NULL, &JsValue::from_str(&error.to_string())) {
            warn!(error = ?e, "onError callback threw");
        }
    }

    /// Runs once, after the controller built and initialized
    fn on_initialized(self: &Rc<Self>) {
        self.load_timer.borrow_mut().take();

        let Some((window, track, responsive)) = self.with_slider(|s| {
            let track = s.dom().map(|dom| dom.track.clone());
            (s.surface().window().clone(), track, s.tracks_window_resize())
        }) else {
            return;
        };
        let Some(track) = track else {
            return;
        };

        let mut listeners = Vec::new();

        if responsive {
            let weak = Rc::downgrade(self);
            listeners.push(EventListener::new(&window, "resize", move |_| {
                if let Some(binding) = weak.upgrade() {
                    binding.with_slider(|s| s.on_resize());
                }
            }));
        }

        listeners.extend(self.wire_track(&track));
        self.listeners.borrow_mut().extend(listeners);

        // The slider borrow is released, so the callback may call back into the handle
        let callback = self.callback.borrow_mut().take();
        if let Some(callback) = callback {
            let handle = SliderHandle { binding: self.clone() };
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from(handle)) {
                warn!(error = ?e, "slider callback threw");
            }
        }
    }

    fn wire_track(self: &Rc<Self>, track: &HtmlElement) -> Vec<EventListener> {
        // Pointer events cover mouse, pen and touch; touch needs panning disabled
        if let Err(e) = self
            .with_slider(|s| s.surface().set_style(track, "touch-action", "none"))
            .unwrap_or(Ok(()))
        {
            debug!(error = %e, "could not disable touch panning");
        }

        let weak = Rc::downgrade(self);
        let down = EventListener::new_with_options(
            track,
            "pointerdown",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                let (Some(binding), Some(sample)) = (weak.upgrade(), pointer_sample(event)) else {
                    return;
                };
                binding.with_slider_mut(|s| s.on_pointer_down(sample));
            },
        );

        let weak = Rc::downgrade(self);
        let moved = EventListener::new_with_options(
            track,
            "pointermove",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                let (Some(binding), Some(sample)) = (weak.upgrade(), pointer_sample(event)) else {
                    return;
                };
                binding.with_slider_mut(|s| s.on_pointer_move(sample));
            },
        );

        let weak = Rc::downgrade(self);
        let up = EventListener::new_with_options(
            track,
            "pointerup",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                event.stop_propagation();
                if let Some(binding) = weak.upgrade() {
                    binding.with_slider_mut(|s| s.on_pointer_up());
                }
            },
        );

        vec![down, moved, up]
    }

    fn destroy(&self) {
        self.listeners.borrow_mut().clear();
        self.load_timer.borrow_mut().take();
        self.callback.borrow_mut().take();
        self.on_error.borrow_mut().take();

        if let Some(Err(e)) = self.with_slider_mut(|s| s.teardown()) {
            warn!(error = %e, "slider teardown failed");
        }
    }
}

fn defer(binding: Weak<Binding>, f: impl FnOnce(Rc<Binding>) + 'static) {
    spawn_local(async move {
        if let Some(binding) = binding.upgrade() {
            f(binding);
        }
    });
}

/// Page coordinates of a pointer event. `MouseEvent::page_x` is integral in
/// web-sys, so the fractional `pageX`/`pageY` are read first.
fn pointer_sample(event: &Event) -> Option<PointerSample> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    let page_x = fractional_field(event, "pageX").unwrap_or(mouse.page_x() as f64);
    let page_y = fractional_field(event, "pageY").unwrap_or(mouse.page_y() as f64);
    Some(PointerSample::new(page_x, page_y))
}

fn fractional_field(event: &Event, name: &str) -> Option<f64> {
    Reflect::get(event, &JsValue::from_str(name)).ok()?.as_f64()
}

/// A mounted slider. Dropping the JS object does not unmount it; call `destroy()`.
#[wasm_bindgen]
pub struct SliderHandle {
    binding: Rc<Binding>,
}

#[wasm_bindgen]
impl SliderHandle {
    /// Current divider position, e.g. "30.00%", once initialized
    pub fn position(&self) -> Option<String> {
        self.binding.with_slider(|s| s.position()).flatten()
    }

    /// "horizontal" or "vertical"
    pub fn mode(&self) -> Option<String> {
        self.binding.with_slider(|s| s.mode().to_string())
    }

    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.binding.with_slider(|s| s.is_ready()).unwrap_or(false)
    }

    /// Jump to a number or percentage string. Returns whether it was applied.
    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&self, value: JsValue) -> bool {
        let input = if let Some(number) = value.as_f64() {
            SliderInput::Percent(number)
        } else if let Some(text) = value.as_string() {
            SliderInput::Text(text)
        } else {
            return false;
        };

        match self.binding.with_slider_mut(|s| s.set_position(input)) {
            Some(Ok(applied)) => applied.is_some(),
            Some(Err(e)) => {
                debug!(error = %e, "position not applied");
                false
            }
            None => false,
        }
    }

    /// Unregister every listener and remove the slider's markup
    pub fn destroy(&self) {
        self.binding.destroy();
    }
}

/// Mount a before/after slider into `container`.
///
/// `images` must be an array of exactly two `{ src, alt?, label?, credit? }`
/// objects. Errors never throw: they are logged and the returned handle stays
/// inert (`isReady()` is false).
#[wasm_bindgen]
pub fn create(container: HtmlElement, images: JsValue, options: JsValue) -> SliderHandle {
    logging::init();

    let specs = config::read_images(&images);
    let JsConfig {
        options,
        callback,
        on_error,
    } = config::read_options(&options);
    let timeout_ms = options.load_timeout_ms;

    let binding = Rc::new(Binding {
        slider: RefCell::new(None),
        listeners: RefCell::new(Vec::new()),
        load_timer: RefCell::new(None),
        callback: RefCell::new(callback),
        on_error: RefCell::new(on_error),
    });

    let created = WebSurface::new().and_then(|surface| SliderController::new(surface, container, &specs, options));
    match created {
        Ok(slider) => {
            *binding.slider.borrow_mut() = Some(slider);
            binding.watch_images();
            if let Some(timeout_ms) = timeout_ms {
                binding.arm_timeout(timeout_ms);
            }
        }
        Err(e) => {
            debug!(error = %e, code = e.error_code(), "slider left inert");
            binding.report(e);
        }
    }

    SliderHandle { binding }
}
