use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    window, Event, HtmlCanvasElement, MouseEvent, TouchEvent, WebGl2RenderingContext as GL, Window,
};

use super::convert::{color_from_js, options_from_js};
use super::listeners::Listener;
use crate::animation::{Animation, Surface};
use crate::error::Error;
use crate::events::{subscriptions, EventKind};
use crate::frame::{FrameInput, FrameLoop, FrameScheduler};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

struct CanvasSurface {
    window: Window,
    canvas: HtmlCanvasElement,
}

impl CanvasSurface {
    fn viewport(&self) -> (f64, f64) {
        let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (read(self.window.inner_width()), read(self.window.inner_height()))
    }
}

impl Surface for CanvasSurface {
    fn layout_size(&self) -> (u32, u32) {
        (
            self.canvas.client_width().max(0) as u32,
            self.canvas.client_height().max(0) as u32,
        )
    }

    fn viewport_size(&self) -> (u32, u32) {
        let (w, h) = self.viewport();
        (w as u32, h as u32)
    }

    fn set_backing_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

/// `requestAnimationFrame` over a shared callback slot.
///
/// The slot is filled after the shared state exists, because the callback
/// needs a handle to that state.
struct AnimationFrames {
    window: Window,
    callback: FrameCallback,
}

impl FrameScheduler for AnimationFrames {
    type Handle = i32;

    fn request(&mut self) -> Option<i32> {
        let slot = self.callback.borrow();
        let callback = slot.as_ref()?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .inspect_err(|e| error!(?e, "requestAnimationFrame failed"))
            .ok()
    }

    fn cancel(&mut self, handle: i32) {
        let _ = self.window.cancel_animation_frame(handle);
    }
}

struct Inner {
    animation: Animation<GL>,
    frames: FrameLoop<AnimationFrames>,
    surface: CanvasSurface,
}

impl Inner {
    fn tick(&mut self) {
        if !self.frames.begin_tick() {
            return;
        }
        let now_ms = self
            .surface
            .window
            .performance()
            .map(|p| p.now())
            .unwrap_or(0.0);
        let input = FrameInput {
            now_ms,
            scroll_y: self.surface.window.scroll_y().unwrap_or(0.0),
            viewport_height: self.surface.viewport().1,
        };
        self.animation.render(&input);
        self.frames.end_tick();
    }

    fn resize(&mut self) {
        self.animation.resize(&self.surface);
    }

    /// Convert client coordinates to surface pixels.
    fn pointer_at(&mut self, client_x: i32, client_y: i32) {
        let rect = self.surface.canvas.get_bounding_client_rect();
        self.animation
            .pointer_moved(f64::from(client_x) - rect.left(), f64::from(client_y) - rect.top());
    }

    fn handle(&mut self, kind: EventKind, event: &Event) {
        match kind {
            EventKind::PointerMove | EventKind::Click => {
                if let Some(e) = event.dyn_ref::<MouseEvent>() {
                    self.pointer_at(e.client_x(), e.client_y());
                }
            }
            EventKind::TouchMove => {
                let touch = event
                    .dyn_ref::<TouchEvent>()
                    .and_then(|e| e.target_touches().get(0));
                if let Some(touch) = touch {
                    self.pointer_at(touch.client_x(), touch.client_y());
                }
            }
            EventKind::Resize => self.resize(),
        }
    }
}

/// Handle returned to JavaScript. Every method is a no-op after `destroy()`.
#[wasm_bindgen]
pub struct NeuralAnimation {
    inner: Option<Rc<RefCell<Inner>>>,
    listeners: Vec<Listener>,
    frame_callback: FrameCallback,
}

/// Attach an animation to the canvas matched by `selector` and start it.
#[wasm_bindgen(js_name = createNeuralAnimation)]
pub fn create_neural_animation(
    selector: &str,
    options: JsValue,
) -> Result<NeuralAnimation, JsValue> {
    NeuralAnimation::create(selector, options)
}

#[wasm_bindgen]
impl NeuralAnimation {
    pub fn create(selector: &str, options: JsValue) -> Result<NeuralAnimation, JsValue> {
        let options = options_from_js(&options)?;
        let window = window().ok_or_else(|| Error::SurfaceNotFound("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| Error::SurfaceNotFound("no document".into()))?;
        let canvas = document
            .query_selector(selector)
            .ok()
            .flatten()
            .ok_or_else(|| Error::SurfaceNotFound(selector.to_owned()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| Error::SurfaceNotFound(format!("{selector} is not a canvas")))?;
        let gl: GL = canvas
            .get_context("webgl2")
            .ok()
            .flatten()
            .ok_or(Error::ContextUnavailable)?
            .dyn_into()
            .map_err(|_| Error::ContextUnavailable)?;

        let animation = Animation::new(gl, &options)?;
        let settings = *animation.settings();

        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        let inner = Rc::new(RefCell::new(Inner {
            animation,
            frames: FrameLoop::new(AnimationFrames {
                window: window.clone(),
                callback: frame_callback.clone(),
            }),
            surface: CanvasSurface {
                window: window.clone(),
                canvas,
            },
        }));

        let weak = Rc::downgrade(&inner);
        *frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().tick();
            }
        }) as Box<dyn FnMut()>));

        let root = Rc::downgrade(&inner);
        let mut handle = NeuralAnimation {
            inner: Some(inner),
            listeners: Vec::new(),
            frame_callback,
        };
        for kind in subscriptions(&settings) {
            let weak: Weak<RefCell<Inner>> = root.clone();
            let listener = Listener::new(&window, kind, move |event| {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().handle(kind, &event);
                }
            });
            match listener {
                Ok(listener) => handle.listeners.push(listener),
                Err(e) => {
                    handle.destroy();
                    return Err(e);
                }
            }
        }

        handle.resize();
        handle.start();
        info!(selector, "neural animation attached");
        Ok(handle)
    }

    pub fn start(&self) {
        if let Some(inner) = &self.inner {
            inner.borrow_mut().frames.start();
        }
    }

    pub fn stop(&self) {
        if let Some(inner) = &self.inner {
            inner.borrow_mut().frames.stop();
        }
    }

    pub fn resize(&self) {
        if let Some(inner) = &self.inner {
            inner.borrow_mut().resize();
        }
    }

    /// Accepts `"#rgb"`, `"#rrggbb"` or `{ r, g, b }`.
    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&self, color: JsValue) -> Result<(), JsValue> {
        let Some(inner) = &self.inner else {
            return Ok(());
        };
        let color = color_from_js(&color)?;
        inner.borrow_mut().animation.set_color(&color)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = setSpeed)]
    pub fn set_speed(&self, speed: f32) {
        if let Some(inner) = &self.inner {
            inner.borrow_mut().animation.set_speed(speed);
        }
    }

    #[wasm_bindgen(js_name = setScale)]
    pub fn set_scale(&self, scale: f32) {
        if let Some(inner) = &self.inner {
            inner.borrow_mut().animation.set_scale(scale);
        }
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.inner
            .as_ref()
            .is_some_and(|inner| inner.borrow().frames.is_running())
    }

    #[wasm_bindgen(getter)]
    pub fn speed(&self) -> Option<f32> {
        Some(self.inner.as_ref()?.borrow().animation.settings().speed)
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> Option<f32> {
        Some(self.inner.as_ref()?.borrow().animation.settings().scale)
    }

    #[wasm_bindgen(getter, js_name = baseColor)]
    pub fn base_color(&self) -> Option<String> {
        Some(
            self.inner
                .as_ref()?
                .borrow()
                .animation
                .settings()
                .base_color
                .to_string(),
        )
    }

    /// Stop the loop, drop every listener and free the GPU resources.
    pub fn destroy(&mut self) {
        let Some(inner) = self.inner.take() else {
            return;
        };
        inner.borrow_mut().frames.stop();
        self.listeners.clear();
        self.frame_callback.borrow_mut().take();
        match Rc::try_unwrap(inner) {
            Ok(cell) => {
                cell.into_inner().animation.release();
            }
            Err(_) => error!("animation still borrowed during destroy; GPU resources leaked"),
        }
    }
}
