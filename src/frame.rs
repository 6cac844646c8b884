//! The frame chain and the per-frame values derived from host state.

use tracing::{debug, error};

/// Display-synchronized callback scheduling (`requestAnimationFrame`).
pub trait FrameScheduler {
    type Handle;

    /// Ask for one callback on the next display refresh. `None` when the
    /// platform refused.
    fn request(&mut self) -> Option<Self::Handle>;
    fn cancel(&mut self, handle: Self::Handle);
}

/// Keeps at most one tick pending and tracks whether the loop is running.
///
/// Each tick schedules exactly the next one; there is no fixed timestep and
/// no catch-up after a stall.
pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    running: bool,
    pending: Option<S::Handle>,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            running: false,
            pending: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Returns `false` when the loop was already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.schedule();
        debug!(running = self.running, "frame loop started");
        self.running
    }

    /// Returns `false` when the loop was already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        debug!("frame loop stopped");
        true
    }

    /// The scheduled callback fired. Returns whether a frame should be drawn.
    pub fn begin_tick(&mut self) -> bool {
        self.pending = None;
        self.running
    }

    /// Chain the next tick after a frame was drawn.
    pub fn end_tick(&mut self) {
        if self.running && self.pending.is_none() {
            self.schedule();
        }
    }

    fn schedule(&mut self) {
        self.pending = self.scheduler.request();
        if self.pending.is_none() {
            error!("frame request refused; animation halted");
            self.running = false;
        }
    }
}

/// Host measurements sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// High-resolution timestamp in milliseconds.
    pub now_ms: f64,
    pub scroll_y: f64,
    pub viewport_height: f64,
}

/// Pointer position in surface pixels mapped to `[0, 1]` with the origin at
/// the bottom-left.
pub fn pointer_uv(pointer: (f64, f64), surface: (u32, u32)) -> [f32; 2] {
    let (x, y) = pointer;
    let (w, h) = (f64::from(surface.0), f64::from(surface.1));
    let u = if w > 0.0 { x / w } else { 0.0 };
    let v = if h > 0.0 { 1.0 - y / h } else { 1.0 };
    [u as f32, v as f32]
}

/// Vertical scroll offset relative to twice the viewport height.
pub fn scroll_progress(scroll_y: f64, viewport_height: f64, reactive: bool) -> f32 {
    if !reactive || viewport_height <= 0.0 {
        return 0.0;
    }
    (scroll_y / (2.0 * viewport_height)) as f32
}
