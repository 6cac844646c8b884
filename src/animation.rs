//! Platform-independent animation state: configuration, pointer, surface
//! geometry and the uniform writes derived from them.

use tracing::{debug, info, warn};

use crate::color::{ColorInput, Rgb};
use crate::error::Result;
use crate::frame::{pointer_uv, scroll_progress, FrameInput};
use crate::gl::GlContext;
use crate::options::{clamp_scale, clamp_speed, Options, Settings};
use crate::setup::{Renderer, ShaderSources};
use crate::uniforms;

/// The drawing surface as far as sizing is concerned.
pub trait Surface {
    /// Laid-out size in pixels; an axis is zero when the surface has no layout.
    fn layout_size(&self) -> (u32, u32);
    fn viewport_size(&self) -> (u32, u32);
    fn set_backing_size(&self, width: u32, height: u32);
}

pub struct Animation<G: GlContext> {
    renderer: Renderer<G>,
    settings: Settings,
    pointer: (f64, f64),
    size: Option<(u32, u32)>,
}

impl<G: GlContext> Animation<G> {
    pub fn new(gl: G, options: &Options) -> Result<Self> {
        Self::with_sources(gl, options, ShaderSources::NEURAL)
    }

    pub fn with_sources(gl: G, options: &Options, sources: ShaderSources<'_>) -> Result<Self> {
        // Validate before touching the GPU so a bad option allocates nothing.
        let settings = options.resolve()?;
        let renderer = Renderer::new(gl, sources)?;
        let animation = Self {
            renderer,
            settings,
            pointer: (0.0, 0.0),
            size: None,
        };
        animation.push_base_color();
        animation.push1f(uniforms::SPEED, settings.speed);
        animation.push1f(uniforms::SCALE, settings.scale);
        info!(
            color = %settings.base_color,
            speed = settings.speed,
            scale = settings.scale,
            pointer = settings.pointer,
            scroll_reactive = settings.scroll_reactive,
            "animation created"
        );
        Ok(animation)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn pointer(&self) -> (f64, f64) {
        self.pointer
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }

    pub fn gl(&self) -> &G {
        self.renderer.gl()
    }

    pub fn set_color(&mut self, color: &ColorInput) -> Result<()> {
        let rgb = color.resolve().inspect_err(|e| warn!(%e, "color rejected"))?;
        self.set_rgb(rgb);
        Ok(())
    }

    pub fn set_rgb(&mut self, rgb: Rgb) {
        self.settings.base_color = rgb;
        self.push_base_color();
    }

    /// Returns the stored value after clamping.
    pub fn set_speed(&mut self, speed: f32) -> f32 {
        self.settings.speed = clamp_speed(speed);
        self.push1f(uniforms::SPEED, self.settings.speed);
        self.settings.speed
    }

    /// Returns the stored value after clamping.
    pub fn set_scale(&mut self, scale: f32) -> f32 {
        self.settings.scale = clamp_scale(scale);
        self.push1f(uniforms::SCALE, self.settings.scale);
        self.settings.scale
    }

    /// Record a pointer position in surface pixels. Ignored when pointer
    /// tracking is disabled.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if self.settings.pointer {
            self.pointer = (x, y);
        }
    }

    /// Match the backing store to the surface layout. Returns `true` when the
    /// size changed; an unchanged layout writes nothing.
    pub fn resize(&mut self, surface: &impl Surface) -> bool {
        let (layout_w, layout_h) = surface.layout_size();
        let (view_w, view_h) = surface.viewport_size();
        let width = if layout_w == 0 { view_w } else { layout_w };
        let height = if layout_h == 0 { view_h } else { layout_h };
        if self.size == Some((width, height)) {
            return false;
        }
        self.size = Some((width, height));
        surface.set_backing_size(width, height);
        let gl = self.renderer.gl();
        gl.viewport(width as i32, height as i32);
        if height > 0 {
            self.push1f(uniforms::RATIO, width as f32 / height as f32);
        }
        debug!(width, height, "surface resized");
        true
    }

    /// Upload per-frame uniforms and draw the quad.
    pub fn render(&self, input: &FrameInput) {
        self.push1f(uniforms::TIME, input.now_ms as f32);
        let [u, v] = pointer_uv(self.pointer, self.size.unwrap_or((0, 0)));
        self.renderer
            .uniforms()
            .set2f(self.renderer.gl(), uniforms::POINTER_POSITION, u, v);
        let scroll = scroll_progress(
            input.scroll_y,
            input.viewport_height,
            self.settings.scroll_reactive,
        );
        self.push1f(uniforms::SCROLL_PROGRESS, scroll);
        self.renderer.draw();
    }

    /// Release every GPU resource and hand the context back.
    pub fn release(self) -> G {
        info!("animation destroyed");
        self.renderer.release()
    }

    fn push1f(&self, name: &str, x: f32) {
        self.renderer.uniforms().set1f(self.renderer.gl(), name, x);
    }

    fn push_base_color(&self) {
        self.renderer.uniforms().set3f(
            self.renderer.gl(),
            uniforms::BASE_COLOR,
            self.settings.base_color.normalized(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testing::RecordingGl;
    use std::cell::Cell;

    struct FakeSurface {
        layout: Cell<(u32, u32)>,
        viewport: (u32, u32),
        backing: Cell<Option<(u32, u32)>>,
    }

    impl FakeSurface {
        fn new(layout: (u32, u32)) -> Self {
            Self {
                layout: Cell::new(layout),
                viewport: (1280, 720),
                backing: Cell::new(None),
            }
        }
    }

    impl Surface for FakeSurface {
        fn layout_size(&self) -> (u32, u32) {
            self.layout.get()
        }
        fn viewport_size(&self) -> (u32, u32) {
            self.viewport
        }
        fn set_backing_size(&self, width: u32, height: u32) {
            self.backing.set(Some((width, height)));
        }
    }

    fn frame(now_ms: f64, scroll_y: f64) -> FrameInput {
        FrameInput {
            now_ms,
            scroll_y,
            viewport_height: 720.0,
        }
    }

    #[test]
    fn construction_pushes_configuration() {
        let options = Options::from_json(
            r##"{"baseColor":"#ff0000","speed":2,"scale":0.5,"pointer":false,"scrollReactive":false}"##,
        )
        .unwrap();
        let gl = RecordingGl::default();
        let mut animation = Animation::new(&gl, &options).unwrap();
        assert_eq!(gl.last_write(uniforms::BASE_COLOR), Some(vec![1.0, 0.0, 0.0]));
        assert_eq!(gl.last_write(uniforms::SPEED), Some(vec![2.0]));
        assert_eq!(gl.last_write(uniforms::SCALE), Some(vec![0.5]));

        animation.pointer_moved(100.0, 100.0);
        assert_eq!(animation.pointer(), (0.0, 0.0));

        for scroll in [0.0, 300.0, 5000.0] {
            animation.render(&frame(16.0, scroll));
            assert_eq!(gl.last_write(uniforms::SCROLL_PROGRESS), Some(vec![0.0]));
        }
    }

    #[test]
    fn explicit_triple_bypasses_hex_parsing() {
        let gl = RecordingGl::default();
        let mut animation = Animation::new(&gl, &Options::default()).unwrap();
        assert_eq!(
            gl.last_write(uniforms::BASE_COLOR),
            Some(Rgb::new(64, 128, 192).normalized().to_vec())
        );
        animation.set_color(&ColorInput::Rgb(Rgb::new(0, 255, 0))).unwrap();
        assert_eq!(gl.last_write(uniforms::BASE_COLOR), Some(vec![0.0, 1.0, 0.0]));
        assert_eq!(animation.settings().base_color, Rgb::new(0, 255, 0));
    }

    #[test]
    fn hex_and_triple_push_identical_values() {
        let gl = RecordingGl::default();
        let mut animation = Animation::new(&gl, &Options::default()).unwrap();
        for (hex, rgb) in [("#1aF", Rgb::new(0x11, 0xaa, 0xff)), ("#C0FFEE", Rgb::new(0xc0, 0xff, 0xee))] {
            animation.set_color(&hex.into()).unwrap();
            let from_hex = gl.last_write(uniforms::BASE_COLOR);
            animation.set_color(&rgb.into()).unwrap();
            assert_eq!(from_hex, gl.last_write(uniforms::BASE_COLOR), "{hex}");
        }
    }

    #[test]
    fn rejected_color_writes_nothing() {
        let gl = RecordingGl::default();
        let mut animation = Animation::new(&gl, &Options::default()).unwrap();
        gl.clear_calls();
        let err = animation.set_color(&"#12".into()).unwrap_err();
        assert!(matches!(err, Error::InvalidColor(_)));
        assert_eq!(gl.uniform_writes(), 0);
        assert_eq!(animation.settings().base_color, Rgb::default());
    }

    #[test]
    fn speed_and_scale_are_clamped_before_upload() {
        let gl = RecordingGl::default();
        let mut animation = Animation::new(&gl, &Options::default()).unwrap();

        assert_eq!(animation.set_speed(-1.0), 0.0);
        assert_eq!(gl.last_write(uniforms::SPEED), Some(vec![0.0]));
        assert_eq!(animation.set_speed(3.5), 3.5);
        assert_eq!(gl.last_write(uniforms::SPEED), Some(vec![3.5]));

        assert_eq!(animation.set_scale(0.001), 0.01);
        assert_eq!(gl.last_write(uniforms::SCALE), Some(vec![0.01]));
        assert_eq!(animation.set_scale(0.01), 0.01);
        assert_eq!(animation.set_scale(4.0), 4.0);
        assert_eq!(gl.last_write(uniforms::SCALE), Some(vec![4.0]));
        assert!(gl.writes_to(uniforms::SPEED).iter().all(|w| w[0] >= 0.0));
    }

    #[test]
    fn unchanged_layout_writes_nothing() {
        let gl = RecordingGl::default();
        let mut animation = Animation::new(&gl, &Options::default()).unwrap();
        let surface = FakeSurface::new((800, 400));

        assert!(animation.resize(&surface));
        assert_eq!(surface.backing.get(), Some((800, 400)));
        assert_eq!(gl.last_write(uniforms::RATIO), Some(vec![2.0]));

        gl.clear_calls();
        for _ in 0..3 {
            assert!(!animation.resize(&surface));
        }
        assert!(gl.calls().is_empty());

        surface.layout.set((400, 400));
        assert!(animation.resize(&surface));
        assert_eq!(gl.writes_to(uniforms::RATIO), vec![vec![1.0]]);
    }

    #[test]
    fn zero_layout_falls_back_to_viewport() {
        let gl = RecordingGl::default();
        let mut animation = Animation::new(&gl, &Options::default()).unwrap();
        let surface = FakeSurface::new((0, 300));
        animation.resize(&surface);
        assert_eq!(animation.size(), Some((1280, 300)));
    }

    #[test]
    fn frame_uploads_raw_time_pointer_and_scroll_then_draws() {
        let gl = RecordingGl::default();
        let mut animation = Animation::new(&gl, &Options::default()).unwrap();
        animation.set_speed(4.0);
        animation.resize(&FakeSurface::new((1000, 500)));
        animation.pointer_moved(250.0, 125.0);
        gl.clear_calls();

        animation.render(&frame(1234.0, 360.0));

        assert_eq!(gl.last_write(uniforms::TIME), Some(vec![1234.0]));
        assert_eq!(gl.last_write(uniforms::POINTER_POSITION), Some(vec![0.25, 0.75]));
        assert_eq!(gl.last_write(uniforms::SCROLL_PROGRESS), Some(vec![0.25]));
        assert_eq!(gl.draws(), 1);
        assert!(gl.writes_to(uniforms::SPEED).is_empty());
    }

    #[test]
    fn bad_color_option_allocates_nothing() {
        let gl = RecordingGl::default();
        let options = Options {
            base_color: "#nothex".into(),
            ..Options::default()
        };
        assert!(Animation::new(&gl, &options).is_err());
        assert_eq!(gl.live_objects(), 0);
    }

    #[test]
    fn release_frees_gpu_objects() {
        let gl = RecordingGl::default();
        let animation = Animation::new(&gl, &Options::default()).unwrap();
        assert_eq!(gl.live_objects(), 4);
        animation.release();
        assert_eq!(gl.live_objects(), 0);
    }
}
