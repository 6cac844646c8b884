use std::collections::HashMap;

use tracing::debug;

use crate::gl::GlContext;

pub const TIME: &str = "u_time";
pub const RATIO: &str = "u_ratio";
pub const POINTER_POSITION: &str = "u_pointer_position";
pub const SCROLL_PROGRESS: &str = "u_scroll_progress";
pub const BASE_COLOR: &str = "u_base_color";
pub const SPEED: &str = "u_speed";
pub const SCALE: &str = "u_scale";

/// Every uniform the bundled fragment shader declares.
pub const ALL: [&str; 7] = [
    TIME,
    RATIO,
    POINTER_POSITION,
    SCROLL_PROGRESS,
    BASE_COLOR,
    SPEED,
    SCALE,
];

/// Uniform locations keyed by name, filled once from program introspection.
///
/// Writes to names the program does not declare (or that the driver optimized
/// away) are dropped, the same as writing to a null location in WebGL.
pub struct UniformTable<L> {
    locations: HashMap<String, L>,
}

impl<L> UniformTable<L> {
    pub fn resolve<G>(gl: &G, program: &G::Program) -> Self
    where
        G: GlContext<Location = L>,
    {
        let locations: HashMap<_, _> = gl
            .active_uniforms(program)
            .into_iter()
            .filter_map(|name| {
                let location = gl.uniform_location(program, &name)?;
                Some((name, location))
            })
            .collect();
        debug!(count = locations.len(), "resolved active uniforms");
        Self { locations }
    }

    pub fn get(&self, name: &str) -> Option<&L> {
        self.locations.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.locations.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn set1f<G: GlContext<Location = L>>(&self, gl: &G, name: &str, x: f32) {
        if let Some(location) = self.get(name) {
            gl.uniform1f(location, x);
        }
    }

    pub fn set2f<G: GlContext<Location = L>>(&self, gl: &G, name: &str, x: f32, y: f32) {
        if let Some(location) = self.get(name) {
            gl.uniform2f(location, x, y);
        }
    }

    pub fn set3f<G: GlContext<Location = L>>(&self, gl: &G, name: &str, [x, y, z]: [f32; 3]) {
        if let Some(location) = self.get(name) {
            gl.uniform3f(location, x, y, z);
        }
    }
}
