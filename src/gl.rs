//! The slice of a WebGL-style context the animation needs.
//!
//! Implemented for `WebGl2RenderingContext` on wasm32; tests use a recording
//! fake so setup and per-frame behavior can be checked on the host.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

pub trait GlContext {
    type Shader;
    type Program;
    type Buffer;
    type Location;

    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader>;
    /// Upload `source` and compile. Returns the compile status.
    fn compile_shader(&self, shader: &Self::Shader, source: &str) -> bool;
    fn shader_info_log(&self, shader: &Self::Shader) -> Option<String>;
    fn delete_shader(&self, shader: &Self::Shader);

    fn create_program(&self) -> Option<Self::Program>;
    /// Attach both shaders and link. Returns the link status.
    fn link_program(
        &self,
        program: &Self::Program,
        vertex: &Self::Shader,
        fragment: &Self::Shader,
    ) -> bool;
    fn program_info_log(&self, program: &Self::Program) -> Option<String>;
    fn use_program(&self, program: &Self::Program);
    fn delete_program(&self, program: &Self::Program);

    /// Create an `ARRAY_BUFFER`, leave it bound and fill it with `STATIC_DRAW` data.
    fn create_static_buffer(&self, data: &[f32]) -> Option<Self::Buffer>;
    /// Point attribute `name` at the bound buffer as tightly packed `vec2`s.
    fn bind_vec2_attribute(&self, program: &Self::Program, name: &str);
    /// Unbind from `ARRAY_BUFFER` and delete.
    fn delete_buffer(&self, buffer: &Self::Buffer);

    /// Names of every active uniform the linked program declares.
    fn active_uniforms(&self, program: &Self::Program) -> Vec<String>;
    fn uniform_location(&self, program: &Self::Program, name: &str) -> Option<Self::Location>;

    fn uniform1f(&self, location: &Self::Location, x: f32);
    fn uniform2f(&self, location: &Self::Location, x: f32, y: f32);
    fn uniform3f(&self, location: &Self::Location, x: f32, y: f32, z: f32);

    fn viewport(&self, width: i32, height: i32);
    fn draw_triangle_strip(&self, vertex_count: i32);
}

impl<T: GlContext> GlContext for &T {
    type Shader = T::Shader;
    type Program = T::Program;
    type Buffer = T::Buffer;
    type Location = T::Location;

    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader> {
        (**self).create_shader(stage)
    }

    fn compile_shader(&self, shader: &Self::Shader, source: &str) -> bool {
        (**self).compile_shader(shader, source)
    }

    fn shader_info_log(&self, shader: &Self::Shader) -> Option<String> {
        (**self).shader_info_log(shader)
    }

    fn delete_shader(&self, shader: &Self::Shader) {
        (**self).delete_shader(shader)
    }

    fn create_program(&self) -> Option<Self::Program> {
        (**self).create_program()
    }

    fn link_program(
        &self,
        program: &Self::Program,
        vertex: &Self::Shader,
        fragment: &Self::Shader,
    ) -> bool {
        (**self).link_program(program, vertex, fragment)
    }

    fn program_info_log(&self, program: &Self::Program) -> Option<String> {
        (**self).program_info_log(program)
    }

    fn use_program(&self, program: &Self::Program) {
        (**self).use_program(program)
    }

    fn delete_program(&self, program: &Self::Program) {
        (**self).delete_program(program)
    }

    fn create_static_buffer(&self, data: &[f32]) -> Option<Self::Buffer> {
        (**self).create_static_buffer(data)
    }

    fn bind_vec2_attribute(&self, program: &Self::Program, name: &str) {
        (**self).bind_vec2_attribute(program, name)
    }

    fn delete_buffer(&self, buffer: &Self::Buffer) {
        (**self).delete_buffer(buffer)
    }

    fn active_uniforms(&self, program: &Self::Program) -> Vec<String> {
        (**self).active_uniforms(program)
    }

    fn uniform_location(&self, program: &Self::Program, name: &str) -> Option<Self::Location> {
        (**self).uniform_location(program, name)
    }

    fn uniform1f(&self, location: &Self::Location, x: f32) {
        (**self).uniform1f(location, x)
    }

    fn uniform2f(&self, location: &Self::Location, x: f32, y: f32) {
        (**self).uniform2f(location, x, y)
    }

    fn uniform3f(&self, location: &Self::Location, x: f32, y: f32, z: f32) {
        (**self).uniform3f(location, x, y, z)
    }

    fn viewport(&self, width: i32, height: i32) {
        (**self).viewport(width, height)
    }

    fn draw_triangle_strip(&self, vertex_count: i32) {
        (**self).draw_triangle_strip(vertex_count)
    }
}
