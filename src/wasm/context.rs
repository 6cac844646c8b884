use js_sys::Float32Array;
use web_sys::{
    WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader, WebGlUniformLocation,
};

use crate::gl::{GlContext, ShaderStage};

impl GlContext for GL {
    type Shader = WebGlShader;
    type Program = WebGlProgram;
    type Buffer = WebGlBuffer;
    type Location = WebGlUniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Option<WebGlShader> {
        let kind = match stage {
            ShaderStage::Vertex => GL::VERTEX_SHADER,
            ShaderStage::Fragment => GL::FRAGMENT_SHADER,
        };
        GL::create_shader(self, kind)
    }

    fn compile_shader(&self, shader: &WebGlShader, source: &str) -> bool {
        self.shader_source(shader, source);
        GL::compile_shader(self, shader);
        self.get_shader_parameter(shader, GL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: &WebGlShader) -> Option<String> {
        self.get_shader_info_log(shader)
    }

    fn delete_shader(&self, shader: &WebGlShader) {
        GL::delete_shader(self, Some(shader));
    }

    fn create_program(&self) -> Option<WebGlProgram> {
        GL::create_program(self)
    }

    fn link_program(&self, program: &WebGlProgram, vertex: &WebGlShader, fragment: &WebGlShader) -> bool {
        self.attach_shader(program, vertex);
        self.attach_shader(program, fragment);
        GL::link_program(self, program);
        self.get_program_parameter(program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: &WebGlProgram) -> Option<String> {
        self.get_program_info_log(program)
    }

    fn use_program(&self, program: &WebGlProgram) {
        GL::use_program(self, Some(program));
    }

    fn delete_program(&self, program: &WebGlProgram) {
        GL::delete_program(self, Some(program));
    }

    fn create_static_buffer(&self, data: &[f32]) -> Option<WebGlBuffer> {
        let buffer = self.create_buffer()?;
        self.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let vertices = Float32Array::from(data);
        self.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &vertices, GL::STATIC_DRAW);
        Some(buffer)
    }

    fn bind_vec2_attribute(&self, program: &WebGlProgram, name: &str) {
        let location = self.get_attrib_location(program, name);
        // -1 when the attribute is unused by the linked program
        if location < 0 {
            return;
        }
        let location = location as u32;
        self.enable_vertex_attrib_array(location);
        self.vertex_attrib_pointer_with_i32(location, 2, GL::FLOAT, false, 0, 0);
    }

    fn delete_buffer(&self, buffer: &WebGlBuffer) {
        self.bind_buffer(GL::ARRAY_BUFFER, None);
        GL::delete_buffer(self, Some(buffer));
    }

    fn active_uniforms(&self, program: &WebGlProgram) -> Vec<String> {
        let count = self
            .get_program_parameter(program, GL::ACTIVE_UNIFORMS)
            .as_f64()
            .unwrap_or(0.0) as u32;
        (0..count)
            .filter_map(|index| self.get_active_uniform(program, index))
            .map(|info| info.name())
            .collect()
    }

    fn uniform_location(&self, program: &WebGlProgram, name: &str) -> Option<WebGlUniformLocation> {
        self.get_uniform_location(program, name)
    }

    fn uniform1f(&self, location: &WebGlUniformLocation, x: f32) {
        GL::uniform1f(self, Some(location), x);
    }

    fn uniform2f(&self, location: &WebGlUniformLocation, x: f32, y: f32) {
        GL::uniform2f(self, Some(location), x, y);
    }

    fn uniform3f(&self, location: &WebGlUniformLocation, x: f32, y: f32, z: f32) {
        GL::uniform3f(self, Some(location), x, y, z);
    }

    fn viewport(&self, width: i32, height: i32) {
        GL::viewport(self, 0, 0, width, height);
    }

    fn draw_triangle_strip(&self, vertex_count: i32) {
        self.draw_arrays(GL::TRIANGLE_STRIP, 0, vertex_count);
    }
}
