//! Program compilation, quad geometry and uniform resolution.

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::gl::{GlContext, ShaderStage};
use crate::uniforms::UniformTable;

/// Two triangles sharing a diagonal, drawn as a strip over clip space.
pub const QUAD: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];
pub const QUAD_VERTICES: i32 = 4;
pub const POSITION_ATTRIBUTE: &str = "a_position";

#[derive(Debug, Clone, Copy)]
pub struct ShaderSources<'a> {
    pub vertex: &'a str,
    pub fragment: &'a str,
}

impl ShaderSources<'static> {
    pub const NEURAL: Self = Self {
        vertex: include_str!("shaders/neural.vert"),
        fragment: include_str!("shaders/neural.frag"),
    };
}

/// GPU resources owned by one animation. Released by [`Renderer::release`].
pub struct Renderer<G: GlContext> {
    gl: G,
    vertex: G::Shader,
    fragment: G::Shader,
    program: G::Program,
    quad: G::Buffer,
    uniforms: UniformTable<G::Location>,
}

impl<G: GlContext> Renderer<G> {
    /// Build a ready-to-draw renderer, or release everything created so far
    /// and report why it could not be built.
    pub fn new(gl: G, sources: ShaderSources<'_>) -> Result<Self> {
        let vertex = compile(&gl, ShaderStage::Vertex, sources.vertex)?;
        let fragment = match compile(&gl, ShaderStage::Fragment, sources.fragment) {
            Ok(shader) => shader,
            Err(e) => {
                gl.delete_shader(&vertex);
                return Err(e);
            }
        };
        let program = match link(&gl, &vertex, &fragment) {
            Ok(program) => program,
            Err(e) => {
                gl.delete_shader(&vertex);
                gl.delete_shader(&fragment);
                return Err(e);
            }
        };
        gl.use_program(&program);

        let Some(quad) = gl.create_static_buffer(&QUAD) else {
            gl.delete_program(&program);
            gl.delete_shader(&vertex);
            gl.delete_shader(&fragment);
            return Err(Error::OutOfResources("vertex buffer"));
        };
        gl.bind_vec2_attribute(&program, POSITION_ATTRIBUTE);

        let uniforms = UniformTable::resolve(&gl, &program);
        info!(uniforms = uniforms.len(), "shader program ready");

        Ok(Self {
            gl,
            vertex,
            fragment,
            program,
            quad,
            uniforms,
        })
    }

    pub fn gl(&self) -> &G {
        &self.gl
    }

    pub fn uniforms(&self) -> &UniformTable<G::Location> {
        &self.uniforms
    }

    pub fn draw(&self) {
        self.gl.draw_triangle_strip(QUAD_VERTICES);
    }

    /// Delete the buffer, program and both shaders. Consumes the renderer so
    /// nothing can be released twice.
    pub fn release(self) -> G {
        self.gl.delete_buffer(&self.quad);
        self.gl.delete_program(&self.program);
        self.gl.delete_shader(&self.vertex);
        self.gl.delete_shader(&self.fragment);
        debug!("released GPU resources");
        self.gl
    }
}

fn compile<G: GlContext>(gl: &G, stage: ShaderStage, source: &str) -> Result<G::Shader> {
    let shader = gl
        .create_shader(stage)
        .ok_or(Error::OutOfResources("shader"))?;
    if gl.compile_shader(&shader, source) {
        return Ok(shader);
    }
    let log = gl
        .shader_info_log(&shader)
        .filter(|log| !log.is_empty())
        .unwrap_or_else(|| "shader compile error".to_owned());
    gl.delete_shader(&shader);
    Err(Error::ShaderCompile { stage, log })
}

fn link<G: GlContext>(gl: &G, vertex: &G::Shader, fragment: &G::Shader) -> Result<G::Program> {
    let program = gl
        .create_program()
        .ok_or(Error::OutOfResources("program"))?;
    if gl.link_program(&program, vertex, fragment) {
        return Ok(program);
    }
    let log = gl
        .program_info_log(&program)
        .filter(|log| !log.is_empty())
        .unwrap_or_else(|| "program link error".to_owned());
    gl.delete_program(&program);
    Err(Error::ProgramLink { log })
}
