//! Host-side fakes for the graphics context and the frame scheduler.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

use crate::frame::FrameScheduler;
use crate::gl::{GlContext, ShaderStage};
use crate::uniforms;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    UseProgram,
    BindAttribute(String),
    Uniform1f(String, f32),
    Uniform2f(String, f32, f32),
    Uniform3f(String, f32, f32, f32),
    Viewport(i32, i32),
    Draw(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Handle(u32);

/// Records every call and tracks which GL objects are still alive.
///
/// Compilation fails when a source has unbalanced brackets, which is enough
/// to simulate a syntax error.
pub struct RecordingGl {
    pub calls: RefCell<Vec<Call>>,
    pub live: RefCell<BTreeSet<Handle>>,
    pub next: Cell<u32>,
    pub declared: Vec<String>,
    pub fail_link: bool,
    pub refuse_buffer: bool,
    pub deleted_buffer_unbound: Cell<bool>,
}

impl Default for RecordingGl {
    fn default() -> Self {
        Self {
            calls: RefCell::default(),
            live: RefCell::default(),
            next: Cell::new(1),
            declared: uniforms::ALL.iter().map(|s| s.to_string()).collect(),
            fail_link: false,
            refuse_buffer: false,
            deleted_buffer_unbound: Cell::new(false),
        }
    }
}

impl RecordingGl {
    fn alloc(&self) -> Handle {
        let handle = Handle(self.next.get());
        self.next.set(handle.0 + 1);
        self.live.borrow_mut().insert(handle);
        handle
    }

    fn free(&self, handle: Handle) {
        assert!(self.live.borrow_mut().remove(&handle), "double free of {handle:?}");
    }

    fn push(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    pub fn live_objects(&self) -> usize {
        self.live.borrow().len()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Every value written to uniform `name`, in order.
    pub fn writes_to(&self, name: &str) -> Vec<Vec<f32>> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Uniform1f(n, x) if n == name => Some(vec![*x]),
                Call::Uniform2f(n, x, y) if n == name => Some(vec![*x, *y]),
                Call::Uniform3f(n, x, y, z) if n == name => Some(vec![*x, *y, *z]),
                _ => None,
            })
            .collect()
    }

    pub fn last_write(&self, name: &str) -> Option<Vec<f32>> {
        self.writes_to(name).pop()
    }

    pub fn uniform_writes(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Uniform1f(..) | Call::Uniform2f(..) | Call::Uniform3f(..)))
            .count()
    }

    pub fn draws(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Draw(_)))
            .count()
    }
}

fn balanced(source: &str) -> bool {
    let mut depth = 0i32;
    for c in source.chars() {
        match c {
            '(' | '{' => depth += 1,
            ')' | '}' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

impl GlContext for RecordingGl {
    type Shader = (Handle, Cell<bool>);
    type Program = Handle;
    type Buffer = Handle;
    type Location = String;

    fn create_shader(&self, _stage: ShaderStage) -> Option<Self::Shader> {
        Some((self.alloc(), Cell::new(false)))
    }

    fn compile_shader(&self, shader: &Self::Shader, source: &str) -> bool {
        shader.1.set(balanced(source));
        shader.1.get()
    }

    fn shader_info_log(&self, shader: &Self::Shader) -> Option<String> {
        (!shader.1.get()).then(|| "ERROR: 0:1: syntax error".to_string())
    }

    fn delete_shader(&self, shader: &Self::Shader) {
        self.free(shader.0);
    }

    fn create_program(&self) -> Option<Self::Program> {
        Some(self.alloc())
    }

    fn link_program(&self, _: &Self::Program, _: &Self::Shader, _: &Self::Shader) -> bool {
        !self.fail_link
    }

    fn program_info_log(&self, _: &Self::Program) -> Option<String> {
        self.fail_link
            .then(|| "ERROR: varying vUv not written by vertex shader".to_string())
    }

    fn use_program(&self, _: &Self::Program) {
        self.push(Call::UseProgram);
    }

    fn delete_program(&self, program: &Self::Program) {
        self.free(*program);
    }

    fn create_static_buffer(&self, data: &[f32]) -> Option<Self::Buffer> {
        assert_eq!(data.len(), 8, "quad must hold four vec2 vertices");
        (!self.refuse_buffer).then(|| self.alloc())
    }

    fn bind_vec2_attribute(&self, _: &Self::Program, name: &str) {
        self.push(Call::BindAttribute(name.to_string()));
    }

    fn delete_buffer(&self, buffer: &Self::Buffer) {
        self.deleted_buffer_unbound.set(true);
        self.free(*buffer);
    }

    fn active_uniforms(&self, _: &Self::Program) -> Vec<String> {
        self.declared.clone()
    }

    fn uniform_location(&self, _: &Self::Program, name: &str) -> Option<Self::Location> {
        self.declared.iter().any(|d| d == name).then(|| name.to_string())
    }

    fn uniform1f(&self, location: &Self::Location, x: f32) {
        self.push(Call::Uniform1f(location.clone(), x));
    }

    fn uniform2f(&self, location: &Self::Location, x: f32, y: f32) {
        self.push(Call::Uniform2f(location.clone(), x, y));
    }

    fn uniform3f(&self, location: &Self::Location, x: f32, y: f32, z: f32) {
        self.push(Call::Uniform3f(location.clone(), x, y, z));
    }

    fn viewport(&self, width: i32, height: i32) {
        self.push(Call::Viewport(width, height));
    }

    fn draw_triangle_strip(&self, vertex_count: i32) {
        self.push(Call::Draw(vertex_count));
    }
}

/// Hands out increasing ids and remembers which ones are still pending.
#[derive(Default)]
pub struct CountingScheduler {
    next: u32,
    pub pending: BTreeSet<u32>,
    pub requested: usize,
    pub cancelled: usize,
}

impl FrameScheduler for CountingScheduler {
    type Handle = u32;

    fn request(&mut self) -> Option<u32> {
        self.next += 1;
        self.requested += 1;
        self.pending.insert(self.next);
        Some(self.next)
    }

    fn cancel(&mut self, handle: u32) {
        self.cancelled += 1;
        self.pending.remove(&handle);
    }
}

impl CountingScheduler {
    /// Simulate the browser firing the oldest pending callback.
    pub fn fire(&mut self) -> Option<u32> {
        let id = *self.pending.iter().next()?;
        self.pending.remove(&id);
        Some(id)
    }
}
