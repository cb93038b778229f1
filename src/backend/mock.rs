//! Recording driver used by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::{Backend, ShaderStage};

pub const SYNTAX_ERROR_LOG: &str = "0:1(1): error: syntax error, unexpected IDENTIFIER";
pub const LINK_ERROR_LOG: &str = "error: linking with uncompiled/unspecialized shader";

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage, u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(Option<u32>),
    UniformMatrix4(Option<i32>, [f32; 16]),
    VertexAttribPointer { index: u32, size: i32, stride: i32, offset: i32 },
    EnableVertexAttribArray(u32),
}

/// Shaders fail to compile when their source contains `@error`. Programs fail to
/// link while `fail_link` is set. Uniform and attribute locations are derived
/// from the declarations in the attached sources.
#[derive(Default)]
pub struct MockGl {
    next_id: Cell<u32>,
    calls: RefCell<Vec<Call>>,
    sources: RefCell<HashMap<u32, (ShaderStage, String)>>,
    attached: RefCell<HashMap<u32, Vec<u32>>>,
    pub fail_link: Cell<bool>,
    pub empty_logs: Cell<bool>,
}

impl MockGl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, f: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| f(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn alloc(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    /// `(qualifier, type, name)` for every top level declaration of the source.
    fn declarations(source: &str) -> Vec<(String, String, String)> {
        source
            .split(|c| c == ';' || c == '{' || c == '}')
            .filter_map(|stmt| {
                let stmt = stmt.rsplit('\n').next().unwrap_or(stmt);
                let words: Vec<_> = stmt.split_whitespace().collect();
                match words.as_slice() {
                    [qualifier, ty, name] => Some((qualifier.to_string(), ty.to_string(), name.to_string())),
                    _ => None,
                }
            })
            .collect()
    }

    fn stage_sources(&self, program: u32, stage: ShaderStage) -> Vec<String> {
        let attached = self.attached.borrow();
        let sources = self.sources.borrow();
        attached
            .get(&program)
            .into_iter()
            .flatten()
            .filter_map(|shader| sources.get(shader))
            .filter(|(s, _)| *s == stage)
            .map(|(_, src)| src.clone())
            .collect()
    }
}

impl Backend for MockGl {
    type Shader = u32;
    type Program = u32;
    type UniformLocation = i32;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let id = self.alloc();
        self.sources.borrow_mut().insert(id, (stage, String::new()));
        self.record(Call::CreateShader(stage, id));
        Ok(id)
    }
    fn shader_source(&self, shader: u32, source: &str) {
        if let Some(entry) = self.sources.borrow_mut().get_mut(&shader) {
            entry.1 = source.to_string();
        }
    }
    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
    }
    fn shader_compile_status(&self, shader: u32) -> bool {
        self.sources
            .borrow()
            .get(&shader)
            .map_or(false, |(_, src)| !src.contains("@error"))
    }
    fn shader_info_log(&self, _shader: u32) -> String {
        if self.empty_logs.get() { String::new() } else { SYNTAX_ERROR_LOG.to_string() }
    }
    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let id = self.alloc();
        self.record(Call::CreateProgram(id));
        Ok(id)
    }
    fn attach_shader(&self, program: u32, shader: u32) {
        self.attached.borrow_mut().entry(program).or_default().push(shader);
        self.record(Call::AttachShader(program, shader));
    }
    fn detach_shader(&self, program: u32, shader: u32) {
        self.record(Call::DetachShader(program, shader));
    }
    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }
    fn program_link_status(&self, _program: u32) -> bool {
        !self.fail_link.get()
    }
    fn program_info_log(&self, _program: u32) -> String {
        if self.empty_logs.get() { String::new() } else { LINK_ERROR_LOG.to_string() }
    }
    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
    }
    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<i32> {
        let mut uniforms = Vec::new();
        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            for src in self.stage_sources(program, stage) {
                uniforms.extend(
                    Self::declarations(&src)
                        .into_iter()
                        .filter(|(q, _, _)| q == "uniform")
                        .map(|(_, _, n)| n),
                );
            }
        }
        uniforms.iter().position(|n| n == name).map(|i| i as i32)
    }
    fn uniform_matrix_4(&self, location: Option<&i32>, columns: &[f32; 16]) {
        self.record(Call::UniformMatrix4(location.copied(), *columns));
    }

    fn attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        self.stage_sources(program, ShaderStage::Vertex)
            .iter()
            .flat_map(|src| Self::declarations(src))
            .filter(|(q, _, _)| q == "in")
            .position(|(_, _, n)| n == name)
            .map(|i| i as u32)
    }
    fn vertex_attrib_pointer_f32(&self, index: u32, size: i32, stride: i32, offset: i32) {
        self.record(Call::VertexAttribPointer { index, size, stride, offset });
    }
    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }
}
