use std::rc::Rc;

use crate::backend::{Backend, ShaderStage};
use crate::error::ShaderError;

/// A linked program. Deleted when dropped.
pub struct ProgramHandle<B: Backend> {
    gl: Rc<B>,
    raw: B::Program,
}

impl<B: Backend> ProgramHandle<B> {
    fn new(gl: &Rc<B>, raw: B::Program) -> Self {
        Self { gl: Rc::clone(gl), raw }
    }

    pub fn raw(&self) -> B::Program {
        self.raw
    }
}

impl<B: Backend> Drop for ProgramHandle<B> {
    fn drop(&mut self) {
        log::debug!("deleting program {:?}", self.raw);
        self.gl.delete_program(self.raw);
    }
}

impl<B: Backend> std::fmt::Debug for ProgramHandle<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ProgramHandle").field(&self.raw).finish()
    }
}

struct ShaderObject<'a, B: Backend> {
    gl: &'a B,
    raw: B::Shader,
}

impl<B: Backend> Drop for ShaderObject<'_, B> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.raw);
    }
}

/// Turns a vertex/fragment source pair into a linked program.
pub trait ShaderCompiler<B: Backend> {
    fn compile(&self, gl: &Rc<B>, vertex: &str, fragment: &str) -> Result<ProgramHandle<B>, ShaderError>;
}

/// Compiles GLSL through the driver.
#[derive(Clone, Copy, Debug, Default)]
pub struct Glsl;

impl<B: Backend> ShaderCompiler<B> for Glsl {
    fn compile(&self, gl: &Rc<B>, vertex: &str, fragment: &str) -> Result<ProgramHandle<B>, ShaderError> {
        let shader_sources = [
            (ShaderStage::Vertex, vertex),
            (ShaderStage::Fragment, fragment),
        ];

        let mut shaders = Vec::with_capacity(shader_sources.len());
        for (stage, source) in shader_sources {
            let raw = gl
                .create_shader(stage)
                .map_err(|reason| ShaderError::CreateShader { stage, reason })?;
            let shader = ShaderObject { gl: &**gl, raw };
            gl.shader_source(shader.raw, source);
            gl.compile_shader(shader.raw);
            if !gl.shader_compile_status(shader.raw) {
                let info = gl.shader_info_log(shader.raw);
                log::error!("{} shader: {}", stage, info);
                return Err(ShaderError::compile(stage, info));
            }
            shaders.push(shader);
        }

        let program = gl.create_program().map_err(ShaderError::CreateProgram)?;
        let program = ProgramHandle::new(gl, program);
        for shader in &shaders {
            gl.attach_shader(program.raw, shader.raw);
        }

        gl.link_program(program.raw);
        if !gl.program_link_status(program.raw) {
            let info = gl.program_info_log(program.raw);
            log::error!("program: {}", info);
            return Err(ShaderError::Link { log: info });
        }

        for shader in &shaders {
            gl.detach_shader(program.raw, shader.raw);
        }
        log::debug!("linked program {:?}", program.raw);

        Ok(program)
    }
}
