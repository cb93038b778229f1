use std::rc::Rc;

use cgmath::Matrix4;

use crate::backend::Backend;
use crate::cache::ProgramCache;
use crate::config::ProgramNames;
use crate::error::ShaderError;
use crate::shader::{Glsl, ProgramHandle, ShaderCompiler};
use crate::vertex::{Vertex, COLOR_COMPONENTS, COLOR_OFFSET, POSITION_COMPONENTS, POSITION_OFFSET};

pub const DEFAULT_VERTEX_SHADER: &str = concat!(
    "#version 150\n",
    "in vec3 vertex;",
    "in vec4 color;",
    "uniform mat4 u_matrix;",
    "out vec4 f_color;",
    "void main()",
    "{",
    "    gl_Position = u_matrix * vec4(vertex.xyz, 1.0);",
    "    f_color = color;",
    "}",
);

pub const DEFAULT_FRAGMENT_SHADER: &str = concat!(
    "#version 150\n",
    "in vec4 f_color;",
    "out vec4 color;",
    "void main()",
    "{",
    "   color = f_color;",
    "}",
);

/// A vertex/fragment program drawing interleaved position + color vertices
/// through a single matrix uniform.
pub struct ShaderProgram<B: Backend, C = Glsl> {
    gl: Rc<B>,
    compiler: C,
    names: ProgramNames,
    program: Option<Rc<ProgramHandle<B>>>,
    matrix_uniform: Option<B::UniformLocation>,
}

impl<B: Backend> ShaderProgram<B> {
    pub fn new(gl: Rc<B>) -> Self {
        Self::with_names(gl, ProgramNames::default())
    }

    pub fn with_names(gl: Rc<B>, names: ProgramNames) -> Self {
        Self::with_compiler(gl, Glsl, names)
    }
}

impl<B: Backend, C: ShaderCompiler<B>> ShaderProgram<B, C> {
    pub fn with_compiler(gl: Rc<B>, compiler: C, names: ProgramNames) -> Self {
        Self { gl, compiler, names, program: None, matrix_uniform: None }
    }

    pub fn names(&self) -> &ProgramNames {
        &self.names
    }

    /// Takes effect on the next compile for the matrix uniform, and on the next
    /// `setup_attributes` for the attributes.
    pub fn set_names(&mut self, names: ProgramNames) {
        self.names = names;
    }

    pub fn id(&self) -> Option<B::Program> {
        self.program.as_ref().map(|p| p.raw())
    }

    pub fn is_compiled(&self) -> bool {
        self.program.is_some()
    }

    pub fn matrix_uniform(&self) -> Option<&B::UniformLocation> {
        self.matrix_uniform.as_ref()
    }

    /// Compiles and links `vertex` and `fragment`, replacing the current program.
    ///
    /// On failure the driver log has already been written to the error log and the
    /// current program, if any, is kept.
    pub fn compile(&mut self, vertex: &str, fragment: &str) -> Result<(), ShaderError> {
        let program = self.compiler.compile(&self.gl, vertex, fragment)?;
        self.attach(Rc::new(program));
        Ok(())
    }

    /// Uses the embedded default shader, compiling it into `cache` the first time
    /// any program asks for it.
    pub fn compile_default_shader(&mut self, cache: &mut ProgramCache<B>) -> Result<(), ShaderError> {
        let program = cache.get_or_compile(
            &self.gl,
            &self.compiler,
            DEFAULT_VERTEX_SHADER,
            DEFAULT_FRAGMENT_SHADER,
        )?;
        self.attach(program);
        Ok(())
    }

    fn attach(&mut self, program: Rc<ProgramHandle<B>>) {
        self.matrix_uniform = self.gl.uniform_location(program.raw(), &self.names.matrix_uniform);
        if self.matrix_uniform.is_none() {
            log::warn!(
                "program {:?} has no active uniform {:?}",
                program.raw(),
                self.names.matrix_uniform
            );
        }
        self.program = Some(program);
    }

    fn raw(&self, op: &str) -> Option<B::Program> {
        let raw = self.id();
        if raw.is_none() {
            log::warn!("{} called before the program was compiled", op);
        }
        raw
    }

    pub fn use_program(&self) {
        if let Some(raw) = self.raw("use_program") {
            self.gl.use_program(Some(raw));
        }
    }

    /// Binds the program and uploads `matrix` to the matrix uniform.
    pub fn setup_matrices(&self, matrix: &Matrix4<f32>) {
        if self.raw("setup_matrices").is_none() {
            return;
        }
        self.use_program();

        let columns: [[f32; 4]; 4] = (*matrix).into();
        let mut flat = [0.0f32; 16];
        for (dst, src) in flat.chunks_exact_mut(4).zip(columns.iter()) {
            dst.copy_from_slice(src);
        }
        self.gl.uniform_matrix_4(self.matrix_uniform.as_ref(), &flat);
    }

    /// Points the position and color attributes at the currently bound vertex
    /// buffer, which must hold [`Vertex`] records.
    pub fn setup_attributes(&self) {
        let Some(raw) = self.raw("setup_attributes") else {
            return;
        };
        let stride = std::mem::size_of::<Vertex>() as i32;

        let attributes = [
            (&self.names.vertex_attribute, POSITION_COMPONENTS, POSITION_OFFSET),
            (&self.names.color_attribute, COLOR_COMPONENTS, COLOR_OFFSET),
        ];
        for (name, components, offset) in attributes {
            match self.gl.attrib_location(raw, name) {
                Some(index) => {
                    self.gl.vertex_attrib_pointer_f32(index, components as i32, stride, offset as i32);
                    self.gl.enable_vertex_attrib_array(index);
                }
                None => log::warn!("program {:?} has no active attribute {:?}", raw, name),
            }
        }
    }
}
