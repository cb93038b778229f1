//! Compiles and binds a GLSL vertex/fragment program drawing interleaved
//! position + color vertices through one matrix uniform.

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod program;
pub mod shader;
pub mod vertex;

pub use backend::{Backend, ShaderStage};
pub use cache::{ProgramCache, SourceId};
pub use config::ProgramNames;
pub use error::{ConfigError, ShaderError};
pub use program::{ShaderProgram, DEFAULT_FRAGMENT_SHADER, DEFAULT_VERTEX_SHADER};
pub use shader::{Glsl, ProgramHandle, ShaderCompiler};
pub use vertex::Vertex;
