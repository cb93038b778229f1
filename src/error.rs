use std::path::PathBuf;

use thiserror::Error;

use crate::backend::ShaderStage;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("cannot create {stage} shader: {reason}")]
    CreateShader { stage: ShaderStage, reason: String },
    #[error("vertex shader failed to compile: {log}")]
    VertexCompile { log: String },
    #[error("fragment shader failed to compile: {log}")]
    FragmentCompile { log: String },
    #[error("cannot create program: {0}")]
    CreateProgram(String),
    #[error("program failed to link: {log}")]
    Link { log: String },
}

impl ShaderError {
    pub fn compile(stage: ShaderStage, log: String) -> Self {
        match stage {
            ShaderStage::Vertex => ShaderError::VertexCompile { log },
            ShaderStage::Fragment => ShaderError::FragmentCompile { log },
        }
    }

    /// The driver's diagnostic output, if the failure came with one.
    pub fn log(&self) -> Option<&str> {
        match self {
            ShaderError::VertexCompile { log }
            | ShaderError::FragmentCompile { log }
            | ShaderError::Link { log } => Some(log),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid yaml in {path}: {source}")]
    Yaml { path: PathBuf, source: serde_yaml::Error },
    #[error("invalid json in {path}: {source}")]
    Json { path: PathBuf, source: serde_json::Error },
    #[error("unknown config format for {0}, expected .yml, .yaml or .json")]
    UnknownFormat(PathBuf),
}
