use std::path::Path;

use serde_derive::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_matrix_uniform() -> String {
    "u_matrix".to_string()
}

fn default_vertex_attribute() -> String {
    "vertex".to_string()
}

fn default_color_attribute() -> String {
    "color".to_string()
}

/// Names a [`ShaderProgram`](crate::ShaderProgram) looks up after linking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramNames {
    #[serde(default = "default_matrix_uniform")]
    pub matrix_uniform: String,
    #[serde(default = "default_vertex_attribute")]
    pub vertex_attribute: String,
    #[serde(default = "default_color_attribute")]
    pub color_attribute: String,
}

impl Default for ProgramNames {
    fn default() -> Self {
        Self {
            matrix_uniform: default_matrix_uniform(),
            vertex_attribute: default_vertex_attribute(),
            color_attribute: default_color_attribute(),
        }
    }
}

impl ProgramNames {
    /// Reads names from a `.yml`/`.yaml` or `.json` file. Missing keys keep their
    /// defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        if !matches!(ext, "yml" | "yaml" | "json") {
            return Err(ConfigError::UnknownFormat(path.to_path_buf()));
        }

        let data = std::fs::read(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        if ext == "json" {
            Self::from_json(&data).map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })
        } else {
            Self::from_yaml(&data).map_err(|source| ConfigError::Yaml { path: path.to_path_buf(), source })
        }
    }

    pub fn from_yaml(data: &[u8]) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_slice(data)
    }

    pub fn from_json(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }
}
