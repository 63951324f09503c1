//! Error types for scene loading

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse scene JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
