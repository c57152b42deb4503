use crate::model::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IoError>;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON decode/encode failure: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML decode/encode failure: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid object hierarchy: {0}")]
    Core(#[from] CoreError),
}
