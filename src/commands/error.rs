use crate::geometry::GeometryError;
use crate::model::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OpsError>;

#[derive(Debug, Error)]
pub enum OpsError {
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error("invalid operation parameters: {0}")]
    InvalidParams(String),

    #[error("invalid pixel calibration: {0}")]
    Configuration(#[from] GeometryError),

    #[error("operation cancelled after {completed} classification(s)")]
    Cancelled { completed: usize },

    #[error("object hierarchy error: {0}")]
    Core(#[from] CoreError),
}
