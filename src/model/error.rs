use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("duplicate object id {0}")]
    DuplicateObjectId(u64),

    #[error("object {id} lies on plane z={z}, t={t} outside the image ({size_z} z-slices, {size_t} timepoints)")]
    PlaneOutOfRange {
        id: u64,
        z: usize,
        t: usize,
        size_z: usize,
        size_t: usize,
    },

    #[error("invalid classification name: {0:?}")]
    InvalidClassification(String),

    #[error("invalid image data: {0}")]
    InvalidImageData(String),
}
