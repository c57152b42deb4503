use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeometryError>;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("pixel width unit `{width_unit}` does not match pixel height unit `{height_unit}`")]
    UnitMismatch {
        width_unit: String,
        height_unit: String,
    },

    #[error("pixel size must be finite and positive (width={width}, height={height})")]
    InvalidPixelSize { width: f64, height: f64 },
}
