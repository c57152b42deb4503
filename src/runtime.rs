mod context;
mod error;
mod image_service;
mod io_service;
mod ops_service;
mod pipeline_service;

#[cfg(test)]
mod tests;

pub use context::AppContext;
pub use error::{AppError, Result};
pub use image_service::{ImageService, ImageSummary};
pub use io_service::IoService;
pub use ops_service::OpsService;
pub use pipeline_service::PipelineService;
