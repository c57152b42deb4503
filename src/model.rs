mod calibration;
mod classification;
mod error;
mod hierarchy;
mod image_data;
mod measurements;
mod object;
mod plane;
mod roi;


pub use calibration::PixelCalibration;
pub use classification::Classification;
pub use error::{CoreError, Result};
pub use hierarchy::{Hierarchy, HierarchyEvent, HierarchyListener, LoggingListener};
pub use image_data::ImageData;
pub use measurements::{MeasurementList, MeasurementWriter};
pub use object::{ObjectKind, PathObject};
pub use plane::Plane;
pub use roi::{Roi, RoiKind};
