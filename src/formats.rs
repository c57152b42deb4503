mod api;
mod document;
mod error;
mod table;
mod util;


pub use api::{read_image_data, supported_formats, write_image_data};
pub use document::ImageDocument;
pub use error::{IoError, Result};
pub use table::{Delimiter, export_measurements, measurement_table};
