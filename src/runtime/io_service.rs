use std::path::Path;

use crate::formats::{export_measurements, read_image_data, write_image_data};
use crate::model::{ImageData, ObjectKind};

use super::Result;

#[derive(Debug, Default, Clone, Copy)]
pub struct IoService;

impl IoService {
    pub fn read(&self, path: impl AsRef<Path>) -> Result<ImageData> {
        Ok(read_image_data(path)?)
    }

    pub fn write(&self, path: impl AsRef<Path>, image: &ImageData) -> Result<()> {
        write_image_data(path, image)?;
        Ok(())
    }

    pub fn export(
        &self,
        path: impl AsRef<Path>,
        image: &ImageData,
        kind: Option<ObjectKind>,
    ) -> Result<()> {
        export_measurements(path, image, kind)?;
        Ok(())
    }
}
