use serde::{Deserialize, Serialize};

use crate::model::{Hierarchy, ImageData, PathObject, PixelCalibration};

use super::Result;

fn one() -> usize {
    1
}

/// On-disk layout of an image's calibration and object hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub calibration: PixelCalibration,
    #[serde(default = "one")]
    pub size_z: usize,
    #[serde(default = "one")]
    pub size_t: usize,
    #[serde(default)]
    pub objects: Vec<PathObject>,
}

impl ImageDocument {
    pub fn from_image_data(image: &ImageData) -> Self {
        Self {
            name: image.name.clone(),
            calibration: image.calibration.clone(),
            size_z: image.size_z,
            size_t: image.size_t,
            objects: image.hierarchy.objects().cloned().collect(),
        }
    }

    pub fn into_image_data(self) -> Result<ImageData> {
        let hierarchy = Hierarchy::from_objects(self.objects)?;
        let image = ImageData {
            name: self.name,
            calibration: self.calibration,
            size_z: self.size_z,
            size_t: self.size_t,
            hierarchy,
        };
        image.validate()?;
        Ok(image)
    }
}
