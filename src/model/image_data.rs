use super::{CoreError, Hierarchy, PixelCalibration, Plane, Result};

/// An image's calibration and dimensions together with its object hierarchy.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub name: Option<String>,
    pub calibration: PixelCalibration,
    pub size_z: usize,
    pub size_t: usize,
    pub hierarchy: Hierarchy,
}

impl Default for ImageData {
    fn default() -> Self {
        Self {
            name: None,
            calibration: PixelCalibration::default(),
            size_z: 1,
            size_t: 1,
            hierarchy: Hierarchy::new(),
        }
    }
}

impl ImageData {
    pub fn new(calibration: PixelCalibration, hierarchy: Hierarchy) -> Self {
        Self {
            calibration,
            hierarchy,
            ..Self::default()
        }
    }

    pub fn with_planes(mut self, size_z: usize, size_t: usize) -> Self {
        self.size_z = size_z;
        self.size_t = size_t;
        self
    }

    pub fn is_multi_plane(&self) -> bool {
        self.size_z > 1 || self.size_t > 1
    }

    pub fn contains_plane(&self, plane: Plane) -> bool {
        plane.z < self.size_z && plane.t < self.size_t
    }

    pub fn validate(&self) -> Result<()> {
        if self.size_z == 0 || self.size_t == 0 {
            return Err(CoreError::InvalidImageData(format!(
                "plane counts must be positive (size_z={}, size_t={})",
                self.size_z, self.size_t
            )));
        }
        for object in self.hierarchy.objects() {
            if !self.contains_plane(object.plane) {
                return Err(CoreError::PlaneOutOfRange {
                    id: object.id,
                    z: object.plane.z,
                    t: object.plane.t,
                    size_z: self.size_z,
                    size_t: self.size_t,
                });
            }
        }
        Ok(())
    }
}
