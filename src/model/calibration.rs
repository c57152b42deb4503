use serde::{Deserialize, Serialize};

/// Physical size of one pixel along x and y.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelCalibration {
    pub pixel_width: f64,
    pub pixel_height: f64,
    pub pixel_width_unit: String,
    pub pixel_height_unit: String,
}

impl Default for PixelCalibration {
    fn default() -> Self {
        Self::uncalibrated()
    }
}

impl PixelCalibration {
    pub const PIXEL_UNIT: &'static str = "px";

    pub fn uncalibrated() -> Self {
        Self {
            pixel_width: 1.0,
            pixel_height: 1.0,
            pixel_width_unit: Self::PIXEL_UNIT.to_string(),
            pixel_height_unit: Self::PIXEL_UNIT.to_string(),
        }
    }

    pub fn square(size: f64, unit: impl Into<String>) -> Self {
        let unit = unit.into();
        Self {
            pixel_width: size,
            pixel_height: size,
            pixel_width_unit: unit.clone(),
            pixel_height_unit: unit,
        }
    }

    pub fn units_match(&self) -> bool {
        self.pixel_width_unit == self.pixel_height_unit
    }

    pub fn has_valid_sizes(&self) -> bool {
        self.pixel_width.is_finite()
            && self.pixel_height.is_finite()
            && self.pixel_width > 0.0
            && self.pixel_height > 0.0
    }

    /// Unit used for 2D distances. Only meaningful when [`Self::units_match`].
    pub fn unit(&self) -> &str {
        &self.pixel_width_unit
    }

    pub fn scale(&self) -> (f64, f64) {
        (self.pixel_width, self.pixel_height)
    }
}
