use serde::{Deserialize, Serialize};

/// A single 2D section of a multi-dimensional image.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Plane {
    #[serde(default)]
    pub z: usize,
    #[serde(default)]
    pub t: usize,
}

impl Plane {
    pub const DEFAULT: Plane = Plane { z: 0, t: 0 };

    pub fn new(z: usize, t: usize) -> Self {
        Self { z, t }
    }
}
