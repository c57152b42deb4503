use std::collections::BTreeSet;

use tracing::warn;

use crate::geometry::GeometryScale;
use crate::model::{Classification, ImageData, PathObject, Plane};

/// How object planes are matched between targets and measured detections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaneSelector {
    /// Detections are only measured against targets on their own (z, t) plane.
    #[default]
    Matching,
    /// Every plane is folded onto one, measuring across z and t in 2D.
    Flatten,
}

impl PlaneSelector {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "matching" => Some(Self::Matching),
            "flatten" => Some(Self::Flatten),
            _ => None,
        }
    }

    pub(crate) fn key(self, plane: Plane) -> Plane {
        match self {
            Self::Matching => plane,
            Self::Flatten => Plane::DEFAULT,
        }
    }
}

pub(crate) fn calibrated_centroid(object: &PathObject, scale: &GeometryScale) -> [f64; 2] {
    object
        .roi
        .centroid()
        .map_or([f64::NAN, f64::NAN], |centroid| scale.apply(centroid))
}

/// Sorted, distinct, non-ignored classifications of `objects`.
pub(crate) fn target_classes<'a>(
    objects: impl IntoIterator<Item = &'a PathObject>,
) -> Vec<Classification> {
    objects
        .into_iter()
        .filter_map(|object| object.classification.as_ref())
        .filter(|class| !class.is_ignored())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub(crate) fn warn_if_multi_plane(image: &ImageData, selector: PlaneSelector) {
    if !image.is_multi_plane() {
        return;
    }
    match selector {
        PlaneSelector::Matching => warn!(
            size_z = image.size_z,
            size_t = image.size_t,
            "distances are computed per plane in 2D; z-stacks and time series are not measured in 3D"
        ),
        PlaneSelector::Flatten => warn!(
            size_z = image.size_z,
            size_t = image.size_t,
            "planes are flattened; distances ignore z and t"
        ),
    }
}
