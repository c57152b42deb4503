use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::model::{ImageData, PathObject, Plane, RoiKind};

use super::Result;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImageSummary {
    pub name: Option<String>,
    pub pixel_width: f64,
    pub pixel_height: f64,
    pub unit: String,
    pub units_match: bool,
    pub size_z: usize,
    pub size_t: usize,
    pub annotations: usize,
    pub detections: usize,
    pub annotation_classes: Vec<String>,
    pub detection_classes: Vec<String>,
    pub occupied_planes: Vec<Plane>,
    /// Annotation count per ROI kind; these are the distance targets.
    pub target_kinds: BTreeMap<RoiKind, usize>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ImageService;

impl ImageService {
    pub fn validate(&self, image: &ImageData) -> Result<()> {
        image.validate()?;
        Ok(())
    }

    pub fn summarize(&self, image: &ImageData) -> ImageSummary {
        let classes = |objects: &[PathObject]| {
            objects
                .iter()
                .filter_map(|object| object.classification.as_ref())
                .map(ToString::to_string)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect::<Vec<_>>()
        };
        let hierarchy = &image.hierarchy;
        let mut target_kinds = BTreeMap::new();
        for annotation in hierarchy.annotations() {
            *target_kinds.entry(annotation.roi.kind()).or_insert(0) += 1;
        }
        ImageSummary {
            name: image.name.clone(),
            pixel_width: image.calibration.pixel_width,
            pixel_height: image.calibration.pixel_height,
            unit: image.calibration.unit().to_string(),
            units_match: image.calibration.units_match(),
            size_z: image.size_z,
            size_t: image.size_t,
            annotations: hierarchy.annotations().len(),
            detections: hierarchy.detections().len(),
            annotation_classes: classes(hierarchy.annotations()),
            detection_classes: classes(hierarchy.detections()),
            occupied_planes: hierarchy
                .objects()
                .map(|object| object.plane)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
            target_kinds,
        }
    }
}
