use std::collections::{BTreeSet, HashMap};

use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, info};

use crate::geometry::{CentroidIndex, GeometryScale};
use crate::model::{Classification, ImageData, Plane};

use super::distance::{Change, DistanceSummary, clear_stale};
use super::util::{PlaneSelector, calibrated_centroid, target_classes, warn_if_multi_plane};
use super::{
    CancelToken, OpOutput, OpSchema, Operation, ParamSpec, Result, get_optional_classes,
    get_plane_selector,
};

pub fn detection_measurement_name(class: &Classification, unit: &str) -> String {
    format!("Distance to detection {class} {unit}")
}

/// Measures, for every detection, the distance from its centroid to the
/// nearest other detection centroid of each classification on its plane.
///
/// Detections with no other candidate get `NaN`.
pub fn detection_centroid_distances(
    image: &mut ImageData,
    classes: Option<&[Classification]>,
    planes: PlaneSelector,
    cancel: &CancelToken,
) -> Result<DistanceSummary> {
    let scale = GeometryScale::from_calibration(&image.calibration)?;
    warn_if_multi_plane(image, planes);

    let present = target_classes(image.hierarchy.detections());
    let classes = match classes {
        None => present,
        Some(requested) => requested
            .iter()
            .filter(|class| !class.is_ignored() && present.contains(class))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
    };

    let mut summary = DistanceSummary::default();
    for class in classes {
        cancel.check(summary.measurements.len())?;
        let name = detection_measurement_name(&class, scale.unit());

        let mut grouped = HashMap::<Plane, Vec<(u64, [f64; 2])>>::new();
        for detection in image.hierarchy.detections() {
            if detection.classification.as_ref() == Some(&class) {
                grouped
                    .entry(planes.key(detection.plane))
                    .or_default()
                    .push((detection.id, calibrated_centroid(detection, &scale)));
            }
        }
        let indices = grouped
            .into_iter()
            .map(|(plane, centroids)| (plane, CentroidIndex::new(centroids)))
            .filter(|(_, index)| !index.is_empty())
            .collect::<HashMap<_, _>>();
        if indices.is_empty() {
            debug!(class = %class, "no detections with finite centroids, skipping");
            summary.skipped.push(class.to_string());
            continue;
        }

        let changes = image
            .hierarchy
            .detections_mut()
            .par_iter_mut()
            .filter_map(|detection| {
                let Some(index) = indices.get(&planes.key(detection.plane)) else {
                    return clear_stale(detection, &name);
                };
                let centroid = calibrated_centroid(detection, &scale);
                let value = if centroid[0].is_finite() && centroid[1].is_finite() {
                    index
                        .nearest_other(centroid, detection.id)
                        .unwrap_or(f64::NAN)
                } else {
                    f64::NAN
                };
                detection.measurements.open().put(name.as_str(), value);
                Some(Change::Written(detection.id))
            })
            .collect::<Vec<_>>();

        summary.detections_updated += changes
            .iter()
            .filter(|change| matches!(change, Change::Written(_)))
            .count();
        image.hierarchy.fire_objects_changed(
            changes.into_iter().map(Change::id).collect(),
            Some(name.clone()),
        );
        summary.notifications += 1;
        summary.measurements.push(name);
    }

    info!(
        measurements = summary.measurements.len(),
        "detection centroid distances complete"
    );
    Ok(summary)
}

#[derive(Debug, Clone, Copy)]
pub struct DetectionCentroidDistancesOp;

impl Operation for DetectionCentroidDistancesOp {
    fn name(&self) -> &'static str {
        "distance.detections"
    }

    fn schema(&self) -> OpSchema {
        OpSchema {
            name: self.name().to_string(),
            description: "Distance from each detection centroid to the nearest other detection of every classification."
                .to_string(),
            params: vec![
                ParamSpec {
                    name: "classes".to_string(),
                    description: "Detection classifications to measure against.".to_string(),
                    required: false,
                    kind: "string[]".to_string(),
                },
                ParamSpec {
                    name: "planes".to_string(),
                    description: "`matching` (default) or `flatten`.".to_string(),
                    required: false,
                    kind: "string".to_string(),
                },
            ],
        }
    }

    fn execute(
        &self,
        image: &mut ImageData,
        params: &Value,
        cancel: &CancelToken,
    ) -> Result<OpOutput> {
        let classes = get_optional_classes(params, "classes")?;
        let planes = get_plane_selector(params, "planes")?;
        let summary = detection_centroid_distances(image, classes.as_deref(), planes, cancel)?;
        Ok(OpOutput {
            measurements: Some(summary.to_table()),
            notifications: summary.notifications,
        })
    }
}
