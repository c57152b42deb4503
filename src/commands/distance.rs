use std::collections::{BTreeSet, HashMap};
use std::time::Instant;

use rayon::prelude::*;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::geometry::{ClassTargets, GeometryScale, TargetIndex, roi_to_geometry};
use crate::model::{Classification, ImageData, PathObject, Plane};

use super::util::{PlaneSelector, calibrated_centroid, target_classes, warn_if_multi_plane};
use super::{
    CancelToken, MeasurementTable, OpOutput, OpSchema, Operation, ParamSpec, Result,
    get_optional_bool, get_optional_classes, get_plane_selector,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceOptions {
    /// Write negative distances for detections inside the target area.
    pub signed: bool,
    /// Restrict targets to these classifications.
    pub classes: Option<Vec<Classification>>,
    pub planes: PlaneSelector,
}

impl DistanceOptions {
    pub fn from_params(params: &Value) -> Result<Self> {
        Ok(Self {
            signed: get_optional_bool(params, "signed", false)?,
            classes: get_optional_classes(params, "classes")?,
            planes: get_plane_selector(params, "planes")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceSummary {
    pub measurements: Vec<String>,
    pub skipped: Vec<String>,
    pub detections_updated: usize,
    pub notifications: usize,
}

impl DistanceSummary {
    pub fn to_table(&self) -> MeasurementTable {
        let mut table = MeasurementTable::default();
        table
            .values
            .insert("measurements".to_string(), json!(self.measurements));
        table
            .values
            .insert("skipped_classes".to_string(), json!(self.skipped));
        table.values.insert(
            "detections_updated".to_string(),
            json!(self.detections_updated),
        );
        table
    }
}

pub fn annotation_measurement_name(class: &Classification, unit: &str, signed: bool) -> String {
    if signed {
        format!("Signed distance to {class} {unit}")
    } else {
        format!("Distance to {class} {unit}")
    }
}

/// Measures, for every detection, the distance from its centroid to the
/// nearest annotation of each target classification.
///
/// The calibration is checked before anything is written. Each processed
/// classification adds one measurement column and fires one
/// objects-changed event.
pub fn detection_to_annotation_distances(
    image: &mut ImageData,
    options: &DistanceOptions,
    cancel: &CancelToken,
) -> Result<DistanceSummary> {
    let scale = GeometryScale::from_calibration(&image.calibration)?;
    warn_if_multi_plane(image, options.planes);

    let present = target_classes(image.hierarchy.annotations());
    let classes = match &options.classes {
        None => present,
        Some(requested) => requested
            .iter()
            .filter(|class| {
                if class.is_ignored() {
                    debug!(class = %class, "ignored classification requested as target");
                    return false;
                }
                if !present.contains(class) {
                    info!(class = %class, "no annotations with this classification");
                    return false;
                }
                true
            })
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
    };

    let mut summary = DistanceSummary::default();
    for class in classes {
        cancel.check(summary.measurements.len())?;
        let started = Instant::now();
        let name = annotation_measurement_name(&class, scale.unit(), options.signed);

        let (annotations, detections) = image.hierarchy.split_mut();
        let indices = plane_indices(annotations, &class, &scale, options.planes);
        if indices.is_empty() {
            debug!(class = %class, "no usable annotation geometry, skipping");
            summary.skipped.push(class.to_string());
            continue;
        }

        let changes = detections
            .par_iter_mut()
            .filter_map(|detection| {
                let Some(index) = indices.get(&options.planes.key(detection.plane)) else {
                    return clear_stale(detection, &name);
                };
                let centroid = calibrated_centroid(detection, &scale);
                let value = if options.signed {
                    index.signed_distance(centroid)
                } else {
                    index.distance(centroid)
                };
                detection.measurements.open().put(name.as_str(), value);
                Some(Change::Written(detection.id))
            })
            .collect::<Vec<_>>();
        let written = changes
            .iter()
            .filter(|change| matches!(change, Change::Written(_)))
            .count();

        debug!(
            class = %class,
            planes = indices.len(),
            detections = written,
            cleared = changes.len() - written,
            elapsed = ?started.elapsed(),
            "annotation distances computed"
        );
        summary.detections_updated += written;
        image.hierarchy.fire_objects_changed(
            changes.into_iter().map(Change::id).collect(),
            Some(name.clone()),
        );
        summary.notifications += 1;
        summary.measurements.push(name);
    }

    info!(
        measurements = summary.measurements.len(),
        skipped = summary.skipped.len(),
        "detection to annotation distances complete"
    );
    Ok(summary)
}

/// Per-detection outcome of one classification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Change {
    Written(u64),
    /// A value left by an earlier run was removed because the detection's
    /// plane has no targets this time.
    Cleared(u64),
}

impl Change {
    pub(super) fn id(self) -> u64 {
        match self {
            Change::Written(id) | Change::Cleared(id) => id,
        }
    }
}

pub(super) fn clear_stale(detection: &mut PathObject, name: &str) -> Option<Change> {
    if !detection.measurements.contains(name) {
        return None;
    }
    detection.measurements.open().remove(name);
    Some(Change::Cleared(detection.id))
}

fn plane_indices(
    annotations: &[PathObject],
    class: &Classification,
    scale: &GeometryScale,
    planes: PlaneSelector,
) -> HashMap<Plane, TargetIndex> {
    let mut geometries = HashMap::<Plane, Vec<_>>::new();
    for annotation in annotations {
        if annotation.classification.as_ref() != Some(class) {
            continue;
        }
        if let Some(geometry) = roi_to_geometry(&annotation.roi, scale) {
            geometries
                .entry(planes.key(annotation.plane))
                .or_default()
                .push(geometry);
        }
    }
    geometries
        .into_iter()
        .filter_map(|(plane, geometries)| {
            let targets = ClassTargets::union(geometries);
            TargetIndex::build(&targets).map(|index| (plane, index))
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct DistanceToAnnotationsOp;

impl Operation for DistanceToAnnotationsOp {
    fn name(&self) -> &'static str {
        "distance.annotations"
    }

    fn schema(&self) -> OpSchema {
        OpSchema {
            name: self.name().to_string(),
            description: "Distance from each detection centroid to the nearest annotation of every classification."
                .to_string(),
            params: vec![
                ParamSpec {
                    name: "signed".to_string(),
                    description: "Negative distances inside annotation areas.".to_string(),
                    required: false,
                    kind: "bool".to_string(),
                },
                ParamSpec {
                    name: "classes".to_string(),
                    description: "Target classifications. Uses every annotation class when omitted."
                        .to_string(),
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
        let options = DistanceOptions::from_params(params)?;
        let summary = detection_to_annotation_distances(image, &options, cancel)?;
        Ok(OpOutput {
            measurements: Some(summary.to_table()),
            notifications: summary.notifications,
        })
    }
}
