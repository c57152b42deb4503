mod cancel;
mod centroid;
mod distance;
mod error;
mod measurements;
mod params;
mod registry;
mod schema;
mod util;

#[cfg(test)]
mod tests;

pub use cancel::CancelToken;
pub use centroid::{
    DetectionCentroidDistancesOp, detection_centroid_distances, detection_measurement_name,
};
pub use distance::{
    DistanceOptions, DistanceSummary, DistanceToAnnotationsOp, annotation_measurement_name,
    detection_to_annotation_distances,
};
pub use error::{OpsError, Result};
pub use measurements::MeasurementsSummaryOp;
pub use registry::{
    default_registry, execute_operation, execute_operation_with_registry, list_operations,
};
pub use schema::{MeasurementTable, OpOutput, OpSchema, Operation, ParamSpec};
pub use util::PlaneSelector;

pub(crate) use params::{get_optional_bool, get_optional_classes, get_plane_selector};
