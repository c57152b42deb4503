use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::json;

use crate::model::{
    Classification, Hierarchy, HierarchyEvent, HierarchyListener, ImageData, PathObject,
    PixelCalibration, Plane, Roi,
};

use super::{
    CancelToken, DistanceOptions, OpsError, PlaneSelector, detection_to_annotation_distances,
    execute_operation, list_operations,
};

#[derive(Default)]
struct ChangeCounter {
    changed: AtomicUsize,
}

impl HierarchyListener for ChangeCounter {
    fn hierarchy_changed(&self, event: &HierarchyEvent) {
        if matches!(event, HierarchyEvent::ObjectsChanged { .. }) {
            self.changed.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[derive(Default)]
struct ChangedIds {
    events: Mutex<Vec<Vec<u64>>>,
}

impl HierarchyListener for ChangedIds {
    fn hierarchy_changed(&self, event: &HierarchyEvent) {
        if let HierarchyEvent::ObjectsChanged { object_ids, .. } = event {
            let mut ids = object_ids.clone();
            ids.sort_unstable();
            self.events.lock().expect("events").push(ids);
        }
    }
}

fn class(name: &str) -> Option<Classification> {
    Some(Classification::new(name).expect("class"))
}

fn cell(id: u64, x: f64, y: f64) -> PathObject {
    PathObject::detection(id, Roi::rectangle(x - 1.0, y - 1.0, 2.0, 2.0), class("Cell"))
}

fn image(objects: Vec<PathObject>) -> ImageData {
    let hierarchy = Hierarchy::from_objects(objects).expect("hierarchy");
    ImageData::new(PixelCalibration::default(), hierarchy)
}

fn measurement(image: &ImageData, id: u64, name: &str) -> Option<f64> {
    image
        .hierarchy
        .find(id)
        .and_then(|object| object.measurements.get(name))
}

fn square_scene() -> ImageData {
    image(vec![
        PathObject::annotation(1, Roi::rectangle(0.0, 0.0, 10.0, 10.0), class("Tumor")),
        cell(10, 5.0, 5.0),
        cell(11, 20.0, 5.0),
    ])
}

#[test]
fn contains_required_operations() {
    let names = list_operations()
        .into_iter()
        .map(|schema| schema.name)
        .collect::<Vec<_>>();
    assert!(names.contains(&"distance.annotations".to_string()));
    assert!(names.contains(&"distance.detections".to_string()));
    assert!(names.contains(&"measurements.summary".to_string()));
}

#[test]
fn unknown_operation_is_rejected() {
    let mut image = square_scene();
    let error = execute_operation("nope", &mut image, &json!({}), &CancelToken::new())
        .expect_err("unknown");
    assert!(matches!(error, OpsError::UnknownOperation(_)));
}

#[test]
fn square_annotation_scenario() {
    let mut image = square_scene();
    let output = execute_operation(
        "distance.annotations",
        &mut image,
        &json!({}),
        &CancelToken::new(),
    )
    .expect("distance");
    assert_eq!(output.notifications, 1);
    let name = "Distance to Tumor px";
    assert_eq!(measurement(&image, 10, name), Some(0.0));
    let outside = measurement(&image, 11, name).expect("outside");
    assert!((outside - 10.0).abs() < 1e-9);
    assert_eq!(measurement(&image, 1, name), None);
}

#[test]
fn repeated_runs_are_idempotent() {
    let mut image = square_scene();
    let options = DistanceOptions::default();
    detection_to_annotation_distances(&mut image, &options, &CancelToken::new()).expect("first");
    let first = image.hierarchy.detections().to_vec();
    detection_to_annotation_distances(&mut image, &options, &CancelToken::new()).expect("second");
    assert_eq!(image.hierarchy.detections(), first.as_slice());
}

#[test]
fn point_targets_give_exact_nearest_point_distance() {
    let mut image = image(vec![
        PathObject::annotation(1, Roi::point(0.0, 0.0), class("Vessel")),
        PathObject::annotation(2, Roi::point(10.0, 0.0), class("Vessel")),
        cell(10, 3.0, 4.0),
        cell(11, 10.0, 2.0),
    ]);
    detection_to_annotation_distances(&mut image, &DistanceOptions::default(), &CancelToken::new())
        .expect("distance");
    let name = "Distance to Vessel px";
    assert!((measurement(&image, 10, name).expect("first") - 5.0).abs() < 1e-12);
    assert!((measurement(&image, 11, name).expect("second") - 2.0).abs() < 1e-12);
}

#[test]
fn unit_mismatch_fails_without_writes() {
    let mut image = square_scene();
    image.calibration = PixelCalibration {
        pixel_width: 0.5,
        pixel_height: 0.5,
        pixel_width_unit: "µm".to_string(),
        pixel_height_unit: "px".to_string(),
    };
    let error = detection_to_annotation_distances(
        &mut image,
        &DistanceOptions::default(),
        &CancelToken::new(),
    )
    .expect_err("mismatch");
    assert!(matches!(error, OpsError::Configuration(_)));
    assert!(
        image
            .hierarchy
            .detections()
            .iter()
            .all(|detection| detection.measurements.is_empty())
    );
}

#[test]
fn missing_classification_writes_nothing() {
    let mut image = square_scene();
    let options = DistanceOptions {
        classes: Some(vec![Classification::new("Stroma").expect("class")]),
        ..DistanceOptions::default()
    };
    let summary = detection_to_annotation_distances(&mut image, &options, &CancelToken::new())
        .expect("distance");
    assert!(summary.measurements.is_empty());
    assert_eq!(summary.notifications, 0);
    assert!(
        image
            .hierarchy
            .detections()
            .iter()
            .all(|detection| detection.measurements.is_empty())
    );
}

#[test]
fn one_notification_per_classification() {
    let counter = Arc::new(ChangeCounter::default());
    let mut image = image(vec![
        PathObject::annotation(1, Roi::rectangle(0.0, 0.0, 10.0, 10.0), class("Tumor")),
        PathObject::annotation(2, Roi::line(0.0, 20.0, 10.0, 20.0), class("Margin")),
        PathObject::annotation(3, Roi::point(50.0, 50.0), class("Vessel")),
        PathObject::annotation(4, Roi::point(60.0, 50.0), class("Ignore*")),
        PathObject::annotation(5, Roi::point(70.0, 50.0), None),
        cell(10, 5.0, 5.0),
        cell(11, 20.0, 5.0),
        cell(12, 30.0, 30.0),
    ]);
    image.hierarchy.add_listener(counter.clone());
    let summary = detection_to_annotation_distances(
        &mut image,
        &DistanceOptions::default(),
        &CancelToken::new(),
    )
    .expect("distance");
    assert_eq!(summary.measurements.len(), 3);
    assert_eq!(counter.changed.load(Ordering::SeqCst), 3);
    assert_eq!(summary.detections_updated, 9);
    let far = image.hierarchy.find(12).expect("cell");
    assert_eq!(far.measurements.len(), 3);
}

#[test]
fn inside_area_gives_zero_and_signed_is_negative() {
    let mut image = square_scene();
    let options = DistanceOptions {
        signed: true,
        ..DistanceOptions::default()
    };
    detection_to_annotation_distances(&mut image, &options, &CancelToken::new())
        .expect("distance");
    let name = "Signed distance to Tumor px";
    assert_eq!(measurement(&image, 10, name), Some(-5.0));
    let outside = measurement(&image, 11, name).expect("outside");
    assert!((outside - 10.0).abs() < 1e-9);
}

#[test]
fn calibration_scales_distances_and_names_unit() {
    let mut image = square_scene();
    image.calibration = PixelCalibration::square(0.25, "µm");
    detection_to_annotation_distances(&mut image, &DistanceOptions::default(), &CancelToken::new())
        .expect("distance");
    let value = measurement(&image, 11, "Distance to Tumor µm").expect("scaled");
    assert!((value - 2.5).abs() < 1e-9);
}

#[test]
fn detections_are_matched_by_plane() {
    let mut image = image(vec![
        PathObject::annotation(1, Roi::rectangle(0.0, 0.0, 10.0, 10.0), class("Tumor")),
        PathObject::annotation(2, Roi::rectangle(100.0, 0.0, 10.0, 10.0), class("Tumor"))
            .on_plane(Plane::new(1, 0)),
        cell(10, 20.0, 5.0),
        cell(11, 20.0, 5.0).on_plane(Plane::new(1, 0)),
        cell(12, 20.0, 5.0).on_plane(Plane::new(2, 0)),
    ])
    .with_planes(3, 1);
    let summary = detection_to_annotation_distances(
        &mut image,
        &DistanceOptions::default(),
        &CancelToken::new(),
    )
    .expect("distance");
    assert_eq!(summary.notifications, 1);
    let name = "Distance to Tumor px";
    assert!((measurement(&image, 10, name).expect("z0") - 10.0).abs() < 1e-9);
    assert!((measurement(&image, 11, name).expect("z1") - 80.0).abs() < 1e-9);
    assert_eq!(measurement(&image, 12, name), None);

    let mut flattened = image.clone();
    let options = DistanceOptions {
        planes: PlaneSelector::Flatten,
        ..DistanceOptions::default()
    };
    detection_to_annotation_distances(&mut flattened, &options, &CancelToken::new())
        .expect("flatten");
    assert!((measurement(&flattened, 11, name).expect("z1") - 10.0).abs() < 1e-9);
    assert!((measurement(&flattened, 12, name).expect("z2") - 10.0).abs() < 1e-9);
}

#[test]
fn matching_rerun_clears_values_left_by_flatten() {
    let mut image = image(vec![
        PathObject::annotation(1, Roi::rectangle(0.0, 0.0, 10.0, 10.0), class("Tumor")),
        cell(10, 20.0, 5.0),
        cell(12, 20.0, 5.0).on_plane(Plane::new(2, 0)),
    ])
    .with_planes(3, 1);
    let name = "Distance to Tumor px";
    let flatten = DistanceOptions {
        planes: PlaneSelector::Flatten,
        ..DistanceOptions::default()
    };
    detection_to_annotation_distances(&mut image, &flatten, &CancelToken::new())
        .expect("flatten");
    assert_eq!(measurement(&image, 12, name), Some(10.0));

    let changed = Arc::new(ChangedIds::default());
    image.hierarchy.add_listener(changed.clone());
    let summary = detection_to_annotation_distances(
        &mut image,
        &DistanceOptions::default(),
        &CancelToken::new(),
    )
    .expect("matching");
    assert_eq!(measurement(&image, 10, name), Some(10.0));
    assert_eq!(measurement(&image, 12, name), None);
    assert_eq!(summary.detections_updated, 1);
    assert_eq!(*changed.events.lock().expect("events"), vec![vec![10, 12]]);
}

#[test]
fn repeated_classes_are_measured_once() {
    let counter = Arc::new(ChangeCounter::default());
    let mut image = square_scene();
    image.hierarchy.add_listener(counter.clone());
    let output = execute_operation(
        "distance.annotations",
        &mut image,
        &json!({"classes": ["Tumor", "Tumor"]}),
        &CancelToken::new(),
    )
    .expect("distance");
    assert_eq!(output.notifications, 1);
    assert_eq!(counter.changed.load(Ordering::SeqCst), 1);
    let table = output.measurements.expect("table");
    assert_eq!(table.values["measurements"], json!(["Distance to Tumor px"]));
    assert_eq!(table.values["detections_updated"], json!(2));

    let output = execute_operation(
        "distance.detections",
        &mut image,
        &json!({"classes": ["Cell", "Cell"]}),
        &CancelToken::new(),
    )
    .expect("centroids");
    assert_eq!(output.notifications, 1);
    assert_eq!(counter.changed.load(Ordering::SeqCst), 2);
}

#[test]
fn degenerate_centroid_yields_nan() {
    let mut image = image(vec![
        PathObject::annotation(1, Roi::rectangle(0.0, 0.0, 10.0, 10.0), class("Tumor")),
        PathObject::detection(10, Roi::Points { points: vec![] }, class("Cell")),
    ]);
    detection_to_annotation_distances(&mut image, &DistanceOptions::default(), &CancelToken::new())
        .expect("distance");
    let value = measurement(&image, 10, "Distance to Tumor px").expect("written");
    assert!(value.is_nan());
}

#[test]
fn cancelled_token_stops_before_first_class() {
    let mut image = square_scene();
    let cancel = CancelToken::new();
    cancel.cancel();
    let error = detection_to_annotation_distances(&mut image, &DistanceOptions::default(), &cancel)
        .expect_err("cancelled");
    assert!(matches!(error, OpsError::Cancelled { completed: 0 }));
    assert!(measurement(&image, 10, "Distance to Tumor px").is_none());
}

#[test]
fn invalid_params_are_reported() {
    let mut image = square_scene();
    let error = execute_operation(
        "distance.annotations",
        &mut image,
        &json!({"planes": "sideways"}),
        &CancelToken::new(),
    )
    .expect_err("planes");
    assert!(error.to_string().contains("planes"));
    let error = execute_operation(
        "distance.annotations",
        &mut image,
        &json!({"classes": "Tumor"}),
        &CancelToken::new(),
    )
    .expect_err("classes");
    assert!(matches!(error, OpsError::InvalidParams(_)));
}

#[test]
fn detection_centroid_distances_skip_self() {
    let mut image = image(vec![
        PathObject::detection(1, Roi::point(0.0, 0.0), class("Tumor")),
        PathObject::detection(2, Roi::point(3.0, 4.0), class("Tumor")),
        PathObject::detection(3, Roi::point(0.0, 1.0), class("Immune")),
        PathObject::detection(4, Roi::point(9.0, 9.0), class("Ignore*")),
    ]);
    let output = execute_operation(
        "distance.detections",
        &mut image,
        &json!({}),
        &CancelToken::new(),
    )
    .expect("centroids");
    assert_eq!(output.notifications, 2);
    assert_eq!(measurement(&image, 1, "Distance to detection Tumor px"), Some(5.0));
    assert_eq!(measurement(&image, 3, "Distance to detection Tumor px"), Some(1.0));
    let lonely = measurement(&image, 3, "Distance to detection Immune px").expect("immune");
    assert!(lonely.is_nan());
    assert_eq!(measurement(&image, 1, "Distance to detection Immune px"), Some(1.0));
}

#[test]
fn summary_reports_columns() {
    let mut image = square_scene();
    execute_operation(
        "distance.annotations",
        &mut image,
        &json!({}),
        &CancelToken::new(),
    )
    .expect("distance");
    let output = execute_operation(
        "measurements.summary",
        &mut image,
        &json!({}),
        &CancelToken::new(),
    )
    .expect("summary");
    let table = output.measurements.expect("table");
    assert_eq!(
        table.values.get("detections").and_then(|value| value.as_u64()),
        Some(2)
    );
    let max = table
        .values
        .get("columns")
        .and_then(|columns| columns.get("Distance to Tumor px"))
        .and_then(|column| column.get("max"))
        .and_then(|value| value.as_f64())
        .expect("max");
    assert!((max - 10.0).abs() < 1e-9);
}
