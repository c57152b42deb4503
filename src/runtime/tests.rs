use serde_json::json;
use tempfile::tempdir;

use crate::model::{
    Classification, Hierarchy, ImageData, PathObject, PixelCalibration, Plane, Roi, RoiKind,
};

use super::AppContext;

fn sample_image() -> ImageData {
    let tumor = Classification::new("Tumor").expect("class");
    let hierarchy = Hierarchy::from_objects(vec![
        PathObject::annotation(1, Roi::rectangle(0.0, 0.0, 10.0, 10.0), Some(tumor)),
        PathObject::detection(2, Roi::point(20.0, 5.0), None).on_plane(Plane::new(0, 1)),
    ])
    .expect("hierarchy");
    ImageData::new(PixelCalibration::default(), hierarchy).with_planes(1, 2)
}

#[test]
fn executing_without_image_is_a_no_op() {
    let app = AppContext::new();
    let output = app
        .ops_service()
        .execute("distance.annotations", None, &json!({}))
        .expect("no image");
    assert!(output.is_none());
}

#[test]
fn executing_with_image_returns_output() {
    let app = AppContext::new();
    let mut image = sample_image();
    let output = app
        .ops_service()
        .execute("distance.annotations", Some(&mut image), &json!({}))
        .expect("execute")
        .expect("output");
    // The only detection is on a plane without annotations.
    assert_eq!(output.notifications, 1);
    assert!(image.hierarchy.find(2).expect("detection").measurements.is_empty());
}

#[test]
fn summary_lists_classes_and_planes() {
    let app = AppContext::new();
    let summary = app.image_service().summarize(&sample_image());
    assert_eq!(summary.annotation_classes, vec!["Tumor".to_string()]);
    assert!(summary.detection_classes.is_empty());
    assert_eq!(summary.occupied_planes, vec![Plane::new(0, 0), Plane::new(0, 1)]);
    assert!(summary.units_match);
    assert_eq!(summary.target_kinds.get(&RoiKind::Area), Some(&1));
    assert!(!summary.target_kinds.contains_key(&RoiKind::Point));
}

#[test]
fn io_service_roundtrip_and_export() {
    let dir = tempdir().expect("tempdir");
    let app = AppContext::new();
    let image = sample_image();
    let path = dir.path().join("image.json");
    app.io_service().write(&path, &image).expect("write");
    let restored = app.io_service().read(&path).expect("read");
    app.image_service().validate(&restored).expect("valid");
    let table = dir.path().join("table.tsv");
    app.io_service()
        .export(&table, &restored, None)
        .expect("export");
    assert!(table.exists());
}
