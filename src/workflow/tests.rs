use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

use crate::commands::{CancelToken, Operation, default_registry};
use crate::model::{Classification, Hierarchy, ImageData, PathObject, PixelCalibration, Roi};
use serde_json::json;
use tempfile::tempdir;

use super::{OpInvocation, PipelineSpec, load_spec, run_pipeline, save_report};

fn test_image() -> ImageData {
    let tumor = Classification::new("Tumor").expect("class");
    let hierarchy = Hierarchy::from_objects(vec![
        PathObject::annotation(1, Roi::rectangle(0.0, 0.0, 10.0, 10.0), Some(tumor.clone())),
        PathObject::detection(2, Roi::point(20.0, 5.0), Some(tumor)),
    ])
    .expect("hierarchy");
    ImageData::new(PixelCalibration::square(2.0, "µm"), hierarchy)
}

#[test]
fn pipeline_executes_in_order() {
    let spec = PipelineSpec::new(
        Some("test".to_string()),
        vec![
            OpInvocation {
                op: "distance.annotations".to_string(),
                params: json!({}),
            },
            OpInvocation {
                op: "measurements.summary".to_string(),
                params: json!({}),
            },
        ],
    );
    let mut image = test_image();
    let registry: HashMap<&'static str, Arc<dyn Operation>> = default_registry();
    let report =
        run_pipeline(&spec, &mut image, &registry, &CancelToken::new()).expect("pipeline");
    assert_eq!(report.steps.len(), 2);
    assert_eq!(report.steps[0].notifications, 1);
    assert!(report.final_measurements.contains_key("columns"));
    let distance = image
        .hierarchy
        .find(2)
        .and_then(|object| object.measurements.get("Distance to Tumor µm"))
        .expect("distance");
    assert!((distance - 20.0).abs() < 1e-9);
}

#[test]
fn invalid_pipeline_is_rejected() {
    let spec = PipelineSpec::new(None, vec![]);
    let mut image = test_image();
    let registry: HashMap<&'static str, Arc<dyn Operation>> = default_registry();
    assert!(run_pipeline(&spec, &mut image, &registry, &CancelToken::new()).is_err());
}

#[test]
fn yaml_recipe_loads_and_report_saves() {
    let dir = tempdir().expect("tempdir");
    let recipe = dir.path().join("recipe.yaml");
    fs::write(
        &recipe,
        "name: distances\noperations:\n  - op: distance.annotations\n    params:\n      signed: true\n",
    )
    .expect("write recipe");
    let spec = load_spec(&recipe).expect("load");
    assert_eq!(spec.operations[0].params, json!({"signed": true}));

    let mut image = test_image();
    let report = run_pipeline(&spec, &mut image, &default_registry(), &CancelToken::new())
        .expect("pipeline");
    let path = dir.path().join("report.json");
    save_report(&path, &report).expect("save");
    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
    assert_eq!(saved["pipeline_name"], json!("distances"));
}

#[test]
fn recipe_with_non_object_params_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let recipe = dir.path().join("recipe.json");
    fs::write(
        &recipe,
        r#"{"operations": [{"op": "distance.annotations", "params": [1, 2]}]}"#,
    )
    .expect("write recipe");
    assert!(load_spec(&recipe).is_err());
}

#[test]
fn unknown_operations_fail_before_any_step_runs() {
    let spec = PipelineSpec::new(
        None,
        vec![
            OpInvocation {
                op: "distance.annotations".to_string(),
                params: json!({}),
            },
            OpInvocation {
                op: "distance.typo".to_string(),
                params: json!({}),
            },
        ],
    );
    let mut image = test_image();
    let error = run_pipeline(&spec, &mut image, &default_registry(), &CancelToken::new())
        .expect_err("unknown op");
    assert!(error.to_string().contains("distance.typo"));
    assert!(
        image
            .hierarchy
            .detections()
            .iter()
            .all(|detection| detection.measurements.is_empty())
    );
}

#[test]
fn recipe_defaults_are_merged_into_each_step() {
    let dir = tempdir().expect("tempdir");
    let recipe = dir.path().join("recipe.json");
    fs::write(
        &recipe,
        r#"{"defaults": {"signed": true, "planes": "flatten"},
            "operations": [{"op": "distance.annotations", "params": {"planes": "matching"}}]}"#,
    )
    .expect("write recipe");
    let spec = load_spec(&recipe).expect("load");
    let params = spec.params_for(&spec.operations[0]);
    assert_eq!(params, json!({"signed": true, "planes": "matching"}));
}
