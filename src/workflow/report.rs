use std::collections::BTreeMap;

use crate::commands::MeasurementTable;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepReport {
    pub op: String,
    pub duration_ms: u128,
    pub notifications: usize,
    pub measurements: Option<MeasurementTable>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineReport {
    pub pipeline_name: Option<String>,
    pub image_name: Option<String>,
    pub steps: Vec<StepReport>,
    pub final_measurements: BTreeMap<String, Value>,
    pub annotations: usize,
    pub detections: usize,
}
