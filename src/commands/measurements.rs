use std::collections::BTreeMap;

use crate::model::ImageData;
use serde_json::{Value, json};

use super::util::target_classes;
use super::{CancelToken, MeasurementTable, OpOutput, OpSchema, Operation, Result};

#[derive(Debug, Clone, Copy)]
pub struct MeasurementsSummaryOp;

#[derive(Debug, Clone, Copy)]
struct ColumnStats {
    min: f64,
    max: f64,
    sum: f64,
    count: usize,
}

impl Default for ColumnStats {
    fn default() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            sum: 0.0,
            count: 0,
        }
    }
}

impl Operation for MeasurementsSummaryOp {
    fn name(&self) -> &'static str {
        "measurements.summary"
    }

    fn schema(&self) -> OpSchema {
        OpSchema {
            name: self.name().to_string(),
            description: "Object counts and min/max/mean of every detection measurement."
                .to_string(),
            params: vec![],
        }
    }

    fn execute(
        &self,
        image: &mut ImageData,
        _params: &Value,
        _cancel: &CancelToken,
    ) -> Result<OpOutput> {
        let hierarchy = &image.hierarchy;
        let mut columns = BTreeMap::<&str, ColumnStats>::new();
        for detection in hierarchy.detections() {
            for (name, value) in detection.measurements.iter() {
                let stats = columns.entry(name).or_default();
                if !value.is_finite() {
                    continue;
                }
                stats.min = stats.min.min(value);
                stats.max = stats.max.max(value);
                stats.sum += value;
                stats.count += 1;
            }
        }

        let columns = columns
            .into_iter()
            .map(|(name, stats)| {
                let summary = if stats.count == 0 {
                    json!({"count": 0})
                } else {
                    json!({
                        "count": stats.count,
                        "min": stats.min,
                        "max": stats.max,
                        "mean": stats.sum / stats.count as f64,
                    })
                };
                (name.to_string(), summary)
            })
            .collect::<serde_json::Map<_, _>>();

        let classes = target_classes(hierarchy.objects())
            .into_iter()
            .map(|class| class.to_string())
            .collect::<Vec<_>>();

        let mut measurements = MeasurementTable::default();
        measurements.values.insert(
            "annotations".to_string(),
            json!(hierarchy.annotations().len()),
        );
        measurements
            .values
            .insert("detections".to_string(), json!(hierarchy.detections().len()));
        measurements
            .values
            .insert("classes".to_string(), json!(classes));
        measurements
            .values
            .insert("columns".to_string(), Value::Object(columns));
        Ok(OpOutput::table_only(measurements))
    }
}
