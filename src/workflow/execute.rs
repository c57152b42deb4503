use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::commands::{CancelToken, Operation, execute_operation_with_registry};
use crate::model::ImageData;

use super::{PipelineReport, PipelineSpec, Result, StepReport};

/// Runs every operation of `spec` in order against `image`, stopping at the
/// first failure.
pub fn run_pipeline(
    spec: &PipelineSpec,
    image: &mut ImageData,
    registry: &HashMap<&'static str, Arc<dyn Operation>>,
    cancel: &CancelToken,
) -> Result<PipelineReport> {
    spec.validate()?;
    spec.validate_operations(registry)?;
    image.validate()?;

    let mut steps = Vec::with_capacity(spec.operations.len());
    let mut final_measurements = BTreeMap::new();

    for invocation in &spec.operations {
        let started = Instant::now();
        let params = spec.params_for(invocation);
        let output =
            execute_operation_with_registry(registry, &invocation.op, image, &params, cancel)?;
        let duration_ms = started.elapsed().as_millis();
        info!(op = %invocation.op, duration_ms = duration_ms as u64, "pipeline step finished");
        if let Some(measurements) = &output.measurements {
            for (key, value) in &measurements.values {
                final_measurements.insert(key.clone(), value.clone());
            }
        }
        steps.push(StepReport {
            op: invocation.op.clone(),
            duration_ms,
            notifications: output.notifications,
            measurements: output.measurements,
        });
    }

    Ok(PipelineReport {
        pipeline_name: spec.name.clone(),
        image_name: image.name.clone(),
        steps,
        final_measurements,
        annotations: image.hierarchy.annotations().len(),
        detections: image.hierarchy.detections().len(),
    })
}
