use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::model::ImageData;
use serde_json::Value;

use super::{
    CancelToken, DetectionCentroidDistancesOp, DistanceToAnnotationsOp, MeasurementsSummaryOp,
    OpOutput, OpSchema, Operation, OpsError, Result,
};

type Registry = HashMap<&'static str, Arc<dyn Operation>>;

fn register<O: Operation + 'static>(map: &mut Registry, operation: O) {
    map.insert(operation.name(), Arc::new(operation));
}

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map: Registry = HashMap::new();
        register(&mut map, DistanceToAnnotationsOp);
        register(&mut map, DetectionCentroidDistancesOp);
        register(&mut map, MeasurementsSummaryOp);
        map
    })
}

pub fn default_registry() -> HashMap<&'static str, Arc<dyn Operation>> {
    registry()
        .iter()
        .map(|(name, op)| (*name, Arc::clone(op)))
        .collect()
}

pub fn list_operations() -> Vec<OpSchema> {
    let mut schemas = registry()
        .values()
        .map(|op| op.schema())
        .collect::<Vec<_>>();
    schemas.sort_by(|left, right| left.name.cmp(&right.name));
    schemas
}

pub fn execute_operation(
    name: &str,
    image: &mut ImageData,
    params: &Value,
    cancel: &CancelToken,
) -> Result<OpOutput> {
    execute_operation_with_registry(registry(), name, image, params, cancel)
}

pub fn execute_operation_with_registry(
    registry: &HashMap<&'static str, Arc<dyn Operation>>,
    name: &str,
    image: &mut ImageData,
    params: &Value,
    cancel: &CancelToken,
) -> Result<OpOutput> {
    let op = registry
        .get(name)
        .ok_or_else(|| OpsError::UnknownOperation(name.to_string()))?;
    op.execute(image, params, cancel)
}
