use std::collections::HashMap;
use std::sync::Arc;

use crate::commands::{
    CancelToken, OpOutput, OpSchema, Operation, default_registry, execute_operation_with_registry,
};
use crate::model::ImageData;
use serde_json::Value;
use tracing::warn;

use super::Result;

#[derive(Clone)]
pub struct OpsService {
    registry: HashMap<&'static str, Arc<dyn Operation>>,
    cancel: CancelToken,
}

impl std::fmt::Debug for OpsService {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("OpsService")
            .field("registered_ops", &self.registry.len())
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

impl Default for OpsService {
    fn default() -> Self {
        Self {
            registry: default_registry(),
            cancel: CancelToken::new(),
        }
    }
}

impl OpsService {
    pub fn list(&self) -> Vec<OpSchema> {
        let mut schemas = self
            .registry
            .values()
            .map(|operation| operation.schema())
            .collect::<Vec<_>>();
        schemas.sort_by(|left, right| left.name.cmp(&right.name));
        schemas
    }

    /// Runs `op` on the current image. Without an image the call logs a
    /// warning and returns `None`, leaving everything untouched.
    pub fn execute(
        &self,
        op: &str,
        image: Option<&mut ImageData>,
        params: &Value,
    ) -> Result<Option<OpOutput>> {
        let Some(image) = image else {
            warn!(op, "no image data available, nothing to measure");
            return Ok(None);
        };
        Ok(Some(execute_operation_with_registry(
            &self.registry,
            op,
            image,
            params,
            &self.cancel,
        )?))
    }

    /// Token shared with every operation started through this service.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn registry(&self) -> &HashMap<&'static str, Arc<dyn Operation>> {
        &self.registry
    }
}
