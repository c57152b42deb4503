use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::commands::Operation;

use super::{PipelineError, Result};

/// A batch recipe: operations applied in order to one image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineSpec {
    pub name: Option<String>,
    /// Parameters merged into every operation; an operation's own
    /// parameters take precedence.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub defaults: Map<String, Value>,
    #[serde(default)]
    pub operations: Vec<OpInvocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpInvocation {
    pub op: String,
    #[serde(default)]
    pub params: Value,
}

impl PipelineSpec {
    pub fn new(name: Option<String>, operations: Vec<OpInvocation>) -> Self {
        Self {
            name,
            defaults: Map::new(),
            operations,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.operations.is_empty() {
            return Err(PipelineError::Parse(
                "recipe must include at least one operation".to_string(),
            ));
        }
        for (index, step) in self.operations.iter().enumerate() {
            if step.op.trim().is_empty() {
                return Err(PipelineError::Parse(format!(
                    "operation at index {index} has an empty name"
                )));
            }
            if !step.params.is_object() && !step.params.is_null() {
                return Err(PipelineError::Parse(format!(
                    "operation `{}` parameters must be a JSON object",
                    step.op
                )));
            }
        }
        Ok(())
    }

    /// Rejects recipes naming operations the registry does not provide, so a
    /// typo fails before any measurement is written.
    pub fn validate_operations(
        &self,
        registry: &HashMap<&'static str, Arc<dyn Operation>>,
    ) -> Result<()> {
        match self
            .operations
            .iter()
            .find(|step| !registry.contains_key(step.op.as_str()))
        {
            Some(step) => Err(PipelineError::Parse(format!(
                "unknown operation `{}`",
                step.op
            ))),
            None => Ok(()),
        }
    }

    pub fn params_for(&self, invocation: &OpInvocation) -> Value {
        let mut merged = self.defaults.clone();
        if let Value::Object(own) = &invocation.params {
            merged.extend(own.iter().map(|(key, value)| (key.clone(), value.clone())));
        }
        Value::Object(merged)
    }
}
