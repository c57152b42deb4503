use crate::model::ImageData;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{CancelToken, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpSchema {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MeasurementTable {
    pub values: std::collections::BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default)]
pub struct OpOutput {
    pub measurements: Option<MeasurementTable>,
    /// Number of hierarchy change notifications fired by the operation.
    pub notifications: usize,
}

impl OpOutput {
    pub fn table_only(measurements: MeasurementTable) -> Self {
        Self {
            measurements: Some(measurements),
            notifications: 0,
        }
    }
}

pub trait Operation: Send + Sync {
    fn name(&self) -> &'static str;
    fn schema(&self) -> OpSchema;
    fn execute(
        &self,
        image: &mut ImageData,
        params: &Value,
        cancel: &CancelToken,
    ) -> Result<OpOutput>;
}
