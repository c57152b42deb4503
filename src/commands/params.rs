use serde_json::Value;

use crate::model::Classification;

use super::{OpsError, PlaneSelector, Result};

pub(crate) fn get_optional_bool(params: &Value, key: &str, default: bool) -> Result<bool> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => value
            .as_bool()
            .ok_or_else(|| OpsError::InvalidParams(format!("`{key}` must be a boolean"))),
    }
}

pub(crate) fn get_plane_selector(params: &Value, key: &str) -> Result<PlaneSelector> {
    match get_optional_str(params, key)? {
        None => Ok(PlaneSelector::default()),
        Some(value) => PlaneSelector::parse(value).ok_or_else(|| {
            OpsError::InvalidParams(format!(
                "`{key}` must be `matching` or `flatten`, got `{value}`"
            ))
        }),
    }
}

pub(crate) fn get_optional_str<'a>(params: &'a Value, key: &str) -> Result<Option<&'a str>> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_str()
            .map(Some)
            .ok_or_else(|| OpsError::InvalidParams(format!("`{key}` must be a string"))),
    }
}

pub(crate) fn get_optional_classes(
    params: &Value,
    key: &str,
) -> Result<Option<Vec<Classification>>> {
    let values = match params.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(values)) => values,
        Some(_) => {
            return Err(OpsError::InvalidParams(format!(
                "`{key}` must be an array of class names"
            )));
        }
    };
    values
        .iter()
        .map(|value| {
            let name = value.as_str().ok_or_else(|| {
                OpsError::InvalidParams(format!("`{key}` entries must be strings"))
            })?;
            Classification::new(name)
                .map_err(|error| OpsError::InvalidParams(format!("`{key}`: {error}")))
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}
