use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Named numeric measurements attached to one object.
///
/// Values are only changed through a [`MeasurementWriter`], which commits its
/// buffered writes when it goes out of scope.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementList {
    #[serde(with = "non_finite_as_null")]
    values: BTreeMap<String, f64>,
}

impl MeasurementList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) -> MeasurementWriter<'_> {
        MeasurementWriter {
            list: self,
            pending: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

/// Scoped mutation of a [`MeasurementList`].
#[derive(Debug)]
pub struct MeasurementWriter<'a> {
    list: &'a mut MeasurementList,
    pending: Vec<(String, Option<f64>)>,
}

impl MeasurementWriter<'_> {
    pub fn put(&mut self, name: impl Into<String>, value: f64) -> &mut Self {
        self.pending.push((name.into(), Some(value)));
        self
    }

    pub fn remove(&mut self, name: impl Into<String>) -> &mut Self {
        self.pending.push((name.into(), None));
        self
    }

    fn flush(&mut self) {
        for (name, value) in self.pending.drain(..) {
            match value {
                Some(value) => {
                    self.list.values.insert(name, value);
                }
                None => {
                    self.list.values.remove(&name);
                }
            }
        }
    }
}

impl Drop for MeasurementWriter<'_> {
    fn drop(&mut self) {
        self.flush();
    }
}

/// JSON has no NaN, so missing values travel as `null`.
mod non_finite_as_null {
    use super::*;

    pub(super) fn serialize<S: Serializer>(
        values: &BTreeMap<String, f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            values
                .iter()
                .map(|(name, value)| (name, value.is_finite().then_some(*value))),
        )
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, f64>, D::Error> {
        let raw = BTreeMap::<String, Option<f64>>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(name, value)| (name, value.unwrap_or(f64::NAN)))
            .collect())
    }
}
