use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CoreError, Result};

/// Class label carried by annotations and detections.
///
/// Names ending in `*` (for example `Ignore*`) mark classes that are kept on
/// objects but never used as measurement targets.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Classification(String);

impl Classification {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::InvalidClassification(name));
        }
        Ok(Self(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_ignored(&self) -> bool {
        self.0.ends_with('*')
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl TryFrom<String> for Classification {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Classification> for String {
    fn from(value: Classification) -> Self {
        value.0
    }
}
