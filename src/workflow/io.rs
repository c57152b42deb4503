use std::fs;
use std::path::Path;

use tracing::debug;

use super::{PipelineReport, PipelineSpec, Result};

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// Loads a recipe. YAML for `.yaml`/`.yml`, JSON otherwise.
pub fn load_spec(path: impl AsRef<Path>) -> Result<PipelineSpec> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let spec = if is_yaml(path) {
        serde_yaml::from_str::<PipelineSpec>(&raw)?
    } else {
        serde_json::from_str::<PipelineSpec>(&raw)?
    };
    spec.validate()?;
    debug!(path = %path.display(), operations = spec.operations.len(), "recipe loaded");
    Ok(spec)
}

pub fn save_report(path: impl AsRef<Path>, report: &PipelineReport) -> Result<()> {
    let path = path.as_ref();
    let serialized = if is_yaml(path) {
        serde_yaml::to_string(report)?
    } else {
        serde_json::to_string_pretty(report)?
    };
    fs::write(path, serialized)?;
    Ok(())
}
