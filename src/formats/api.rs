use std::fs;
use std::path::Path;

use crate::model::ImageData;

use super::document::ImageDocument;
use super::util::extension;
use super::{IoError, Result};

pub fn read_image_data(path: impl AsRef<Path>) -> Result<ImageData> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let document = match extension(path)?.as_str() {
        "json" => serde_json::from_str::<ImageDocument>(&raw)?,
        "yaml" | "yml" => serde_yaml::from_str::<ImageDocument>(&raw)?,
        other => return Err(IoError::UnsupportedFormat(other.to_string())),
    };
    let mut image = document.into_image_data()?;
    if image.name.is_none() {
        image.name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string);
    }
    Ok(image)
}

pub fn write_image_data(path: impl AsRef<Path>, image: &ImageData) -> Result<()> {
    let path = path.as_ref();
    let document = ImageDocument::from_image_data(image);
    let serialized = match extension(path)?.as_str() {
        "json" => serde_json::to_string_pretty(&document)?,
        "yaml" | "yml" => serde_yaml::to_string(&document)?,
        other => return Err(IoError::UnsupportedFormat(other.to_string())),
    };
    fs::write(path, serialized)?;
    Ok(())
}

pub fn supported_formats() -> &'static [&'static str] {
    &["json", "yaml", "yml"]
}
