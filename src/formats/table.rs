use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::model::{ImageData, ObjectKind, PathObject};

use super::util::{csv_field, extension, format_value, tsv_field};
use super::{IoError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Tab,
    Comma,
}

impl Delimiter {
    fn for_path(path: &Path) -> Result<Self> {
        match extension(path)?.as_str() {
            "tsv" | "txt" => Ok(Self::Tab),
            "csv" => Ok(Self::Comma),
            other => Err(IoError::UnsupportedFormat(other.to_string())),
        }
    }

    fn separator(self) -> char {
        match self {
            Self::Tab => '\t',
            Self::Comma => ',',
        }
    }

    fn field(self, value: &str) -> String {
        match self {
            Self::Tab => tsv_field(value),
            Self::Comma => csv_field(value),
        }
    }
}

/// Renders one row per object: identity, classification, plane, calibrated
/// centroid and every measurement column present on any exported object.
pub fn measurement_table(
    image: &ImageData,
    kind: Option<ObjectKind>,
    delimiter: Delimiter,
) -> String {
    let objects = image
        .hierarchy
        .objects()
        .filter(|object| kind.is_none_or(|kind| object.kind == kind))
        .collect::<Vec<_>>();
    let columns = objects
        .iter()
        .copied()
        .flat_map(|object| object.measurements.names())
        .collect::<BTreeSet<_>>();

    let unit = image.calibration.unit();
    let mut header = vec![
        "Object ID".to_string(),
        "Object type".to_string(),
        "Classification".to_string(),
        "z".to_string(),
        "t".to_string(),
        format!("Centroid X {unit}"),
        format!("Centroid Y {unit}"),
    ];
    header.extend(columns.iter().map(|name| name.to_string()));

    let separator = delimiter.separator().to_string();
    let mut output = String::new();
    push_row(&mut output, &header, delimiter, &separator);
    for object in objects {
        let row = object_row(object, image, &columns);
        push_row(&mut output, &row, delimiter, &separator);
    }
    output
}

pub fn export_measurements(
    path: impl AsRef<Path>,
    image: &ImageData,
    kind: Option<ObjectKind>,
) -> Result<()> {
    let path = path.as_ref();
    let delimiter = Delimiter::for_path(path)?;
    fs::write(path, measurement_table(image, kind, delimiter))?;
    Ok(())
}

fn object_row(object: &PathObject, image: &ImageData, columns: &BTreeSet<&str>) -> Vec<String> {
    let (sx, sy) = image.calibration.scale();
    let [cx, cy] = object
        .roi
        .centroid()
        .map_or([f64::NAN, f64::NAN], |[x, y]| [x * sx, y * sy]);
    let kind = match object.kind {
        ObjectKind::Annotation => "Annotation",
        ObjectKind::Detection => "Detection",
    };
    let mut row = vec![
        object.id.to_string(),
        kind.to_string(),
        object
            .classification
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        object.plane.z.to_string(),
        object.plane.t.to_string(),
        format_value(cx),
        format_value(cy),
    ];
    row.extend(columns.iter().map(|name| {
        object
            .measurements
            .get(name)
            .map(format_value)
            .unwrap_or_default()
    }));
    row
}

fn push_row(output: &mut String, fields: &[String], delimiter: Delimiter, separator: &str) {
    let line = fields
        .iter()
        .map(|field| delimiter.field(field))
        .collect::<Vec<_>>()
        .join(separator);
    output.push_str(&line);
    output.push('\n');
}
