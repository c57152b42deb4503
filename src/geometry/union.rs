use geo::{BooleanOps, MultiLineString, MultiPoint, MultiPolygon};

use super::TargetGeometry;

/// Per-kind union of the target geometries of one classification.
///
/// A kind without any contributing geometry stays `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassTargets {
    pub area: Option<MultiPolygon<f64>>,
    pub line: Option<MultiLineString<f64>>,
    pub points: Option<MultiPoint<f64>>,
}

impl ClassTargets {
    pub fn union(geometries: impl IntoIterator<Item = TargetGeometry>) -> Self {
        let mut areas = Vec::new();
        let mut lines = Vec::new();
        let mut points = Vec::new();
        for geometry in geometries {
            match geometry {
                TargetGeometry::Area(area) => areas.push(area),
                TargetGeometry::Line(line) => lines.extend(line.0),
                TargetGeometry::Points(multi) => points.extend(multi.0),
            }
        }

        Self {
            area: union_areas(areas),
            line: (!lines.is_empty()).then(|| MultiLineString::new(lines)),
            points: (!points.is_empty()).then(|| MultiPoint::new(points)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.area.is_none() && self.line.is_none() && self.points.is_none()
    }
}

fn union_areas(areas: Vec<MultiPolygon<f64>>) -> Option<MultiPolygon<f64>> {
    let mut iter = areas.into_iter();
    let first = iter.next()?;
    Some(iter.fold(first, |merged, next| merged.union(&next)))
}
