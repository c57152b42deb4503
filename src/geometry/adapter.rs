use std::f64::consts::TAU;

use geo::{Coord, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};

use crate::model::{PixelCalibration, Roi};

use super::{GeometryError, Result};

const ELLIPSE_VERTICES: usize = 64;

/// Pixel to physical unit conversion for a calibration whose axes share a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryScale {
    sx: f64,
    sy: f64,
    unit: String,
}

impl GeometryScale {
    pub fn from_calibration(calibration: &PixelCalibration) -> Result<Self> {
        if !calibration.units_match() {
            return Err(GeometryError::UnitMismatch {
                width_unit: calibration.pixel_width_unit.clone(),
                height_unit: calibration.pixel_height_unit.clone(),
            });
        }
        if !calibration.has_valid_sizes() {
            return Err(GeometryError::InvalidPixelSize {
                width: calibration.pixel_width,
                height: calibration.pixel_height,
            });
        }
        let (sx, sy) = calibration.scale();
        Ok(Self {
            sx,
            sy,
            unit: calibration.unit().to_string(),
        })
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn apply(&self, [x, y]: [f64; 2]) -> [f64; 2] {
        [x * self.sx, y * self.sy]
    }

    fn coord(&self, point: [f64; 2]) -> Coord<f64> {
        let [x, y] = self.apply(point);
        Coord { x, y }
    }

    fn ring(&self, points: &[[f64; 2]]) -> LineString<f64> {
        points.iter().map(|point| self.coord(*point)).collect()
    }
}

/// Calibrated geometry of a single ROI, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetGeometry {
    Area(MultiPolygon<f64>),
    Line(MultiLineString<f64>),
    Points(MultiPoint<f64>),
}

/// Converts a ROI into physical units. Returns `None` for shapes without
/// usable geometry (too few vertices, zero extent or non-finite coordinates).
pub fn roi_to_geometry(roi: &Roi, scale: &GeometryScale) -> Option<TargetGeometry> {
    match roi {
        Roi::Rectangle {
            x,
            y,
            width,
            height,
        } => {
            if !has_extent(*x, *y, *width, *height) {
                return None;
            }
            let corners = [
                [*x, *y],
                [x + width, *y],
                [x + width, y + height],
                [*x, y + height],
            ];
            Some(area(Polygon::new(scale.ring(&corners), vec![])))
        }
        Roi::Ellipse {
            x,
            y,
            width,
            height,
        } => {
            if !has_extent(*x, *y, *width, *height) {
                return None;
            }
            let (cx, cy) = (x + width / 2.0, y + height / 2.0);
            let (rx, ry) = (width / 2.0, height / 2.0);
            let vertices = (0..ELLIPSE_VERTICES)
                .map(|index| {
                    let angle = TAU * index as f64 / ELLIPSE_VERTICES as f64;
                    [cx + rx * angle.cos(), cy + ry * angle.sin()]
                })
                .collect::<Vec<_>>();
            Some(area(Polygon::new(scale.ring(&vertices), vec![])))
        }
        Roi::Polygon { points, holes } => {
            if points.len() < 3 || !all_finite(points) {
                return None;
            }
            let interiors = holes
                .iter()
                .filter(|hole| hole.len() >= 3 && all_finite(hole))
                .map(|hole| scale.ring(hole))
                .collect();
            Some(area(Polygon::new(scale.ring(points), interiors)))
        }
        Roi::Polyline { points } => {
            if !all_finite(points) {
                return None;
            }
            match points.len() {
                0 => None,
                1 => Some(points_geometry(points, scale)),
                _ => Some(TargetGeometry::Line(MultiLineString::new(vec![
                    scale.ring(points),
                ]))),
            }
        }
        Roi::Line { x1, y1, x2, y2 } => {
            let points = [[*x1, *y1], [*x2, *y2]];
            if !all_finite(&points) {
                return None;
            }
            Some(TargetGeometry::Line(MultiLineString::new(vec![
                scale.ring(&points),
            ])))
        }
        Roi::Points { points } => {
            if points.is_empty() || !all_finite(points) {
                return None;
            }
            Some(points_geometry(points, scale))
        }
    }
}

fn area(polygon: Polygon<f64>) -> TargetGeometry {
    TargetGeometry::Area(MultiPolygon::new(vec![polygon]))
}

fn points_geometry(points: &[[f64; 2]], scale: &GeometryScale) -> TargetGeometry {
    TargetGeometry::Points(
        points
            .iter()
            .map(|point| Point::from(scale.coord(*point)))
            .collect(),
    )
}

fn has_extent(x: f64, y: f64, width: f64, height: f64) -> bool {
    x.is_finite()
        && y.is_finite()
        && width.is_finite()
        && height.is_finite()
        && width > 0.0
        && height > 0.0
}

fn all_finite(points: &[[f64; 2]]) -> bool {
    points.iter().all(|[x, y]| x.is_finite() && y.is_finite())
}
