use geo::{Centroid, LineString, Polygon};
use serde::{Deserialize, Serialize};

/// Region of interest in pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Roi {
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Ellipse {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Polygon {
        points: Vec<[f64; 2]>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        holes: Vec<Vec<[f64; 2]>>,
    },
    Polyline {
        points: Vec<[f64; 2]>,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Points {
        points: Vec<[f64; 2]>,
    },
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RoiKind {
    Area,
    Line,
    Point,
}

impl Roi {
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::Rectangle {
            x,
            y,
            width,
            height,
        }
    }

    pub fn polygon(points: Vec<[f64; 2]>) -> Self {
        Self::Polygon {
            points,
            holes: Vec::new(),
        }
    }

    pub fn point(x: f64, y: f64) -> Self {
        Self::Points {
            points: vec![[x, y]],
        }
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::Line { x1, y1, x2, y2 }
    }

    pub fn kind(&self) -> RoiKind {
        match self {
            Roi::Rectangle { .. } | Roi::Ellipse { .. } | Roi::Polygon { .. } => RoiKind::Area,
            Roi::Polyline { .. } | Roi::Line { .. } => RoiKind::Line,
            Roi::Points { .. } => RoiKind::Point,
        }
    }

    /// Centroid in pixel coordinates, or `None` for an empty shape.
    pub fn centroid(&self) -> Option<[f64; 2]> {
        match self {
            Roi::Rectangle {
                x,
                y,
                width,
                height,
            }
            | Roi::Ellipse {
                x,
                y,
                width,
                height,
            } => Some([x + width / 2.0, y + height / 2.0]),
            Roi::Polygon { points, holes } => {
                let interiors = holes
                    .iter()
                    .map(|ring| LineString::from(ring.clone()))
                    .collect();
                Polygon::new(LineString::from(points.clone()), interiors)
                    .centroid()
                    .map(|point| [point.x(), point.y()])
            }
            Roi::Polyline { points } => LineString::from(points.clone())
                .centroid()
                .map(|point| [point.x(), point.y()]),
            Roi::Line { x1, y1, x2, y2 } => Some([(x1 + x2) / 2.0, (y1 + y2) / 2.0]),
            Roi::Points { points } => {
                if points.is_empty() {
                    return None;
                }
                let count = points.len() as f64;
                let (sum_x, sum_y) = points
                    .iter()
                    .fold((0.0_f64, 0.0_f64), |(sx, sy), [x, y]| (sx + x, sy + y));
                Some([sum_x / count, sum_y / count])
            }
        }
    }
}
