use super::{AreaLocator, ClassTargets, LineIndex, PointIndex};

/// Read-only query structure for the targets of one classification on one
/// plane. Safe to share across worker threads.
#[derive(Debug)]
pub struct TargetIndex {
    area: Option<AreaLocator>,
    lines: Option<LineIndex>,
    points: Option<PointIndex>,
}

impl TargetIndex {
    /// Returns `None` when no kind has usable geometry.
    pub fn build(targets: &ClassTargets) -> Option<Self> {
        let index = Self {
            area: targets.area.as_ref().and_then(AreaLocator::new),
            lines: targets.line.as_ref().and_then(LineIndex::new),
            points: targets.points.as_ref().and_then(PointIndex::new),
        };
        if index.area.is_none() && index.lines.is_none() && index.points.is_none() {
            return None;
        }
        Some(index)
    }

    /// Zero inside or on the area, otherwise the distance to its boundary.
    pub fn area_distance(&self, point: [f64; 2]) -> f64 {
        match &self.area {
            Some(locator) if locator.locate(point).is_covered() => 0.0,
            Some(locator) => locator.boundary_distance(point),
            None => f64::INFINITY,
        }
    }

    pub fn line_distance(&self, point: [f64; 2]) -> f64 {
        self.lines
            .as_ref()
            .map_or(f64::INFINITY, |lines| lines.distance(point))
    }

    pub fn point_distance(&self, point: [f64; 2]) -> f64 {
        self.points
            .as_ref()
            .map_or(f64::INFINITY, |points| points.distance(point))
    }

    /// Minimum distance to any target kind. `NaN` for a non-finite point.
    pub fn distance(&self, point: [f64; 2]) -> f64 {
        if !point[0].is_finite() || !point[1].is_finite() {
            return f64::NAN;
        }
        self.point_distance(point)
            .min(self.line_distance(point))
            .min(self.area_distance(point))
    }

    /// Like [`Self::distance`], but negative inside the area: the value is
    /// minus the distance to the area boundary.
    pub fn signed_distance(&self, point: [f64; 2]) -> f64 {
        if !point[0].is_finite() || !point[1].is_finite() {
            return f64::NAN;
        }
        if let Some(locator) = &self.area {
            if locator.locate(point).is_covered() {
                return -locator.boundary_distance(point);
            }
        }
        self.distance(point)
    }
}
