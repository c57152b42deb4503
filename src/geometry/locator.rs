use geo::{LineString, MultiPolygon};
use rstar::primitives::Line;
use rstar::{AABB, PointDistance, RTree};

pub(super) type Segment = Line<[f64; 2]>;

/// Squared distance under which a point counts as lying on the boundary.
const BOUNDARY_TOLERANCE_2: f64 = 1e-24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

impl Location {
    pub fn is_covered(self) -> bool {
        matches!(self, Location::Interior | Location::Boundary)
    }
}

/// Point-in-area locator over an R-tree of boundary segments.
///
/// Classification uses an even-odd ray cast towards +x that only visits the
/// segments whose envelopes meet the ray.
pub struct AreaLocator {
    boundary: RTree<Segment>,
    max_x: f64,
}

impl std::fmt::Debug for AreaLocator {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AreaLocator")
            .field("segments", &self.boundary.size())
            .finish()
    }
}

impl AreaLocator {
    /// Returns `None` when the area has no boundary segments.
    pub fn new(area: &MultiPolygon<f64>) -> Option<Self> {
        let segments = area
            .iter()
            .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
            .flat_map(ring_segments)
            .collect::<Vec<_>>();
        if segments.is_empty() {
            return None;
        }
        let max_x = segments
            .iter()
            .map(|segment| segment.from[0].max(segment.to[0]))
            .fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            boundary: RTree::bulk_load(segments),
            max_x,
        })
    }

    pub fn locate(&self, point: [f64; 2]) -> Location {
        if !point[0].is_finite() || !point[1].is_finite() {
            return Location::Exterior;
        }
        let on_boundary = self
            .boundary
            .nearest_neighbor(&point)
            .is_some_and(|segment| segment.distance_2(&point) <= BOUNDARY_TOLERANCE_2);
        if on_boundary {
            return Location::Boundary;
        }
        if point[0] > self.max_x {
            return Location::Exterior;
        }
        let ray = AABB::from_corners(point, [self.max_x, point[1]]);
        let crossings = self
            .boundary
            .locate_in_envelope_intersecting(&ray)
            .filter(|segment| crosses_ray(segment, point))
            .count();
        if crossings % 2 == 1 {
            Location::Interior
        } else {
            Location::Exterior
        }
    }

    pub fn boundary_distance(&self, point: [f64; 2]) -> f64 {
        self.boundary
            .nearest_neighbor(&point)
            .map_or(f64::INFINITY, |segment| segment.distance_2(&point).sqrt())
    }
}

pub(super) fn ring_segments(ring: &LineString<f64>) -> impl Iterator<Item = Segment> + '_ {
    ring.lines()
        .map(|line| Segment::new([line.start.x, line.start.y], [line.end.x, line.end.y]))
}

fn crosses_ray(segment: &Segment, [px, py]: [f64; 2]) -> bool {
    let [ax, ay] = segment.from;
    let [bx, by] = segment.to;
    if (ay > py) == (by > py) {
        return false;
    }
    let x = ax + (py - ay) * (bx - ax) / (by - ay);
    x > px
}
