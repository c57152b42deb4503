use geo::{MultiLineString, MultiPoint};
use rstar::primitives::GeomWithData;
use rstar::{PointDistance, RTree};

use super::locator::{Segment, ring_segments};

/// Nearest-segment lookups against a set of polylines.
pub struct LineIndex {
    segments: RTree<Segment>,
}

impl LineIndex {
    pub fn new(lines: &MultiLineString<f64>) -> Option<Self> {
        let mut segments = Vec::new();
        for line in lines {
            match line.0.as_slice() {
                [] => {}
                [single] => segments.push(Segment::new([single.x, single.y], [single.x, single.y])),
                _ => segments.extend(ring_segments(line)),
            }
        }
        if segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: RTree::bulk_load(segments),
        })
    }

    pub fn distance(&self, point: [f64; 2]) -> f64 {
        self.segments
            .nearest_neighbor(&point)
            .map_or(f64::INFINITY, |segment| segment.distance_2(&point).sqrt())
    }
}

pub struct PointIndex {
    points: RTree<[f64; 2]>,
}

impl PointIndex {
    pub fn new(points: &MultiPoint<f64>) -> Option<Self> {
        let coordinates = points
            .iter()
            .map(|point| [point.x(), point.y()])
            .collect::<Vec<_>>();
        if coordinates.is_empty() {
            return None;
        }
        Some(Self {
            points: RTree::bulk_load(coordinates),
        })
    }

    pub fn distance(&self, point: [f64; 2]) -> f64 {
        self.points
            .nearest_neighbor(&point)
            .map_or(f64::INFINITY, |nearest| nearest.distance_2(&point).sqrt())
    }
}

/// Object centroids keyed by object id, for nearest-other-object queries.
pub struct CentroidIndex {
    centroids: RTree<GeomWithData<[f64; 2], u64>>,
}

impl CentroidIndex {
    pub fn new(centroids: impl IntoIterator<Item = (u64, [f64; 2])>) -> Self {
        let entries = centroids
            .into_iter()
            .filter(|(_, [x, y])| x.is_finite() && y.is_finite())
            .map(|(id, point)| GeomWithData::new(point, id))
            .collect::<Vec<_>>();
        Self {
            centroids: RTree::bulk_load(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.centroids.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Distance to the nearest centroid whose id differs from `exclude`.
    pub fn nearest_other(&self, point: [f64; 2], exclude: u64) -> Option<f64> {
        self.centroids
            .nearest_neighbor_iter(&point)
            .find(|entry| entry.data != exclude)
            .map(|entry| entry.geom().distance_2(&point).sqrt())
    }
}

impl std::fmt::Debug for LineIndex {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("LineIndex")
            .field("segments", &self.segments.size())
            .finish()
    }
}

impl std::fmt::Debug for PointIndex {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("PointIndex")
            .field("points", &self.points.size())
            .finish()
    }
}

impl std::fmt::Debug for CentroidIndex {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("CentroidIndex")
            .field("centroids", &self.centroids.size())
            .finish()
    }
}
