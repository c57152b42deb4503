use serde::{Deserialize, Serialize};

use super::{Classification, MeasurementList, Plane, Roi};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Annotation,
    Detection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathObject {
    pub id: u64,
    pub kind: ObjectKind,
    #[serde(default)]
    pub classification: Option<Classification>,
    pub roi: Roi,
    #[serde(default)]
    pub plane: Plane,
    #[serde(default)]
    pub measurements: MeasurementList,
}

impl PathObject {
    pub fn annotation(id: u64, roi: Roi, classification: Option<Classification>) -> Self {
        Self::new(id, ObjectKind::Annotation, roi, classification)
    }

    pub fn detection(id: u64, roi: Roi, classification: Option<Classification>) -> Self {
        Self::new(id, ObjectKind::Detection, roi, classification)
    }

    fn new(id: u64, kind: ObjectKind, roi: Roi, classification: Option<Classification>) -> Self {
        Self {
            id,
            kind,
            classification,
            roi,
            plane: Plane::DEFAULT,
            measurements: MeasurementList::new(),
        }
    }

    pub fn on_plane(mut self, plane: Plane) -> Self {
        self.plane = plane;
        self
    }
}
