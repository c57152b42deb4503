use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use super::{CoreError, ObjectKind, PathObject, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum HierarchyEvent {
    /// Measurements or properties of existing objects changed.
    ObjectsChanged {
        object_ids: Vec<u64>,
        measurement: Option<String>,
    },
    /// Objects were added or removed.
    StructureChanged { added: usize, removed: usize },
}

pub trait HierarchyListener: Send + Sync {
    fn hierarchy_changed(&self, event: &HierarchyEvent);
}

/// Logs every event at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingListener;

impl HierarchyListener for LoggingListener {
    fn hierarchy_changed(&self, event: &HierarchyEvent) {
        match event {
            HierarchyEvent::ObjectsChanged {
                object_ids,
                measurement,
            } => debug!(
                objects = object_ids.len(),
                measurement = measurement.as_deref().unwrap_or("-"),
                "hierarchy objects changed"
            ),
            HierarchyEvent::StructureChanged { added, removed } => {
                debug!(added, removed, "hierarchy structure changed")
            }
        }
    }
}

/// Annotations and detections of one image.
///
/// The two collections are stored apart so detections can be mutated while
/// annotations are borrowed.
#[derive(Default, Clone)]
pub struct Hierarchy {
    annotations: Vec<PathObject>,
    detections: Vec<PathObject>,
    listeners: Vec<Arc<dyn HierarchyListener>>,
}

impl std::fmt::Debug for Hierarchy {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Hierarchy")
            .field("annotations", &self.annotations.len())
            .field("detections", &self.detections.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_objects(objects: impl IntoIterator<Item = PathObject>) -> Result<Self> {
        let mut hierarchy = Self::new();
        hierarchy.add_objects(objects)?;
        Ok(hierarchy)
    }

    /// Adds objects, rejecting ids that are already present.
    pub fn add_objects(&mut self, objects: impl IntoIterator<Item = PathObject>) -> Result<()> {
        let mut ids = self.ids().collect::<HashSet<_>>();
        let mut added = Vec::new();
        for object in objects {
            if !ids.insert(object.id) {
                return Err(CoreError::DuplicateObjectId(object.id));
            }
            added.push(object);
        }
        let count = added.len();
        for object in added {
            match object.kind {
                ObjectKind::Annotation => self.annotations.push(object),
                ObjectKind::Detection => self.detections.push(object),
            }
        }
        if count > 0 {
            self.fire(&HierarchyEvent::StructureChanged {
                added: count,
                removed: 0,
            });
        }
        Ok(())
    }

    pub fn annotations(&self) -> &[PathObject] {
        &self.annotations
    }

    pub fn detections(&self) -> &[PathObject] {
        &self.detections
    }

    /// Borrows the annotations immutably and the detections mutably at once.
    pub fn split_mut(&mut self) -> (&[PathObject], &mut [PathObject]) {
        (&self.annotations, &mut self.detections)
    }

    pub fn detections_mut(&mut self) -> &mut [PathObject] {
        &mut self.detections
    }

    pub fn objects(&self) -> impl Iterator<Item = &PathObject> {
        self.annotations.iter().chain(self.detections.iter())
    }

    pub fn len(&self) -> usize {
        self.annotations.len() + self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find(&self, id: u64) -> Option<&PathObject> {
        self.objects().find(|object| object.id == id)
    }

    pub fn add_listener(&mut self, listener: Arc<dyn HierarchyListener>) {
        self.listeners.push(listener);
    }

    pub fn fire_objects_changed(&self, object_ids: Vec<u64>, measurement: Option<String>) {
        self.fire(&HierarchyEvent::ObjectsChanged {
            object_ids,
            measurement,
        });
    }

    fn fire(&self, event: &HierarchyEvent) {
        for listener in &self.listeners {
            listener.hierarchy_changed(event);
        }
    }

    fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.objects().map(|object| object.id)
    }
}
