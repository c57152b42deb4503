use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{OpsError, Result};

/// Cooperative cancellation flag shared between a caller and a running
/// operation. Operations check it between classifications.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub(crate) fn check(&self, completed: usize) -> Result<()> {
        if self.is_cancelled() {
            return Err(OpsError::Cancelled { completed });
        }
        Ok(())
    }
}
