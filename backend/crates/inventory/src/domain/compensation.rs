//! Compensation Log
//!
//! Side effects performed by an item mutation before its record write
//! commits. When a later step fails the log is rolled back newest first;
//! when everything succeeds it is committed and simply dropped.

use crate::domain::repository::ImageStore;
use crate::domain::value_objects::ImageRef;

/// Undo action for one completed step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compensation {
    /// A blob was written and must be removed again
    DeleteImage(ImageRef),
}

/// Ordered list of pending compensations
#[derive(Debug, Default)]
#[must_use = "a compensation log must be committed or rolled back"]
pub struct CompensationLog {
    steps: Vec<Compensation>,
}

impl CompensationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, step: Compensation) {
        self.steps.push(step);
    }

    /// Every step succeeded; nothing to undo
    pub fn commit(self) {
        tracing::trace!(steps = self.steps.len(), "Compensation log committed");
    }

    /// Undo recorded steps in reverse order.
    ///
    /// Failures are logged and skipped so the caller's original error is
    /// what gets reported.
    pub async fn rollback<S: ImageStore>(self, images: &S) {
        for step in self.steps.into_iter().rev() {
            match step {
                Compensation::DeleteImage(image) => {
                    if let Err(e) = images.delete(&image).await {
                        tracing::error!(
                            image = %image,
                            error = %e,
                            "Compensating image delete failed"
                        );
                    } else {
                        tracing::info!(image = %image, "Compensating image delete done");
                    }
                }
            }
        }
    }
}
