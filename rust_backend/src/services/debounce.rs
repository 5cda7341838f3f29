//! Debounced availability re-checks for interactive forms.
//!
//! Form fields change on every keystroke; each change schedules a check and
//! cancels the one still waiting, so only the newest request reaches the
//! repository once input settles.

use log::debug;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::availability::AvailabilityService;
use crate::algorithms::ConflictResult;
use crate::db::RepositoryResult;
use crate::models::{ObraId, ProfessionalAssignment};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Receives the outcome of a scheduled check.
///
/// Resolves to `Err(RecvError)` when a newer request superseded this one.
pub type PendingCheck = oneshot::Receiver<RepositoryResult<ConflictResult>>;

pub struct AvailabilityDebouncer {
    service: AvailabilityService,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl AvailabilityDebouncer {
    pub fn new(service: AvailabilityService) -> Self {
        Self::with_delay(service, DEFAULT_DEBOUNCE)
    }

    pub fn with_delay(service: AvailabilityService, delay: Duration) -> Self {
        Self {
            service,
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule a check after the quiet period, cancelling any pending one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(
        &self,
        candidate: ProfessionalAssignment,
        exclude_obra_id: Option<ObraId>,
    ) -> PendingCheck {
        let (tx, rx) = oneshot::channel();
        let service = self.service.clone();
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let result = service.check(&candidate, exclude_obra_id).await;
            // Receiver may have been dropped by the caller
            let _ = tx.send(result);
        });

        let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(previous) = pending.replace(handle) {
            if !previous.is_finished() {
                debug!("Superseding pending availability check");
            }
            previous.abort();
        }

        rx
    }

    /// Drop any pending check without running it.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }
}

impl Drop for AvailabilityDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
