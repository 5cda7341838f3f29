//! Repository-backed professional availability checks.
//!
//! These functions fetch the current roster and contracts from any
//! [`RosterRepository`] and hand them to the pure conflict checker in
//! [`crate::algorithms::conflicts`].
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use obras_rust::db::LocalRepository;
//! use obras_rust::models::DateRange;
//! use obras_rust::services::availability;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
//!     let range = DateRange::new(d(3, 1), d(6, 30))?;
//!
//!     let result =
//!         availability::check_professional_availability(&repo, "Ing. Juan Pérez", &range, None)
//!             .await?;
//!     assert!(result.available);
//!     Ok(())
//! }
//! ```

use log::{debug, info, warn};
use std::sync::Arc;

use crate::algorithms::{ConflictResult, ProfessionalConflictChecker};
use crate::db::{RepositoryResult, RosterRepository};
use crate::models::{is_full_time, ContractRecord, DateRange, ObraId, ProfessionalAssignment};

// ==================== Health & Connection ====================

/// Check if the roster backend is reachable.
pub async fn health_check<R: RosterRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Availability ====================

/// Check a candidate assignment against the stored roster.
///
/// Non-full-time or inactive candidates are available without touching the
/// repository. A repository failure is returned as-is: the caller must treat
/// it as "could not verify", never as "available".
pub async fn check_assignment<R: RosterRepository + ?Sized>(
    repo: &R,
    candidate: &ProfessionalAssignment,
    exclude_obra_id: Option<ObraId>,
) -> RepositoryResult<ConflictResult> {
    if !candidate.is_active() || !is_full_time(candidate.participation_percentage) {
        debug!(
            "Skipping availability lookup for '{}': not an active full-time assignment",
            candidate.professional_name
        );
        return Ok(ConflictResult::available());
    }

    let (roster, contracts) = fetch_roster(repo).await?;
    let result =
        ProfessionalConflictChecker::new(&contracts).check(candidate, &roster, exclude_obra_id);
    log_outcome(&candidate.professional_name, &result);
    Ok(result)
}

/// Check whether `professional_name` can be booked full-time over `range`.
pub async fn check_professional_availability<R: RosterRepository + ?Sized>(
    repo: &R,
    professional_name: &str,
    range: &DateRange,
    exclude_obra_id: Option<ObraId>,
) -> RepositoryResult<ConflictResult> {
    let (roster, contracts) = fetch_roster(repo).await?;
    let result = ProfessionalConflictChecker::new(&contracts).check_range(
        professional_name,
        range,
        &roster,
        exclude_obra_id,
    );
    log_outcome(professional_name, &result);
    Ok(result)
}

async fn fetch_roster<R: RosterRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<(Vec<ProfessionalAssignment>, Vec<ContractRecord>)> {
    let fetched = tokio::try_join!(repo.list_assignments(None), repo.list_contracts());
    match fetched {
        Ok((roster, contracts)) => {
            debug!(
                "Fetched {} roster rows and {} contracts",
                roster.len(),
                contracts.len()
            );
            Ok((roster, contracts))
        }
        Err(e) if e.is_transient() => {
            warn!("Availability could not be verified, backend unreachable: {}", e);
            Err(e)
        }
        Err(e) => {
            warn!("Availability could not be verified: {}", e);
            Err(e)
        }
    }
}

fn log_outcome(professional_name: &str, result: &ConflictResult) {
    if result.available {
        debug!("'{}' is available", professional_name);
    } else {
        info!(
            "'{}' has {} full-time conflict(s)",
            professional_name,
            result.conflicts.len()
        );
    }
}

/// Availability checks bound to a shared repository handle.
#[derive(Clone)]
pub struct AvailabilityService {
    repo: Arc<dyn RosterRepository>,
}

impl AvailabilityService {
    pub fn new(repo: Arc<dyn RosterRepository>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Arc<dyn RosterRepository> {
        &self.repo
    }

    pub async fn check(
        &self,
        candidate: &ProfessionalAssignment,
        exclude_obra_id: Option<ObraId>,
    ) -> RepositoryResult<ConflictResult> {
        check_assignment(self.repo.as_ref(), candidate, exclude_obra_id).await
    }

    pub async fn check_professional(
        &self,
        professional_name: &str,
        range: &DateRange,
        exclude_obra_id: Option<ObraId>,
    ) -> RepositoryResult<ConflictResult> {
        check_professional_availability(self.repo.as_ref(), professional_name, range, exclude_obra_id)
            .await
    }
}
