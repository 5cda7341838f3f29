//! Read access to professional rosters and contract records.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{ContractRecord, ObraId, ProfessionalAssignment};

/// Data-access boundary the conflict checker depends on.
///
/// The engine owns no storage; whoever owns obras and staffing implements this
/// trait (in-memory store, REST client, database).
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so one instance can serve concurrent
/// checks.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Check if the backing store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if healthy
    /// - `Ok(false)` if unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// List staffing rows, optionally restricted to one obra.
    ///
    /// Rows come back in roster order and include inactive ones; filtering by
    /// state is the caller's decision.
    async fn list_assignments(
        &self,
        obra_id: Option<ObraId>,
    ) -> RepositoryResult<Vec<ProfessionalAssignment>>;

    /// List every known contract.
    async fn list_contracts(&self) -> RepositoryResult<Vec<ContractRecord>>;
}
