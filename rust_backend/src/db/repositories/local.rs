//! In-memory local repository implementation.
//!
//! This module provides a local implementation of [`RosterRepository`] suitable
//! for unit testing and local development. Data lives in memory behind an
//! `RwLock`, giving fast, deterministic and isolated execution.

use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::db::repository::{RepositoryError, RepositoryResult, RosterRepository};
use crate::models::{AssignmentState, ContractRecord, ObraEstado, ObraId, ProfessionalAssignment};

/// Roster snapshot stored as JSON, used to seed a [`LocalRepository`].
///
/// ```json
/// { "obras": [ ... ], "asignaciones": [ ... ] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterFixture {
    #[serde(default)]
    pub obras: Vec<ContractRecord>,
    #[serde(default)]
    pub asignaciones: Vec<ProfessionalAssignment>,
}

impl RosterFixture {
    /// Load a fixture from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RepositoryError::ConfigurationError(format!(
                "Failed to read roster fixture {}: {}",
                path.display(),
                e
            ))
        })?;
        let fixture = Self::from_json_str(&content)?;
        info!(
            "Loaded roster fixture from {} ({} obras, {} assignments)",
            path.display(),
            fixture.obras.len(),
            fixture.asignaciones.len()
        );
        Ok(fixture)
    }

    pub fn from_json_str(content: &str) -> RepositoryResult<Self> {
        serde_json::from_str(content).map_err(|e| {
            RepositoryError::ValidationError(format!("Invalid roster fixture: {}", e))
        })
    }
}

/// In-memory roster store.
///
/// Cloning shares the underlying data, so a test can keep a handle for setup
/// while the code under test holds another.
///
/// # Example
/// ```
/// use obras_rust::db::repositories::LocalRepository;
/// use obras_rust::db::RosterRepository;
///
/// let repo = LocalRepository::new();
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let rows = rt.block_on(repo.list_assignments(None)).unwrap();
/// assert!(rows.is_empty());
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    contracts: BTreeMap<ObraId, ContractRecord>,
    assignments: Vec<ProfessionalAssignment>,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            contracts: BTreeMap::new(),
            assignments: Vec::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the contents of a roster fixture.
    pub fn from_fixture(fixture: RosterFixture) -> Self {
        Self::with_data(fixture.obras, fixture.asignaciones)
    }

    /// Create a repository pre-populated with fixtures.
    pub fn with_data(
        contracts: Vec<ContractRecord>,
        assignments: Vec<ProfessionalAssignment>,
    ) -> Self {
        let data = LocalData {
            contracts: contracts.into_iter().map(|c| (c.id, c)).collect(),
            assignments,
            is_healthy: true,
        };
        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, LocalData>> {
        self.data
            .read()
            .map_err(|_| RepositoryError::InternalError("Local repository lock poisoned".into()))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, LocalData>> {
        self.data
            .write()
            .map_err(|_| RepositoryError::InternalError("Local repository lock poisoned".into()))
    }

    /// Insert or replace a contract keyed by its id.
    pub fn store_contract(&self, contract: ContractRecord) -> RepositoryResult<()> {
        self.write()?.contracts.insert(contract.id, contract);
        Ok(())
    }

    /// Move an obra to another lifecycle state.
    pub fn set_contract_state(&self, obra_id: ObraId, state: ObraEstado) -> RepositoryResult<()> {
        let mut data = self.write()?;
        let contract = data
            .contracts
            .get_mut(&obra_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Obra {}", obra_id)))?;
        contract.state = state;
        Ok(())
    }

    /// Insert a staffing row, or replace the row for the same professional and
    /// obra in place so roster order is preserved.
    pub fn upsert_assignment(&self, assignment: ProfessionalAssignment) -> RepositoryResult<()> {
        let mut data = self.write()?;
        match data.assignments.iter_mut().find(|row| {
            row.obra_id == assignment.obra_id && row.professional_name == assignment.professional_name
        }) {
            Some(existing) => *existing = assignment,
            None => data.assignments.push(assignment),
        }
        Ok(())
    }

    /// Retire a staffing row. Rows are never removed, only marked inactive.
    pub fn deactivate_assignment(
        &self,
        professional_name: &str,
        obra_id: ObraId,
    ) -> RepositoryResult<()> {
        let mut data = self.write()?;
        let row = data
            .assignments
            .iter_mut()
            .find(|row| row.obra_id == obra_id && row.professional_name == professional_name)
            .ok_or_else(|| {
                RepositoryError::NotFound(format!(
                    "Assignment of '{}' to obra {}",
                    professional_name, obra_id
                ))
            })?;
        row.state = AssignmentState::Inactive;
        Ok(())
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) -> RepositoryResult<()> {
        self.write()?.is_healthy = healthy;
        Ok(())
    }

    /// Clear all data, keeping the health flag.
    pub fn clear(&self) -> RepositoryResult<()> {
        let mut data = self.write()?;
        data.contracts.clear();
        data.assignments.clear();
        Ok(())
    }

    pub fn assignment_count(&self) -> RepositoryResult<usize> {
        Ok(self.read()?.assignments.len())
    }

    pub fn contract_count(&self) -> RepositoryResult<usize> {
        Ok(self.read()?.contracts.len())
    }

    fn ensure_healthy(data: &LocalData) -> RepositoryResult<()> {
        if data.is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::ConnectionError(
                "Local repository marked unhealthy".to_string(),
            ))
        }
    }
}

#[async_trait]
impl RosterRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.read()?.is_healthy)
    }

    async fn list_assignments(
        &self,
        obra_id: Option<ObraId>,
    ) -> RepositoryResult<Vec<ProfessionalAssignment>> {
        let data = self.read()?;
        Self::ensure_healthy(&data)?;
        Ok(data
            .assignments
            .iter()
            .filter(|row| obra_id.map_or(true, |id| row.obra_id == id))
            .cloned()
            .collect())
    }

    async fn list_contracts(&self) -> RepositoryResult<Vec<ContractRecord>> {
        let data = self.read()?;
        Self::ensure_healthy(&data)?;
        Ok(data.contracts.values().cloned().collect())
    }
}
