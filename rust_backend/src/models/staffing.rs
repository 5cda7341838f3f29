//! Professional staffing ("plantel profesional") and participation shares.

use serde::{Deserialize, Serialize};

use super::dates::AssignmentWindow;
use super::obra::{EmpresaId, ObraId};

/// Participation at which a professional is considered exclusively booked.
///
/// A person can legitimately be split across several works at partial
/// allocations; only a full-time assignment blocks concurrent full-time ones.
pub const FULL_TIME_THRESHOLD: f64 = 100.0;

/// Whether a participation percentage is exactly full-time.
pub fn is_full_time(percentage: f64) -> bool {
    percentage == FULL_TIME_THRESHOLD
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentState {
    Active,
    Inactive,
}

/// One row of an obra's professional roster.
///
/// The professional is identified by `professional_name` (exact, case-sensitive
/// match). Rows are never removed from the roster; retiring an assignment sets
/// its state to [`AssignmentState::Inactive`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalAssignment {
    pub professional_name: String,
    pub obra_id: ObraId,
    pub participation_percentage: f64,
    pub window: AssignmentWindow,
    pub state: AssignmentState,
}

impl ProfessionalAssignment {
    pub fn is_active(&self) -> bool {
        self.state == AssignmentState::Active
    }

    pub fn is_full_time(&self) -> bool {
        is_full_time(self.participation_percentage)
    }
}

/// A consortium member's ownership slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticipationShare {
    pub holder_id: EmpresaId,
    pub percentage: f64,
}

impl ParticipationShare {
    pub fn new(holder_id: EmpresaId, percentage: f64) -> Self {
        Self {
            holder_id,
            percentage,
        }
    }
}
