use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::overlap::intersection;
use crate::models::{
    is_full_time, ContractRecord, DateRange, ObraId, ProfessionalAssignment,
};

/// An existing full-time assignment that collides with the candidate window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentConflict {
    pub obra_id: ObraId,
    pub obra_name: String,
    pub contract_number: String,
    /// Effective range of the existing assignment.
    pub conflicting_range: DateRange,
    /// Days booked by both assignments.
    pub overlapping_days: DateRange,
}

/// Availability verdict for a professional.
///
/// `available == false` is an expected outcome, not an error: callers show the
/// conflicts as a warning and may still save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictResult {
    pub available: bool,
    pub conflicts: Vec<AssignmentConflict>,
}

impl ConflictResult {
    pub fn available() -> Self {
        Self {
            available: true,
            conflicts: Vec::new(),
        }
    }

    pub fn from_conflicts(conflicts: Vec<AssignmentConflict>) -> Self {
        Self {
            available: conflicts.is_empty(),
            conflicts,
        }
    }
}

/// Detects double-booking of full-time professionals across obras.
///
/// Built over the known contracts so each roster row can be checked against its
/// owning obra's state and planned end date. Holds only borrowed data; it never
/// mutates the roster.
pub struct ProfessionalConflictChecker<'a> {
    contracts: HashMap<ObraId, &'a ContractRecord>,
}

impl<'a> ProfessionalConflictChecker<'a> {
    pub fn new(contracts: &'a [ContractRecord]) -> Self {
        Self {
            contracts: contracts.iter().map(|c| (c.id, c)).collect(),
        }
    }

    /// Checks a candidate assignment against the roster.
    ///
    /// Only a full-time, active candidate can conflict; anything else is
    /// reported available without looking at the roster. An open-ended
    /// candidate window ends at its own obra's planned end; if that obra is
    /// unknown the window is left unbounded.
    pub fn check(
        &self,
        candidate: &ProfessionalAssignment,
        roster: &[ProfessionalAssignment],
        exclude_obra_id: Option<ObraId>,
    ) -> ConflictResult {
        if !candidate.is_active() || !is_full_time(candidate.participation_percentage) {
            return ConflictResult::available();
        }

        let fallback_end = self.planned_end(candidate.obra_id).unwrap_or(NaiveDate::MAX);
        let Some(range) = candidate.window.resolve(Some(fallback_end)) else {
            debug!(
                "Candidate window for '{}' ends before it starts; nothing to check",
                candidate.professional_name
            );
            return ConflictResult::available();
        };

        self.check_range(&candidate.professional_name, &range, roster, exclude_obra_id)
    }

    /// Checks a full-time booking of `professional_name` over `range`.
    pub fn check_range(
        &self,
        professional_name: &str,
        range: &DateRange,
        roster: &[ProfessionalAssignment],
        exclude_obra_id: Option<ObraId>,
    ) -> ConflictResult {
        let conflicts = roster
            .iter()
            .filter(|row| row.professional_name == professional_name)
            .filter(|row| row.is_full_time() && row.is_active())
            .filter(|row| Some(row.obra_id) != exclude_obra_id)
            .filter_map(|row| self.conflict_for(row, range))
            .collect();

        ConflictResult::from_conflicts(conflicts)
    }

    fn conflict_for(
        &self,
        row: &ProfessionalAssignment,
        range: &DateRange,
    ) -> Option<AssignmentConflict> {
        let Some(obra) = self.contracts.get(&row.obra_id) else {
            debug!(
                "Skipping roster row for obra {}: obra not found among contracts",
                row.obra_id
            );
            return None;
        };

        if !obra.holds_staff() {
            return None;
        }

        let effective = row.window.resolve(obra.planned_end_date())?;
        let shared = intersection(&effective, range)?;
        debug!(
            "'{}' double-booked on obra {} for {} day(s) {}",
            row.professional_name,
            obra.id,
            shared.days(),
            shared
        );

        Some(AssignmentConflict {
            obra_id: obra.id,
            obra_name: obra.name.clone(),
            contract_number: obra.contract_number.clone(),
            conflicting_range: effective,
            overlapping_days: shared,
        })
    }

    fn planned_end(&self, obra_id: ObraId) -> Option<NaiveDate> {
        self.contracts
            .get(&obra_id)
            .and_then(|obra| obra.planned_end_date())
    }
}

/// Convenience wrapper over [`ProfessionalConflictChecker::check`].
pub fn check_conflicts(
    candidate: &ProfessionalAssignment,
    roster: &[ProfessionalAssignment],
    contracts: &[ContractRecord],
    exclude_obra_id: Option<ObraId>,
) -> ConflictResult {
    ProfessionalConflictChecker::new(contracts).check(candidate, roster, exclude_obra_id)
}
