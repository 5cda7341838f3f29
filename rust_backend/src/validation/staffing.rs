//! Row-level checks for the professional roster form.
//!
//! Staffing percentages are an allocation of one person's time across works, so
//! each row is bounded individually and never reconciled to 100.

use super::fields::validate_percentage;
use super::{field, ErrorCode, ValidationError};
use crate::models::ProfessionalAssignment;

pub fn validate_assignment(assignment: &ProfessionalAssignment) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if assignment.professional_name.trim().is_empty() {
        errors.push(ValidationError::coded(
            field::NOMBRE_PROFESIONAL,
            ErrorCode::Required,
            "El nombre del profesional es obligatorio",
        ));
    }

    errors.extend(validate_percentage(assignment.participation_percentage));

    if let Some(end) = assignment.window.end {
        if end < assignment.window.start {
            errors.push(ValidationError::coded(
                field::FECHA_FIN,
                ErrorCode::RangoInvalido,
                "La fecha de fin no puede ser anterior a la fecha de inicio",
            ));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssignmentState, AssignmentWindow, ObraId};
    use chrono::NaiveDate;

    fn assignment(name: &str, pct: f64, end: Option<NaiveDate>) -> ProfessionalAssignment {
        ProfessionalAssignment {
            professional_name: name.to_string(),
            obra_id: ObraId(1),
            participation_percentage: pct,
            window: AssignmentWindow::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), end),
            state: AssignmentState::Active,
        }
    }

    #[test]
    fn test_valid_partial_assignment() {
        assert!(validate_assignment(&assignment("Ing. Rosa Quispe", 50.0, None)).is_empty());
    }

    #[test]
    fn test_invalid_row_reports_every_field() {
        let errors = validate_assignment(&assignment(
            "",
            120.0,
            NaiveDate::from_ymd_opt(2025, 2, 1),
        ));
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![field::NOMBRE_PROFESIONAL, field::PORCENTAJE, field::FECHA_FIN]
        );
    }
}
