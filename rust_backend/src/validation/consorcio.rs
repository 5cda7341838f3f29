//! Consortium ("consorcio") membership and ownership validation.

use std::collections::HashSet;

use super::fields::validate_percentage;
use super::percentages::{reconcile_with_tolerance, SUM_TOLERANCE};
use super::{field, ErrorCode, ValidationError};
use crate::models::{EmpresaId, ParticipationShare};

/// Validates a consortium's participants.
///
/// Checks, in order, and reports the first failure:
/// 1. every participant is a known empresa
/// 2. no empresa appears twice
/// 3. the lead empresa is one of the participants
/// 4. each share is within `(0, 100]`
/// 5. the shares add up to 100
pub fn validate_consorcio(
    participaciones: &[ParticipationShare],
    lead_id: Option<EmpresaId>,
    known_empresa_ids: &HashSet<EmpresaId>,
) -> Option<ValidationError> {
    validate_consorcio_with_tolerance(participaciones, lead_id, known_empresa_ids, SUM_TOLERANCE)
}

/// [`validate_consorcio`] with an explicit sum tolerance.
pub fn validate_consorcio_with_tolerance(
    participaciones: &[ParticipationShare],
    lead_id: Option<EmpresaId>,
    known_empresa_ids: &HashSet<EmpresaId>,
    tolerance: f64,
) -> Option<ValidationError> {
    if let Some(unknown) = participaciones
        .iter()
        .find(|p| !known_empresa_ids.contains(&p.holder_id))
    {
        return Some(ValidationError::coded(
            field::PARTICIPACIONES,
            ErrorCode::EmpresaDesconocida,
            format!("La empresa {} no está registrada", unknown.holder_id),
        ));
    }

    let mut seen = HashSet::with_capacity(participaciones.len());
    if let Some(dup) = participaciones.iter().find(|p| !seen.insert(p.holder_id)) {
        return Some(ValidationError::coded(
            field::PARTICIPACIONES,
            ErrorCode::ParticipanteDuplicado,
            format!("La empresa {} figura más de una vez en el consorcio", dup.holder_id),
        ));
    }

    let lead_participates =
        lead_id.is_some_and(|lead| participaciones.iter().any(|p| p.holder_id == lead));
    if !lead_participates {
        return Some(ValidationError::coded(
            field::EMPRESA_LIDER,
            ErrorCode::LiderNoParticipa,
            "La empresa líder debe ser uno de los participantes del consorcio",
        ));
    }

    for (index, share) in participaciones.iter().enumerate() {
        if let Some(err) = validate_percentage(share.percentage) {
            return Some(err.at(format!("{}[{}]", field::PARTICIPACIONES, index)));
        }
    }

    let shares: Vec<f64> = participaciones.iter().map(|p| p.percentage).collect();
    reconcile_with_tolerance(&shares, tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(ids: &[i64]) -> HashSet<EmpresaId> {
        ids.iter().copied().map(EmpresaId).collect()
    }

    #[test]
    fn test_valid_consortium() {
        let shares = vec![
            ParticipationShare::new(EmpresaId(1), 60.0),
            ParticipationShare::new(EmpresaId(2), 40.0),
        ];
        assert!(validate_consorcio(&shares, Some(EmpresaId(1)), &known(&[1, 2, 3])).is_none());
    }

    #[test]
    fn test_unknown_empresa() {
        let shares = vec![
            ParticipationShare::new(EmpresaId(1), 60.0),
            ParticipationShare::new(EmpresaId(9), 40.0),
        ];
        let err = validate_consorcio(&shares, Some(EmpresaId(1)), &known(&[1, 2])).unwrap();
        assert_eq!(err.code, Some(ErrorCode::EmpresaDesconocida));
        assert!(err.message.contains('9'));
    }

    #[test]
    fn test_duplicate_participant() {
        let shares = vec![
            ParticipationShare::new(EmpresaId(1), 50.0),
            ParticipationShare::new(EmpresaId(1), 50.0),
        ];
        let err = validate_consorcio(&shares, Some(EmpresaId(1)), &known(&[1])).unwrap();
        assert_eq!(err.code, Some(ErrorCode::ParticipanteDuplicado));
    }

    #[test]
    fn test_lead_must_participate() {
        let shares = vec![
            ParticipationShare::new(EmpresaId(1), 60.0),
            ParticipationShare::new(EmpresaId(2), 40.0),
        ];
        let err = validate_consorcio(&shares, Some(EmpresaId(3)), &known(&[1, 2, 3])).unwrap();
        assert_eq!(err.field, field::EMPRESA_LIDER);

        let err = validate_consorcio(&shares, None, &known(&[1, 2])).unwrap();
        assert_eq!(err.code, Some(ErrorCode::LiderNoParticipa));
    }

    #[test]
    fn test_share_bounds_point_at_row() {
        let shares = vec![
            ParticipationShare::new(EmpresaId(1), 100.0),
            ParticipationShare::new(EmpresaId(2), 0.0),
        ];
        let err = validate_consorcio(&shares, Some(EmpresaId(1)), &known(&[1, 2])).unwrap();
        assert_eq!(err.code, Some(ErrorCode::PercentageRange));
        assert_eq!(err.field, "participaciones[1]");
    }

    #[test]
    fn test_sum_must_reconcile() {
        let shares = vec![
            ParticipationShare::new(EmpresaId(1), 55.0),
            ParticipationShare::new(EmpresaId(2), 40.0),
        ];
        let err = validate_consorcio(&shares, Some(EmpresaId(2)), &known(&[1, 2])).unwrap();
        assert_eq!(err.code, Some(ErrorCode::PercentageSum));
        assert!(err.message.contains("95.00"));
    }

    #[test]
    fn test_tolerance_is_configurable() {
        let shares = vec![
            ParticipationShare::new(EmpresaId(1), 60.0),
            ParticipationShare::new(EmpresaId(2), 39.5),
        ];
        let ids = known(&[1, 2]);
        assert!(validate_consorcio(&shares, Some(EmpresaId(1)), &ids).is_some());
        assert!(validate_consorcio_with_tolerance(&shares, Some(EmpresaId(1)), &ids, 1.0).is_none());
    }
}
