//! Reconciliation of exhaustive percentage allocations.

use super::{field, ErrorCode, ValidationError};

/// Allowed drift from 100 when summing shares, absorbing float summation error.
pub const SUM_TOLERANCE: f64 = 0.01;

/// Checks that `shares` add up to 100 within [`SUM_TOLERANCE`].
///
/// Used for consortium ownership and any other allocation that must be
/// exhaustive. The error message carries the computed total to two decimals.
///
/// # Examples
///
/// ```
/// use obras_rust::validation::reconcile;
///
/// assert!(reconcile(&[60.0, 40.0]).is_none());
/// let err = reconcile(&[60.0, 30.0]).unwrap();
/// assert!(err.message.contains("90.00"));
/// ```
pub fn reconcile(shares: &[f64]) -> Option<ValidationError> {
    reconcile_with_tolerance(shares, SUM_TOLERANCE)
}

pub fn reconcile_with_tolerance(shares: &[f64], tolerance: f64) -> Option<ValidationError> {
    let sum: f64 = shares.iter().sum();
    if (sum - 100.0).abs() <= tolerance {
        return None;
    }

    Some(ValidationError::coded(
        field::PARTICIPACIONES,
        ErrorCode::PercentageSum,
        format!(
            "La suma de participaciones debe ser 100% (actual: {}%)",
            format_percentage(sum)
        ),
    ))
}

/// Two-decimal rendering used in user-facing percentage messages.
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}", value)
}
