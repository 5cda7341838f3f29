//! Atomic validators for primitive business fields.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{field, ErrorCode, ValidationError};

const RUC_LENGTH: usize = 11;
/// Prefix reserved for legal entities in the RUC numbering scheme.
const RUC_ENTITY_PREFIX: &str = "20";

const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Validates a company RUC.
///
/// Checks run in priority order and only the first failure is reported:
/// required, length 11, all digits, `"20"` prefix.
///
/// # Examples
///
/// ```
/// use obras_rust::validation::{validate_ruc, ErrorCode};
///
/// assert!(validate_ruc("20123456789").is_none());
/// let err = validate_ruc("10123456789").unwrap();
/// assert_eq!(err.code, Some(ErrorCode::RucPrefix));
/// ```
pub fn validate_ruc(value: &str) -> Option<ValidationError> {
    if value.trim().is_empty() {
        return Some(ValidationError::coded(
            field::RUC,
            ErrorCode::RucRequired,
            "El RUC es obligatorio",
        ));
    }

    if value.chars().count() != RUC_LENGTH {
        return Some(ValidationError::coded(
            field::RUC,
            ErrorCode::RucLength,
            format!("El RUC debe tener {} dígitos", RUC_LENGTH),
        ));
    }

    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Some(ValidationError::coded(
            field::RUC,
            ErrorCode::RucFormat,
            "El RUC solo debe contener números",
        ));
    }

    if !value.starts_with(RUC_ENTITY_PREFIX) {
        return Some(ValidationError::coded(
            field::RUC,
            ErrorCode::RucPrefix,
            format!(
                "El RUC de una persona jurídica debe empezar con {}",
                RUC_ENTITY_PREFIX
            ),
        ));
    }

    None
}

/// Validates an optional email; absent or blank passes.
pub fn validate_email(value: Option<&str>) -> Option<ValidationError> {
    let email = value.map(str::trim).filter(|v| !v.is_empty())?;
    if EMAIL_RE.is_match(email) {
        None
    } else {
        Some(ValidationError::coded(
            field::EMAIL,
            ErrorCode::EmailFormat,
            "El email no tiene un formato válido",
        ))
    }
}

/// Validates an optional phone number; absent or blank passes.
///
/// Spaces, hyphens and parentheses are ignored and a single leading `+` is
/// accepted. What remains must be 7 to 15 digits.
pub fn validate_phone(value: Option<&str>) -> Option<ValidationError> {
    let phone = value.map(str::trim).filter(|v| !v.is_empty())?;
    let unprefixed = phone.strip_prefix('+').unwrap_or(phone);
    let digits: String = unprefixed
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Some(ValidationError::coded(
            field::TELEFONO,
            ErrorCode::PhoneFormat,
            "El teléfono solo debe contener números",
        ));
    }

    let len = digits.len();
    if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&len) {
        return Some(ValidationError::coded(
            field::TELEFONO,
            ErrorCode::PhoneLength,
            format!(
                "El teléfono debe tener entre {} y {} dígitos",
                PHONE_MIN_DIGITS, PHONE_MAX_DIGITS
            ),
        ));
    }

    None
}

/// Validates a participation percentage: `0 < value <= 100`.
///
/// The error targets [`field::PORCENTAJE`]; callers validating a specific row
/// re-target it with [`ValidationError::at`].
pub fn validate_percentage(value: f64) -> Option<ValidationError> {
    if value > 0.0 && value <= 100.0 {
        None
    } else {
        Some(ValidationError::coded(
            field::PORCENTAJE,
            ErrorCode::PercentageRange,
            "El porcentaje debe ser mayor que 0 y como máximo 100",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(err: Option<ValidationError>) -> Option<ErrorCode> {
        err.and_then(|e| e.code)
    }

    #[test]
    fn test_ruc_priority_order() {
        assert_eq!(code(validate_ruc("")), Some(ErrorCode::RucRequired));
        assert_eq!(code(validate_ruc("   ")), Some(ErrorCode::RucRequired));
        assert_eq!(code(validate_ruc("2012345")), Some(ErrorCode::RucLength));
        // Wrong length wins over non-digits
        assert_eq!(code(validate_ruc("20ABC")), Some(ErrorCode::RucLength));
        assert_eq!(code(validate_ruc("20ABC456789")), Some(ErrorCode::RucFormat));
        // Non-digits win over the prefix
        assert_eq!(code(validate_ruc("1A123456789")), Some(ErrorCode::RucFormat));
        assert_eq!(code(validate_ruc("10123456789")), Some(ErrorCode::RucPrefix));
        assert_eq!(code(validate_ruc("20123456789")), None);
    }

    #[test]
    fn test_ruc_error_targets_ruc_field() {
        let err = validate_ruc("1").unwrap();
        assert_eq!(err.field, field::RUC);
    }

    #[test]
    fn test_email_optional() {
        assert!(validate_email(None).is_none());
        assert!(validate_email(Some("")).is_none());
        assert!(validate_email(Some("obras@muni.gob.pe")).is_none());
        assert_eq!(
            code(validate_email(Some("obras.muni.gob.pe"))),
            Some(ErrorCode::EmailFormat)
        );
        assert_eq!(
            code(validate_email(Some("obras@muni"))),
            Some(ErrorCode::EmailFormat)
        );
        assert_eq!(
            code(validate_email(Some("obras @muni.pe"))),
            Some(ErrorCode::EmailFormat)
        );
    }

    #[test]
    fn test_phone_stripping_and_bounds() {
        assert!(validate_phone(None).is_none());
        assert!(validate_phone(Some("(01) 234-5678")).is_none());
        assert!(validate_phone(Some("+51 987 654 321")).is_none());
        assert_eq!(code(validate_phone(Some("123-45"))), Some(ErrorCode::PhoneLength));
        assert_eq!(
            code(validate_phone(Some("1234567890123456"))),
            Some(ErrorCode::PhoneLength)
        );
        assert_eq!(
            code(validate_phone(Some("987-ABC-321"))),
            Some(ErrorCode::PhoneFormat)
        );
    }

    #[test]
    fn test_phone_boundary_lengths() {
        assert!(validate_phone(Some("1234567")).is_none());
        assert!(validate_phone(Some("123456789012345")).is_none());
    }

    #[test]
    fn test_percentage_bounds() {
        assert!(validate_percentage(0.0).is_some());
        assert!(validate_percentage(-5.0).is_some());
        assert!(validate_percentage(100.01).is_some());
        assert!(validate_percentage(f64::NAN).is_some());
        assert!(validate_percentage(0.01).is_none());
        assert!(validate_percentage(100.0).is_none());
    }
}
