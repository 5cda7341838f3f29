//! Aggregate validation of the obra and empresa forms.
//!
//! Aggregate validators never short-circuit: every rule runs and all failures
//! are returned together so the form can show the complete list in one pass.

use chrono::{Months, NaiveDate};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::consorcio::validate_consorcio_with_tolerance;
use super::fields::{validate_email, validate_phone, validate_ruc};
use super::policy::ValidationPolicy;
use super::{field, ErrorCode, ValidationError, ValidationResult};
use crate::law::{applicable_law, Ley};
use crate::models::{planned_end_date, EmpresaId, ParticipationShare};

static DEFAULT_OBRA_VALIDATOR: Lazy<ObraFormValidator> = Lazy::new(ObraFormValidator::default);

/// Candidate obra as captured by the registration/edit form.
///
/// Every field is optional or may be blank; the validator reports what is
/// missing instead of failing to deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObraFormInput {
    #[serde(rename = "numero_contrato", default)]
    pub contract_number: String,
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "entidad_ejecutora_id", default)]
    pub execution_entity_id: Option<EmpresaId>,
    #[serde(rename = "entidad_supervisora_id", default)]
    pub supervision_entity_id: Option<EmpresaId>,
    #[serde(rename = "monto_ejecucion", default)]
    pub execution_amount: Option<Decimal>,
    #[serde(rename = "monto_supervision", default)]
    pub supervision_amount: Option<Decimal>,
    #[serde(rename = "fecha_contrato", default)]
    pub contract_date: Option<NaiveDate>,
    #[serde(rename = "fecha_inicio", default)]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "plazo_ejecucion_dias", default)]
    pub execution_days: Option<i64>,
    /// Explicit termination date, when the contract declares one.
    #[serde(rename = "fecha_termino", default)]
    pub end_date: Option<NaiveDate>,
}

impl ObraFormInput {
    /// Planned end date preview (`start + execution days`), when computable.
    pub fn planned_end_date(&self) -> Option<NaiveDate> {
        let days = u32::try_from(self.execution_days?).ok()?;
        planned_end_date(self.start_date?, days)
    }

    /// Law derived from the contract date, once a date is present.
    pub fn applicable_law(&self) -> Option<Ley> {
        self.contract_date.map(applicable_law)
    }
}

/// Obra form validator bound to a [`ValidationPolicy`].
#[derive(Debug, Clone, Default)]
pub struct ObraFormValidator {
    policy: ValidationPolicy,
}

impl ObraFormValidator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Runs every obra rule and collects all failures.
    ///
    /// `today` anchors the "start date not in the past" rule.
    pub fn validate(&self, form: &ObraFormInput, today: NaiveDate) -> ValidationResult {
        let mut errors = Vec::new();

        errors.extend(self.validate_contract_number(&form.contract_number));
        errors.extend(validate_name(&form.name));
        errors.extend(self.validate_montos(form.execution_amount, form.supervision_amount));
        errors.extend(self.validate_fechas(form, today));
        errors.extend(validate_entidades(
            form.execution_entity_id,
            form.supervision_entity_id,
        ));

        ValidationResult::from_errors(errors)
    }

    /// Consortium check using this policy's sum tolerance.
    pub fn validate_consorcio(
        &self,
        participaciones: &[ParticipationShare],
        lead_id: Option<EmpresaId>,
        known_empresa_ids: &HashSet<EmpresaId>,
    ) -> Option<ValidationError> {
        validate_consorcio_with_tolerance(
            participaciones,
            lead_id,
            known_empresa_ids,
            self.policy.percentage_tolerance,
        )
    }

    pub fn validate_contract_number(&self, number: &str) -> Option<ValidationError> {
        let number = number.trim();
        if number.is_empty() {
            return Some(ValidationError::coded(
                field::NUMERO_CONTRATO,
                ErrorCode::Required,
                "El número de contrato es obligatorio",
            ));
        }

        if !self.policy.contract_number_pattern.is_match(number) {
            return Some(ValidationError::coded(
                field::NUMERO_CONTRATO,
                ErrorCode::FormatoInvalido,
                "El número de contrato no tiene el formato esperado (ej. N.º 07-2025-MDS/GM)",
            ));
        }

        None
    }

    /// Execution amount must be positive, supervision non-negative and at most
    /// the configured share of execution.
    ///
    /// The supervision cap is a soft rule in the business sense but is reported
    /// as an ordinary error so it surfaces the same way as hard failures.
    pub fn validate_montos(
        &self,
        execution_amount: Option<Decimal>,
        supervision_amount: Option<Decimal>,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let execution = match execution_amount {
            Some(amount) if amount > Decimal::ZERO => Some(amount),
            Some(_) => {
                errors.push(ValidationError::coded(
                    field::MONTO_EJECUCION,
                    ErrorCode::MontoInvalido,
                    "El monto de ejecución debe ser mayor que 0",
                ));
                None
            }
            None => {
                errors.push(ValidationError::coded(
                    field::MONTO_EJECUCION,
                    ErrorCode::Required,
                    "El monto de ejecución es obligatorio",
                ));
                None
            }
        };

        let supervision = supervision_amount.unwrap_or(Decimal::ZERO);
        if supervision < Decimal::ZERO {
            errors.push(ValidationError::coded(
                field::MONTO_SUPERVISION,
                ErrorCode::MontoInvalido,
                "El monto de supervisión no puede ser negativo",
            ));
        } else if let Some(execution) = execution {
            let cap_ratio = self.policy.supervision_ratio_cap;
            // An overflowing cap is larger than any representable supervision amount
            let exceeds = execution
                .checked_mul(cap_ratio)
                .is_some_and(|cap| supervision > cap);
            if exceeds {
                errors.push(ValidationError::coded(
                    field::MONTO_SUPERVISION,
                    ErrorCode::SupervisionExcedeLimite,
                    supervision_cap_message(supervision, execution, cap_ratio),
                ));
            }
        }

        errors
    }

    pub fn validate_fechas(&self, form: &ObraFormInput, today: NaiveDate) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        match form.start_date {
            None => errors.push(ValidationError::coded(
                field::FECHA_INICIO,
                ErrorCode::Required,
                "La fecha de inicio es obligatoria",
            )),
            Some(start) => {
                if start < today {
                    errors.push(ValidationError::coded(
                        field::FECHA_INICIO,
                        ErrorCode::FechaInicioPasada,
                        "La fecha de inicio no puede ser anterior a hoy",
                    ));
                }
                if let Some(contract_date) = form.contract_date {
                    if start < contract_date {
                        errors.push(ValidationError::coded(
                            field::FECHA_INICIO,
                            ErrorCode::FechaAnteriorContrato,
                            "La fecha de inicio no puede ser anterior a la fecha de contrato",
                        ));
                    }
                }
            }
        }

        let max_days = i64::from(self.policy.max_execution_days);
        match form.execution_days {
            None => errors.push(ValidationError::coded(
                field::PLAZO_EJECUCION,
                ErrorCode::Required,
                "El plazo de ejecución es obligatorio",
            )),
            Some(days) if days <= 0 || days > max_days => errors.push(ValidationError::coded(
                field::PLAZO_EJECUCION,
                ErrorCode::PlazoFueraDeRango,
                format!("El plazo de ejecución debe estar entre 1 y {} días", max_days),
            )),
            Some(_) => {}
        }

        if let (Some(start), Some(end)) = (form.start_date, form.end_date) {
            if end <= start {
                errors.push(ValidationError::coded(
                    field::FECHA_TERMINO,
                    ErrorCode::FechaTerminoInvalida,
                    "La fecha de término debe ser posterior a la fecha de inicio",
                ));
            } else {
                let years = self.policy.max_termination_years;
                let limit = years
                    .checked_mul(12)
                    .and_then(|months| start.checked_add_months(Months::new(months)));
                if limit.map_or(false, |limit| end > limit) {
                    errors.push(ValidationError::coded(
                        field::FECHA_TERMINO,
                        ErrorCode::FechaTerminoExcedeLimite,
                        format!(
                            "La fecha de término no puede superar {} años desde el inicio",
                            years
                        ),
                    ));
                }
            }
        }

        errors
    }
}

fn supervision_cap_message(supervision: Decimal, execution: Decimal, cap_ratio: Decimal) -> String {
    let percent = |value: Decimal| value.checked_mul(Decimal::ONE_HUNDRED);
    let ratio = supervision
        .checked_div(execution)
        .and_then(percent)
        .map(|r| r.round_dp(2));
    let cap_pct = percent(cap_ratio).map(|c| c.normalize());

    match (ratio, cap_pct) {
        (Some(ratio), Some(cap_pct)) => format!(
            "El monto de supervisión ({}% del monto de ejecución) supera el {}% permitido",
            ratio, cap_pct
        ),
        (None, Some(cap_pct)) => format!(
            "El monto de supervisión supera el {}% del monto de ejecución permitido",
            cap_pct
        ),
        _ => "El monto de supervisión supera el límite permitido".to_string(),
    }
}

fn validate_name(name: &str) -> Option<ValidationError> {
    if name.trim().is_empty() {
        Some(ValidationError::coded(
            field::NOMBRE,
            ErrorCode::Required,
            "El nombre de la obra es obligatorio",
        ))
    } else {
        None
    }
}

/// Both entities are required and must be different companies.
pub fn validate_entidades(
    execution_entity_id: Option<EmpresaId>,
    supervision_entity_id: Option<EmpresaId>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if execution_entity_id.is_none() {
        errors.push(ValidationError::coded(
            field::ENTIDAD_EJECUTORA,
            ErrorCode::EntidadRequerida,
            "Seleccione la entidad ejecutora",
        ));
    }
    if supervision_entity_id.is_none() {
        errors.push(ValidationError::coded(
            field::ENTIDAD_SUPERVISORA,
            ErrorCode::EntidadRequerida,
            "Seleccione la entidad supervisora",
        ));
    }
    if let (Some(exec), Some(sup)) = (execution_entity_id, supervision_entity_id) {
        if exec == sup {
            errors.push(ValidationError::coded(
                field::ENTIDAD_SUPERVISORA,
                ErrorCode::EntidadesIguales,
                "La entidad supervisora debe ser distinta de la entidad ejecutora",
            ));
        }
    }

    errors
}

/// Validates an obra form with the default policy.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use obras_rust::validation::{validate_obra_form, ObraFormInput};
///
/// let today = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
/// let result = validate_obra_form(&ObraFormInput::default(), today);
/// assert!(!result.valid);
/// assert!(result.has_error("nombre"));
/// ```
pub fn validate_obra_form(form: &ObraFormInput, today: NaiveDate) -> ValidationResult {
    DEFAULT_OBRA_VALIDATOR.validate(form, today)
}

/// Contractor/supervisor company form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmpresaFormInput {
    #[serde(default)]
    pub ruc: String,
    #[serde(default)]
    pub razon_social: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
}

/// RUC, required razón social, optional email and phone.
pub fn validate_empresa_form(form: &EmpresaFormInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_ruc(&form.ruc));
    if form.razon_social.trim().is_empty() {
        errors.push(ValidationError::coded(
            field::RAZON_SOCIAL,
            ErrorCode::Required,
            "La razón social es obligatoria",
        ));
    }
    errors.extend(validate_email(form.email.as_deref()));
    errors.extend(validate_phone(form.telefono.as_deref()));

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn today() -> NaiveDate {
        d(2025, 5, 1)
    }

    fn valid_form() -> ObraFormInput {
        ObraFormInput {
            contract_number: "N.º 07-2025-MDS/GM".to_string(),
            name: "Mejoramiento del servicio de transitabilidad".to_string(),
            execution_entity_id: Some(EmpresaId(1)),
            supervision_entity_id: Some(EmpresaId(2)),
            execution_amount: Some(Decimal::from(1_000_000)),
            supervision_amount: Some(Decimal::from(100_000)),
            contract_date: Some(d(2025, 4, 25)),
            start_date: Some(d(2025, 5, 5)),
            execution_days: Some(180),
            end_date: None,
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let result = validate_obra_form(&valid_form(), today());
        assert!(result.valid, "{:?}", result.errors);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_all_errors_reported_together() {
        let form = ObraFormInput {
            contract_number: "CT-1".to_string(),
            name: "  ".to_string(),
            execution_entity_id: Some(EmpresaId(3)),
            supervision_entity_id: Some(EmpresaId(3)),
            execution_amount: Some(Decimal::ZERO),
            supervision_amount: Some(Decimal::from(-1)),
            contract_date: None,
            start_date: Some(d(2025, 4, 1)),
            execution_days: Some(0),
            end_date: None,
        };

        let result = validate_obra_form(&form, today());
        let codes: Vec<_> = result.errors.iter().filter_map(|e| e.code).collect();
        assert_eq!(
            codes,
            vec![
                ErrorCode::FormatoInvalido,
                ErrorCode::Required,
                ErrorCode::MontoInvalido,
                ErrorCode::MontoInvalido,
                ErrorCode::FechaInicioPasada,
                ErrorCode::PlazoFueraDeRango,
                ErrorCode::EntidadesIguales,
            ]
        );
    }

    #[test]
    fn test_execution_days_bounds() {
        let mut form = valid_form();
        form.execution_days = Some(1096);
        assert!(validate_obra_form(&form, today()).has_error(field::PLAZO_EJECUCION));

        form.execution_days = Some(1095);
        assert!(!validate_obra_form(&form, today()).has_error(field::PLAZO_EJECUCION));

        form.execution_days = Some(1);
        assert!(!validate_obra_form(&form, today()).has_error(field::PLAZO_EJECUCION));

        form.execution_days = None;
        let result = validate_obra_form(&form, today());
        assert_eq!(
            result.error_for(field::PLAZO_EJECUCION).unwrap().code,
            Some(ErrorCode::Required)
        );
    }

    #[test]
    fn test_supervision_ratio_cap() {
        let mut form = valid_form();
        form.execution_amount = Some(Decimal::from(400_000));

        form.supervision_amount = Some(Decimal::from(100_000)); // 25%
        let result = validate_obra_form(&form, today());
        let err = result.error_for(field::MONTO_SUPERVISION).unwrap();
        assert_eq!(err.code, Some(ErrorCode::SupervisionExcedeLimite));
        assert!(err.message.contains("25"), "{}", err.message);

        form.supervision_amount = Some(Decimal::from(80_000)); // exactly 20%
        assert!(!validate_obra_form(&form, today()).has_error(field::MONTO_SUPERVISION));
    }

    #[test]
    fn test_missing_supervision_counts_as_zero() {
        let mut form = valid_form();
        form.supervision_amount = None;
        assert!(validate_obra_form(&form, today()).valid);
    }

    #[test]
    fn test_extreme_amounts_report_instead_of_panicking() {
        let mut form = valid_form();
        form.execution_amount = Some(Decimal::new(1, 2));
        form.supervision_amount = Some(Decimal::from_i128_with_scale(10_i128.pow(27), 0));

        let result = validate_obra_form(&form, today());
        let err = result.error_for(field::MONTO_SUPERVISION).unwrap();
        assert_eq!(err.code, Some(ErrorCode::SupervisionExcedeLimite));
        assert!(err.message.contains("20%"), "{}", err.message);
    }

    #[test]
    fn test_huge_termination_limit_does_not_overflow() {
        let validator = ObraFormValidator::new(ValidationPolicy {
            max_termination_years: u32::MAX,
            ..ValidationPolicy::default()
        });
        let mut form = valid_form();
        form.end_date = Some(d(2099, 12, 31));

        let result = validator.validate(&form, today());
        assert!(!result.has_error(field::FECHA_TERMINO));
    }

    #[test]
    fn test_start_today_is_allowed() {
        let mut form = valid_form();
        form.contract_date = Some(today());
        form.start_date = Some(today());
        assert!(validate_obra_form(&form, today()).valid);
    }

    #[test]
    fn test_start_before_contract_date() {
        let mut form = valid_form();
        form.contract_date = Some(d(2025, 5, 10));
        let result = validate_obra_form(&form, today());
        assert!(result.has_code(ErrorCode::FechaAnteriorContrato));
    }

    #[test]
    fn test_termination_date_rules() {
        let mut form = valid_form();

        form.end_date = form.start_date;
        assert!(validate_obra_form(&form, today()).has_code(ErrorCode::FechaTerminoInvalida));

        form.end_date = Some(d(2030, 5, 5));
        assert!(validate_obra_form(&form, today()).valid);

        form.end_date = Some(d(2030, 5, 6));
        assert!(validate_obra_form(&form, today()).has_code(ErrorCode::FechaTerminoExcedeLimite));
    }

    #[test]
    fn test_missing_entities() {
        let mut form = valid_form();
        form.execution_entity_id = None;
        form.supervision_entity_id = None;
        let result = validate_obra_form(&form, today());
        assert!(result.has_error(field::ENTIDAD_EJECUTORA));
        assert!(result.has_error(field::ENTIDAD_SUPERVISORA));
        assert!(!result.has_code(ErrorCode::EntidadesIguales));
    }

    #[test]
    fn test_custom_policy_pattern() {
        let policy = ValidationPolicy::with_contract_pattern(r"^CT-\d{4}$").unwrap();
        let validator = ObraFormValidator::new(policy);
        let mut form = valid_form();
        form.contract_number = "CT-0042".to_string();
        assert!(validator.validate(&form, today()).valid);
    }

    #[test]
    fn test_derived_previews() {
        let form = valid_form();
        assert_eq!(form.planned_end_date(), Some(d(2025, 11, 1)));
        assert_eq!(form.applicable_law(), Some(Ley::Ley32069));

        let mut negative = valid_form();
        negative.execution_days = Some(-3);
        assert_eq!(negative.planned_end_date(), None);
    }

    #[test]
    fn test_form_deserializes_from_wire_keys() {
        let json = r#"{
            "numero_contrato": "N.º 07-2025-MDS/GM",
            "nombre": "Pistas y veredas",
            "entidad_ejecutora_id": 1,
            "entidad_supervisora_id": 2,
            "monto_ejecucion": 500000,
            "monto_supervision": "25000.50",
            "fecha_inicio": "2025-05-05",
            "plazo_ejecucion_dias": 90
        }"#;
        let form: ObraFormInput = serde_json::from_str(json).unwrap();
        assert_eq!(form.execution_entity_id, Some(EmpresaId(1)));
        assert_eq!(form.supervision_amount, Some(Decimal::new(2500050, 2)));
        assert_eq!(form.end_date, None);
        assert!(validate_obra_form(&form, today()).valid);
    }

    #[test]
    fn test_empresa_form() {
        let form = EmpresaFormInput {
            ruc: "20123456789".to_string(),
            razon_social: "Constructora Andina S.A.C.".to_string(),
            email: Some("contacto@andina.pe".to_string()),
            telefono: Some("(01) 555-1234".to_string()),
        };
        assert!(validate_empresa_form(&form).is_empty());

        let bad = EmpresaFormInput {
            ruc: "10123456789".to_string(),
            razon_social: String::new(),
            email: Some("no-email".to_string()),
            telefono: Some("12".to_string()),
        };
        let fields: Vec<_> = validate_empresa_form(&bad)
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(
            fields,
            vec![field::RUC, field::RAZON_SOCIAL, field::EMAIL, field::TELEFONO]
        );
    }

    #[test]
    fn test_validator_consorcio_uses_policy_tolerance() {
        let shares = vec![
            ParticipationShare::new(EmpresaId(1), 70.0),
            ParticipationShare::new(EmpresaId(2), 29.5),
        ];
        let known: HashSet<EmpresaId> = [EmpresaId(1), EmpresaId(2)].into_iter().collect();

        let strict = ObraFormValidator::default();
        let err = strict.validate_consorcio(&shares, Some(EmpresaId(1)), &known).unwrap();
        assert_eq!(err.code, Some(ErrorCode::PercentageSum));

        let lenient = ObraFormValidator::new(ValidationPolicy {
            percentage_tolerance: 0.5,
            ..ValidationPolicy::default()
        });
        assert!(lenient.validate_consorcio(&shares, Some(EmpresaId(1)), &known).is_none());
    }
}
