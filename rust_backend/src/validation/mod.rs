//! Business-rule validation for obras, empresas, consortia and staffing.
//!
//! Every validator returns data and never panics on invalid input. A rejected
//! value is described by one or more [`ValidationError`]s, each naming the form
//! field it belongs to so the presentation layer can render it next to that
//! field. An empty error list means the input was accepted.
//!
//! # Components
//!
//! - [`fields`]: atomic validators for RUC, email, phone and percentages
//! - [`percentages`]: sum-to-100 reconciliation of participation shares
//! - [`forms`]: aggregate obra and empresa form validation
//! - [`consorcio`]: consortium membership and ownership checks
//! - [`staffing`]: professional roster row checks
//! - [`policy`]: tunable limits (contract-number pattern, term, ratios)

pub mod consorcio;
pub mod fields;
pub mod forms;
pub mod percentages;
pub mod policy;
pub mod staffing;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use consorcio::{validate_consorcio, validate_consorcio_with_tolerance};
pub use fields::{validate_email, validate_percentage, validate_phone, validate_ruc};
pub use forms::{
    validate_empresa_form, validate_obra_form, EmpresaFormInput, ObraFormInput,
    ObraFormValidator,
};
pub use percentages::reconcile;
pub use policy::ValidationPolicy;
pub use staffing::validate_assignment;

/// Form field keys used in [`ValidationError::field`].
///
/// They match the JSON keys of the form inputs so callers can map errors back
/// onto their form state without a translation table.
pub mod field {
    pub const RUC: &str = "ruc";
    pub const RAZON_SOCIAL: &str = "razon_social";
    pub const EMAIL: &str = "email";
    pub const TELEFONO: &str = "telefono";
    pub const PORCENTAJE: &str = "porcentaje_participacion";
    pub const PARTICIPACIONES: &str = "participaciones";
    pub const EMPRESA_LIDER: &str = "empresa_lider_id";
    pub const NUMERO_CONTRATO: &str = "numero_contrato";
    pub const NOMBRE: &str = "nombre";
    pub const MONTO_EJECUCION: &str = "monto_ejecucion";
    pub const MONTO_SUPERVISION: &str = "monto_supervision";
    pub const FECHA_CONTRATO: &str = "fecha_contrato";
    pub const FECHA_INICIO: &str = "fecha_inicio";
    pub const PLAZO_EJECUCION: &str = "plazo_ejecucion_dias";
    pub const FECHA_TERMINO: &str = "fecha_termino";
    pub const ENTIDAD_EJECUTORA: &str = "entidad_ejecutora_id";
    pub const ENTIDAD_SUPERVISORA: &str = "entidad_supervisora_id";
    pub const NOMBRE_PROFESIONAL: &str = "nombre_completo";
    pub const FECHA_FIN: &str = "fecha_fin";
    pub const PROCEDIMIENTO: &str = "procedimiento_seleccion";
}

/// Machine-readable reason attached to a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Required,
    RucRequired,
    RucLength,
    RucFormat,
    RucPrefix,
    EmailFormat,
    PhoneFormat,
    PhoneLength,
    PercentageRange,
    PercentageSum,
    FormatoInvalido,
    MontoInvalido,
    SupervisionExcedeLimite,
    FechaInicioPasada,
    FechaAnteriorContrato,
    PlazoFueraDeRango,
    FechaTerminoInvalida,
    FechaTerminoExcedeLimite,
    EntidadRequerida,
    EntidadesIguales,
    EmpresaDesconocida,
    ParticipanteDuplicado,
    LiderNoParticipa,
    RangoInvalido,
    ProcedimientoNoPermitido,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Required => "REQUIRED",
            ErrorCode::RucRequired => "RUC_REQUIRED",
            ErrorCode::RucLength => "RUC_LENGTH",
            ErrorCode::RucFormat => "RUC_FORMAT",
            ErrorCode::RucPrefix => "RUC_PREFIX",
            ErrorCode::EmailFormat => "EMAIL_FORMAT",
            ErrorCode::PhoneFormat => "PHONE_FORMAT",
            ErrorCode::PhoneLength => "PHONE_LENGTH",
            ErrorCode::PercentageRange => "PERCENTAGE_RANGE",
            ErrorCode::PercentageSum => "PERCENTAGE_SUM",
            ErrorCode::FormatoInvalido => "FORMATO_INVALIDO",
            ErrorCode::MontoInvalido => "MONTO_INVALIDO",
            ErrorCode::SupervisionExcedeLimite => "SUPERVISION_EXCEDE_LIMITE",
            ErrorCode::FechaInicioPasada => "FECHA_INICIO_PASADA",
            ErrorCode::FechaAnteriorContrato => "FECHA_ANTERIOR_CONTRATO",
            ErrorCode::PlazoFueraDeRango => "PLAZO_FUERA_DE_RANGO",
            ErrorCode::FechaTerminoInvalida => "FECHA_TERMINO_INVALIDA",
            ErrorCode::FechaTerminoExcedeLimite => "FECHA_TERMINO_EXCEDE_LIMITE",
            ErrorCode::EntidadRequerida => "ENTIDAD_REQUERIDA",
            ErrorCode::EntidadesIguales => "ENTIDADES_IGUALES",
            ErrorCode::EmpresaDesconocida => "EMPRESA_DESCONOCIDA",
            ErrorCode::ParticipanteDuplicado => "PARTICIPANTE_DUPLICADO",
            ErrorCode::LiderNoParticipa => "LIDER_NO_PARTICIPA",
            ErrorCode::RangoInvalido => "RANGO_INVALIDO",
            ErrorCode::ProcedimientoNoPermitido => "PROCEDIMIENTO_NO_PERMITIDO",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

impl ValidationError {
    /// Descriptive error without a machine-readable code.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: None,
        }
    }

    pub fn coded(field: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: Some(code),
        }
    }

    /// Re-targets the error at another form field.
    pub fn at(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.code == Some(code)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} [{}]: {}", self.field, code, self.message),
            None => write!(f, "{}: {}", self.field, self.message),
        }
    }
}

/// Outcome of an aggregate validator: pass/fail plus the full error list.
///
/// `valid` is always `errors.is_empty()`; it is carried explicitly so the value
/// serializes in the shape form handlers expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// First error reported for `field`, if any.
    pub fn error_for(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.error_for(field).is_some()
    }

    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.has_code(code))
    }
}
