//! Procurement-law applicability.
//!
//! A contract is governed by Ley 30225 when signed before 2025-04-22 and by
//! Ley 32069 from that date on. The applicable law is always derived from the
//! contract date, never stored, and constrains which selection procedures a
//! contract may declare.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation::{field, ErrorCode, ValidationError};

/// First day on which Ley 32069 governs new contracts.
pub fn ley_32069_effective_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 22).expect("2025-04-22 is a valid date")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ley {
    #[serde(rename = "LEY_30225")]
    Ley30225,
    #[serde(rename = "LEY_32069")]
    Ley32069,
}

impl Ley {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ley::Ley30225 => "LEY_30225",
            Ley::Ley32069 => "LEY_32069",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Ley::Ley30225 => "Ley N.º 30225 - Ley de Contrataciones del Estado",
            Ley::Ley32069 => "Ley N.º 32069 - Ley General de Contrataciones Públicas",
        }
    }
}

/// Selection procedures a contract may have been awarded through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Procedimiento {
    LicitacionPublica,
    ConcursoPublico,
    AdjudicacionSimplificada,
    SeleccionConsultoresIndividuales,
    ComparacionDePrecios,
    SubastaInversaElectronica,
    ContratacionDirecta,
    LicitacionPublicaAbreviada,
    ConcursoPublicoAbreviado,
}

impl Procedimiento {
    pub fn label(&self) -> &'static str {
        match self {
            Procedimiento::LicitacionPublica => "Licitación Pública",
            Procedimiento::ConcursoPublico => "Concurso Público",
            Procedimiento::AdjudicacionSimplificada => "Adjudicación Simplificada",
            Procedimiento::SeleccionConsultoresIndividuales => {
                "Selección de Consultores Individuales"
            }
            Procedimiento::ComparacionDePrecios => "Comparación de Precios",
            Procedimiento::SubastaInversaElectronica => "Subasta Inversa Electrónica",
            Procedimiento::ContratacionDirecta => "Contratación Directa",
            Procedimiento::LicitacionPublicaAbreviada => "Licitación Pública Abreviada",
            Procedimiento::ConcursoPublicoAbreviado => "Concurso Público Abreviado",
        }
    }
}

const LEY_30225_PROCEDURES: &[Procedimiento] = &[
    Procedimiento::LicitacionPublica,
    Procedimiento::ConcursoPublico,
    Procedimiento::AdjudicacionSimplificada,
    Procedimiento::SeleccionConsultoresIndividuales,
    Procedimiento::ComparacionDePrecios,
    Procedimiento::SubastaInversaElectronica,
    Procedimiento::ContratacionDirecta,
];

const LEY_32069_PROCEDURES: &[Procedimiento] = &[
    Procedimiento::LicitacionPublica,
    Procedimiento::ConcursoPublico,
    Procedimiento::LicitacionPublicaAbreviada,
    Procedimiento::ConcursoPublicoAbreviado,
    Procedimiento::AdjudicacionSimplificada,
    Procedimiento::SeleccionConsultoresIndividuales,
    Procedimiento::ComparacionDePrecios,
    Procedimiento::SubastaInversaElectronica,
    Procedimiento::ContratacionDirecta,
];

/// The fixed set of procedures valid under `law`, in display order.
pub fn allowed_procedures(law: Ley) -> &'static [Procedimiento] {
    match law {
        Ley::Ley30225 => LEY_30225_PROCEDURES,
        Ley::Ley32069 => LEY_32069_PROCEDURES,
    }
}

/// Law resolved for a contract date along with its procedures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawResolution {
    pub law: Ley,
    pub allowed_procedures: Vec<Procedimiento>,
}

/// Maps a contract date to the governing law. Total; there is no error path.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use obras_rust::law::{applicable_law, Ley};
///
/// let before = NaiveDate::from_ymd_opt(2025, 4, 21).unwrap();
/// let cutover = NaiveDate::from_ymd_opt(2025, 4, 22).unwrap();
/// assert_eq!(applicable_law(before), Ley::Ley30225);
/// assert_eq!(applicable_law(cutover), Ley::Ley32069);
/// ```
pub fn applicable_law(contract_date: NaiveDate) -> Ley {
    if contract_date >= ley_32069_effective_date() {
        Ley::Ley32069
    } else {
        Ley::Ley30225
    }
}

pub fn resolve_law(contract_date: NaiveDate) -> LawResolution {
    let law = applicable_law(contract_date);
    LawResolution {
        law,
        allowed_procedures: allowed_procedures(law).to_vec(),
    }
}

/// The law/procedure pair of a contract form.
///
/// The law follows the contract date; whenever the law changes the chosen
/// procedure is cleared because it may not exist under the new regime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawSelection {
    pub law: Option<Ley>,
    pub procedure: Option<Procedimiento>,
}

impl LawSelection {
    pub fn for_contract_date(contract_date: NaiveDate) -> Self {
        Self {
            law: Some(applicable_law(contract_date)),
            procedure: None,
        }
    }

    /// Recomputes the law after the contract date changed.
    pub fn with_contract_date(self, contract_date: NaiveDate) -> Self {
        self.with_law(applicable_law(contract_date))
    }

    /// Sets the law, dropping the procedure if the law differs.
    pub fn with_law(self, law: Ley) -> Self {
        if self.law == Some(law) {
            self
        } else {
            Self {
                law: Some(law),
                procedure: None,
            }
        }
    }

    /// Chooses a procedure, rejecting one not allowed under the current law.
    pub fn with_procedure(self, procedure: Procedimiento) -> Result<Self, ValidationError> {
        let Some(law) = self.law else {
            return Err(ValidationError::coded(
                field::FECHA_CONTRATO,
                ErrorCode::Required,
                "Ingrese la fecha de contrato para determinar la ley aplicable",
            ));
        };

        if !allowed_procedures(law).contains(&procedure) {
            return Err(ValidationError::coded(
                field::PROCEDIMIENTO,
                ErrorCode::ProcedimientoNoPermitido,
                format!(
                    "El procedimiento {} no está permitido bajo la {}",
                    procedure.label(),
                    law.label()
                ),
            ));
        }

        Ok(Self {
            law: Some(law),
            procedure: Some(procedure),
        })
    }
}
