//! Public-works contract records ("obras") and the entities around them.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

crate::define_id_type!(i64, ObraId);
crate::define_id_type!(i64, EmpresaId);

/// Lifecycle state of an obra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObraEstado {
    Registrada,
    EnEjecucion,
    Paralizada,
    Terminada,
    Cancelada,
}

impl ObraEstado {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObraEstado::Registrada => "REGISTRADA",
            ObraEstado::EnEjecucion => "EN_EJECUCION",
            ObraEstado::Paralizada => "PARALIZADA",
            ObraEstado::Terminada => "TERMINADA",
            ObraEstado::Cancelada => "CANCELADA",
        }
    }

    /// Whether staff assigned to an obra in this state still count as booked.
    ///
    /// Only registered and in-execution works hold their professionals; finished,
    /// suspended or cancelled works never produce staffing conflicts.
    pub fn holds_staff(&self) -> bool {
        matches!(self, ObraEstado::Registrada | ObraEstado::EnEjecucion)
    }
}

impl std::str::FromStr for ObraEstado {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "REGISTRADA" => Ok(Self::Registrada),
            "EN_EJECUCION" => Ok(Self::EnEjecucion),
            "PARALIZADA" => Ok(Self::Paralizada),
            "TERMINADA" => Ok(Self::Terminada),
            "CANCELADA" => Ok(Self::Cancelada),
            other => Err(format!("Unknown obra state: {}", other)),
        }
    }
}

/// A stored public-works contract.
///
/// Amounts are in PEN. The planned end date is derived from the start date and
/// the execution term and is never stored independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub id: ObraId,
    pub name: String,
    pub contract_number: String,
    pub execution_entity_id: EmpresaId,
    pub supervision_entity_id: EmpresaId,
    pub execution_amount: Decimal,
    pub supervision_amount: Decimal,
    pub contract_date: NaiveDate,
    pub start_date: NaiveDate,
    pub execution_days: u32,
    pub state: ObraEstado,
}

impl ContractRecord {
    /// `start_date + execution_days`.
    pub fn planned_end_date(&self) -> Option<NaiveDate> {
        planned_end_date(self.start_date, self.execution_days)
    }

    pub fn holds_staff(&self) -> bool {
        self.state.holds_staff()
    }
}

/// Shared derivation used by stored records and by form previews.
pub fn planned_end_date(start_date: NaiveDate, execution_days: u32) -> Option<NaiveDate> {
    start_date.checked_add_days(Days::new(u64::from(execution_days)))
}
