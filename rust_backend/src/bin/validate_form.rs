use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use obras_rust::algorithms::ConflictResult;
use obras_rust::config::RulesConfig;
use obras_rust::db::RepositoryFactory;
use obras_rust::models::{EmpresaId, ObraId, ParticipationShare, ProfessionalAssignment};
use obras_rust::services::AvailabilityService;
use obras_rust::validation::{
    validate_assignment, validate_empresa_form, EmpresaFormInput, ObraFormInput,
    ObraFormValidator, ValidationResult,
};

const USAGE: &str = "usage: validate-form <obra|empresa|consorcio|asignacion> <file.json> \
                     [--today YYYY-MM-DD] [--config rules.toml] [--roster roster.json]";

// ========================================
// Input Payloads
// ========================================

#[derive(Debug, Deserialize)]
struct ConsorcioInput {
    participaciones: Vec<ParticipationShare>,
    #[serde(default)]
    empresa_lider_id: Option<EmpresaId>,
    empresas_registradas: Vec<EmpresaId>,
}

#[derive(Debug, Deserialize)]
struct AsignacionInput {
    asignacion: ProfessionalAssignment,
    #[serde(default)]
    excluir_obra_id: Option<ObraId>,
}

#[derive(Debug, Serialize)]
struct AsignacionReport {
    #[serde(flatten)]
    validation: ValidationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    disponibilidad: Option<ConflictResult>,
}

// ========================================
// Arguments
// ========================================

struct Args {
    kind: String,
    input: PathBuf,
    today: NaiveDate,
    config: Option<PathBuf>,
    roster: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let kind = args.next().ok_or_else(|| anyhow!(USAGE))?;
    let input = args.next().map(PathBuf::from).ok_or_else(|| anyhow!(USAGE))?;

    let mut today = Local::now().date_naive();
    let mut config = None;
    let mut roster = None;
    while let Some(flag) = args.next() {
        let value = args
            .next()
            .with_context(|| format!("missing value for {}", flag))?;
        match flag.as_str() {
            "--today" => {
                today = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                    .with_context(|| format!("invalid --today date: {}", value))?;
            }
            "--config" => config = Some(PathBuf::from(value)),
            "--roster" => roster = Some(PathBuf::from(value)),
            other => bail!("unknown option {}\n{}", other, USAGE),
        }
    }

    Ok(Args {
        kind,
        input,
        today,
        config,
        roster,
    })
}

fn load_config(path: Option<&Path>) -> Result<RulesConfig> {
    match path {
        Some(path) => Ok(RulesConfig::from_file(path)?),
        None => Ok(RulesConfig::load_default()?.unwrap_or_default()),
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args()?;
    let config = load_config(args.config.as_deref())?;
    let validator = ObraFormValidator::new(config.validation_policy()?);

    let valid = match args.kind.as_str() {
        "obra" => {
            let form: ObraFormInput = read_json(&args.input)?;
            let result = validator.validate(&form, args.today);
            print_json(&result)?;
            result.valid
        }
        "empresa" => {
            let form: EmpresaFormInput = read_json(&args.input)?;
            let result = ValidationResult::from_errors(validate_empresa_form(&form));
            print_json(&result)?;
            result.valid
        }
        "consorcio" => {
            let input: ConsorcioInput = read_json(&args.input)?;
            let known: HashSet<EmpresaId> = input.empresas_registradas.into_iter().collect();
            let error =
                validator.validate_consorcio(&input.participaciones, input.empresa_lider_id, &known);
            let result = ValidationResult::from_errors(error.into_iter().collect());
            print_json(&result)?;
            result.valid
        }
        "asignacion" => {
            let input: AsignacionInput = read_json(&args.input)?;
            let validation = ValidationResult::from_errors(validate_assignment(&input.asignacion));

            // Conflicts are warnings; they never make the row invalid
            let disponibilidad = if validation.valid {
                let repo = RepositoryFactory::create_for_availability(
                    config.repository_type()?,
                    Some(&config.http),
                    args.roster.as_deref(),
                )?;
                let service = AvailabilityService::new(repo);
                Some(
                    service
                        .check(&input.asignacion, input.excluir_obra_id)
                        .await
                        .context("Professional availability could not be verified")?,
                )
            } else {
                None
            };

            let valid = validation.valid;
            print_json(&AsignacionReport {
                validation,
                disponibilidad,
            })?;
            valid
        }
        other => bail!("unknown form kind '{}'\n{}", other, USAGE),
    };

    if !valid {
        std::process::exit(1);
    }
    Ok(())
}
