//! Integration tests for roster repositories and the availability service.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

use obras_rust::config::RulesConfig;
use obras_rust::db::{
    LocalRepository, RepositoryError, RepositoryFactory, RepositoryType, RosterFixture,
    RosterRepository,
};
use obras_rust::models::{
    AssignmentState, AssignmentWindow, ContractRecord, DateRange, EmpresaId, ObraEstado, ObraId,
    ProfessionalAssignment,
};
use obras_rust::services::{AvailabilityDebouncer, AvailabilityService};

fn d(m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, day).unwrap()
}

fn contract(id: i64, start: NaiveDate, days: u32, state: ObraEstado) -> ContractRecord {
    ContractRecord {
        id: ObraId(id),
        name: format!("Obra {}", id),
        contract_number: format!("N.º {:02}-2025-MDS/GM", id),
        execution_entity_id: EmpresaId(1),
        supervision_entity_id: EmpresaId(2),
        execution_amount: Decimal::from(750_000),
        supervision_amount: Decimal::from(60_000),
        contract_date: start,
        start_date: start,
        execution_days: days,
        state,
    }
}

fn assignment(
    name: &str,
    obra_id: i64,
    pct: f64,
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> ProfessionalAssignment {
    ProfessionalAssignment {
        professional_name: name.to_string(),
        obra_id: ObraId(obra_id),
        participation_percentage: pct,
        window: AssignmentWindow::new(start, end),
        state: AssignmentState::Active,
    }
}

fn seeded_repo() -> LocalRepository {
    LocalRepository::with_data(
        vec![
            contract(1, d(3, 1), 120, ObraEstado::Registrada),
            contract(2, d(5, 1), 92, ObraEstado::EnEjecucion),
            contract(3, d(1, 10), 200, ObraEstado::EnEjecucion),
        ],
        vec![
            assignment("Ing. Rosa Huamán", 2, 100.0, d(5, 1), None),
            assignment("Ing. Rosa Huamán", 3, 40.0, d(1, 10), None),
            assignment("Arq. Pedro Salas", 3, 100.0, d(1, 10), Some(d(4, 30))),
        ],
    )
}

#[tokio::test]
async fn test_repository_health_check() {
    let repo: Arc<dyn RosterRepository> = Arc::new(LocalRepository::new());
    assert!(repo.health_check().await.unwrap());
}

#[tokio::test]
async fn test_open_roster_row_resolves_against_obra_schedule() {
    let service = AvailabilityService::new(Arc::new(seeded_repo()));

    // Obra 2 runs 2025-05-01 + 92 days = 2025-08-01
    let overlapping = DateRange::new(d(8, 1), d(9, 30)).unwrap();
    let result = service
        .check_professional("Ing. Rosa Huamán", &overlapping, None)
        .await
        .unwrap();
    assert!(!result.available);
    assert_eq!(result.conflicts.len(), 1);
    assert_eq!(result.conflicts[0].conflicting_range, DateRange::new(d(5, 1), d(8, 1)).unwrap());

    let after = DateRange::new(d(8, 2), d(9, 30)).unwrap();
    let result = service
        .check_professional("Ing. Rosa Huamán", &after, None)
        .await
        .unwrap();
    assert!(result.available);
}

#[tokio::test]
async fn test_roster_updates_are_seen_by_service() {
    let repo = seeded_repo();
    let service = AvailabilityService::new(Arc::new(repo.clone()));
    let candidate = assignment("Arq. Pedro Salas", 1, 100.0, d(3, 1), Some(d(6, 30)));

    assert!(!service.check(&candidate, None).await.unwrap().available);

    repo.deactivate_assignment("Arq. Pedro Salas", ObraId(3)).unwrap();
    assert!(service.check(&candidate, None).await.unwrap().available);

    repo.upsert_assignment(assignment("Arq. Pedro Salas", 2, 100.0, d(6, 1), None))
        .unwrap();
    let result = service.check(&candidate, None).await.unwrap();
    assert_eq!(result.conflicts.len(), 1);
    assert_eq!(result.conflicts[0].obra_id, ObraId(2));

    repo.set_contract_state(ObraId(2), ObraEstado::Terminada).unwrap();
    assert!(service.check(&candidate, None).await.unwrap().available);
}

#[tokio::test]
async fn test_infrastructure_failure_is_distinct_from_no_conflict() {
    let repo = seeded_repo();
    repo.set_healthy(false).unwrap();
    let service = AvailabilityService::new(Arc::new(repo));

    let range = DateRange::new(d(3, 1), d(3, 31)).unwrap();
    let outcome = service.check_professional("Nadie", &range, None).await;
    assert!(matches!(outcome, Err(RepositoryError::ConnectionError(_))));
}

#[tokio::test]
async fn test_factory_builds_from_config() {
    let config = RulesConfig::from_toml_str("[repository]\ntype = \"local\"").unwrap();
    let repo_type = config.repository_type().unwrap();
    assert_eq!(repo_type, RepositoryType::Local);

    let repo = RepositoryFactory::create(repo_type, Some(&config.http)).unwrap();
    let service = AvailabilityService::new(repo);
    let range = DateRange::new(d(1, 1), d(12, 31)).unwrap();
    assert!(service
        .check_professional("Ing. Rosa Huamán", &range, None)
        .await
        .unwrap()
        .available);
}

#[cfg(not(feature = "http-repo"))]
#[test]
fn test_http_backend_requires_feature() {
    let config =
        RulesConfig::from_toml_str("[repository]\ntype = \"http\"\n[http]\nbase_url = \"http://x\"")
            .unwrap();
    let outcome = RepositoryFactory::create(config.repository_type().unwrap(), Some(&config.http));
    assert!(matches!(outcome, Err(RepositoryError::ConfigurationError(_))));
}

#[tokio::test]
async fn test_debouncer_runs_latest_only() {
    let service = AvailabilityService::new(Arc::new(seeded_repo()));
    let debouncer = AvailabilityDebouncer::with_delay(service, Duration::from_millis(20));

    let busy = assignment("Arq. Pedro Salas", 1, 100.0, d(3, 1), Some(d(6, 30)));
    let mut partial = busy.clone();
    partial.participation_percentage = 50.0;

    let stale = debouncer.schedule(busy, None);
    let latest = debouncer.schedule(partial, None);

    assert!(stale.await.is_err());
    assert!(latest.await.unwrap().unwrap().available);
}

#[tokio::test]
async fn test_roster_fixture_backs_availability_check() {
    let fixture = RosterFixture {
        obras: vec![
            contract(1, d(3, 1), 120, ObraEstado::Registrada),
            contract(2, d(5, 1), 92, ObraEstado::EnEjecucion),
        ],
        asignaciones: vec![assignment("Ing. Rosa Huamán", 2, 100.0, d(5, 1), None)],
    };
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), serde_json::to_string(&fixture).unwrap()).unwrap();

    let repo =
        RepositoryFactory::create_for_availability(RepositoryType::Local, None, Some(file.path()))
            .unwrap();
    let service = AvailabilityService::new(repo);

    let candidate = assignment("Ing. Rosa Huamán", 1, 100.0, d(3, 1), Some(d(6, 30)));
    let result = service.check(&candidate, Some(ObraId(1))).await.unwrap();
    assert!(!result.available);
    assert_eq!(result.conflicts[0].obra_id, ObraId(2));
    assert_eq!(
        result.conflicts[0].overlapping_days,
        DateRange::new(d(5, 1), d(6, 30)).unwrap()
    );
}
