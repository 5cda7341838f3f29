use chrono::{Days, NaiveDate};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal::Decimal;
use std::hint::black_box;

use obras_rust::algorithms::{overlaps, ProfessionalConflictChecker};
use obras_rust::models::{
    AssignmentState, AssignmentWindow, ContractRecord, DateRange, EmpresaId, ObraEstado, ObraId,
    ProfessionalAssignment,
};
use obras_rust::validation::{reconcile, validate_ruc};

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

fn contracts(n: usize) -> Vec<ContractRecord> {
    (0..n)
        .map(|i| ContractRecord {
            id: ObraId(i as i64),
            name: format!("Obra {}", i),
            contract_number: format!("N.º {:02}-2025-MDS/GM", i % 100),
            execution_entity_id: EmpresaId(1),
            supervision_entity_id: EmpresaId(2),
            execution_amount: Decimal::from(100_000),
            supervision_amount: Decimal::from(5_000),
            contract_date: base(),
            start_date: base() + Days::new((i % 300) as u64),
            execution_days: 90,
            state: ObraEstado::EnEjecucion,
        })
        .collect()
}

fn roster(n: usize, professionals: usize) -> Vec<ProfessionalAssignment> {
    (0..n)
        .map(|i| ProfessionalAssignment {
            professional_name: format!("Profesional {}", i % professionals),
            obra_id: ObraId(i as i64),
            participation_percentage: if i % 3 == 0 { 50.0 } else { 100.0 },
            window: AssignmentWindow::new(base() + Days::new((i % 300) as u64), None),
            state: AssignmentState::Active,
        })
        .collect()
}

fn bench_conflict_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("conflict_check");

    for size in [100usize, 1_000, 10_000] {
        let contracts = contracts(size);
        let roster = roster(size, 50);
        let checker = ProfessionalConflictChecker::new(&contracts);
        let candidate = ProfessionalAssignment {
            professional_name: "Profesional 7".to_string(),
            obra_id: ObraId(0),
            participation_percentage: 100.0,
            window: AssignmentWindow::new(base(), Some(base() + Days::new(180))),
            state: AssignmentState::Active,
        };

        group.bench_with_input(BenchmarkId::new("roster", size), &size, |b, _| {
            b.iter(|| black_box(checker.check(black_box(&candidate), &roster, None)));
        });
    }

    group.finish();
}

fn bench_overlap(c: &mut Criterion) {
    let a = DateRange::new(base(), base() + Days::new(120)).unwrap();
    let b = DateRange::new(base() + Days::new(60), base() + Days::new(200)).unwrap();

    c.bench_function("overlaps", |bench| {
        bench.iter(|| {
            for _ in 0..1000 {
                black_box(overlaps(black_box(&a), black_box(&b)));
            }
        });
    });
}

fn bench_field_validators(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_validators");

    group.bench_function("validate_ruc", |b| {
        b.iter(|| black_box(validate_ruc(black_box("20123456789"))));
    });

    let shares = [33.33, 33.33, 33.34];
    group.bench_function("reconcile", |b| {
        b.iter(|| black_box(reconcile(black_box(&shares))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_conflict_check,
    bench_overlap,
    bench_field_validators
);
criterion_main!(benches);
