//! Performance benchmarks for the payroll engine.
//!
//! Covers the pure deduction calculator, full payroll runs over growing
//! rosters, and the HTTP compute endpoint.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::api::{AppState, PayrollComputeRequest, create_router};
use payroll_engine::calculation::{calculate_deductions, compute_payroll};
use payroll_engine::config::ConfigLoader;
use payroll_engine::models::{Employee, PayrollNovelty};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/sv").expect("Failed to load config")
}

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date")
}

/// Creates a roster with one day-overtime novelty per employee.
fn create_roster(size: usize) -> (Vec<Employee>, Vec<PayrollNovelty>) {
    let employees: Vec<Employee> = (0..size)
        .map(|i| {
            serde_json::from_value(serde_json::json!({
                "id": format!("emp_{:04}", i),
                "name": format!("Employee {}", i),
                "dui": format!("dui-{:04}", i),
                "nit": format!("nit-{:04}", i),
                "isss": format!("isss-{:04}", i),
                "nup": format!("nup-{:04}", i),
                "base_salary": format!("{}", 400 + (i % 30) * 100),
                "contract_type": "monthly",
                "hire_date": "2020-01-01",
                "afp_type": "Crecer"
            }))
            .expect("Failed to create employee")
        })
        .collect();

    let novelties = employees
        .iter()
        .map(|e| {
            serde_json::from_value(serde_json::json!({
                "id": uuid::Uuid::new_v4(),
                "employee_id": e.id,
                "date": "2026-10-05",
                "type": "overtime",
                "overtime_hours": "3",
                "overtime_rate_type": "day"
            }))
            .expect("Failed to create novelty")
        })
        .collect();

    (employees, novelties)
}

/// Benchmark: Deductions for a single salary.
fn bench_deductions(c: &mut Criterion) {
    let loader = load_config();
    let config = loader.config();

    c.bench_function("deductions_single", |b| {
        b.iter(|| calculate_deductions(black_box(Decimal::new(165333, 2)), config, 1))
    });
}

/// Benchmark: Payroll runs over rosters of increasing size.
fn bench_payroll_scaling(c: &mut Criterion) {
    let loader = load_config();
    let config = loader.config();

    let mut group = c.benchmark_group("payroll_run");

    for size in [1usize, 10, 100, 1000].iter() {
        let (employees, novelties) = create_roster(*size);
        if *size >= 1000 {
            group.sample_size(10);
        }
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("employees", size), size, |b, _| {
            b.iter(|| {
                compute_payroll(
                    black_box(&employees),
                    black_box(&novelties),
                    &[],
                    run_date(),
                    config,
                )
            })
        });
    }

    group.finish();
}

/// Benchmark: `/payrolls/compute` round trip for a 10-employee roster.
fn bench_compute_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_config()));
    let (employees, novelties) = create_roster(10);
    let request = PayrollComputeRequest {
        employees,
        novelties,
        existing_periods: vec![],
        now: Some(run_date()),
    };
    let body = serde_json::to_string(&request).unwrap();

    c.bench_function("payroll_compute_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/payrolls/compute")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_deductions,
    bench_payroll_scaling,
    bench_compute_endpoint,
);
criterion_main!(benches);
