//! Performance benchmarks for the forecasting engine.
//!
//! This benchmark suite tracks the cost of a full forecast call as the
//! shift history grows, plus the optimizer in isolation:
//! - 3-month history
//! - 12-month history
//! - 36-month history
//! - optimizer over a full candidate pool
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use forecast_engine::config::{EnginePolicy, JurisdictionInfo, RegulatoryRuleSet, ThresholdRow};
use forecast_engine::forecast::{
    ForecastEngine, ForecastRequest, OptimizationObjective, ScheduleConstraints, assess_risk,
    optimize_schedule,
};
use forecast_engine::models::{
    PlanningWindow, Priority, ShiftRecord, SuggestedShift, TimeOfDay, WorkSource,
};

fn bench_rule_set() -> RegulatoryRuleSet {
    let mut rule_set = RegulatoryRuleSet::new();
    rule_set.add_jurisdiction(
        JurisdictionInfo {
            key: "jp".to_string(),
            name: "Japan".to_string(),
            currency: "JPY".to_string(),
            source_url: "https://www.nta.go.jp/".to_string(),
        },
        vec![ThresholdRow {
            effective_from: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            tax_annual: Decimal::new(1_030_000, 0),
            social_insurance_annual: Decimal::new(1_300_000, 0),
            social_monthly: Decimal::new(88_000, 0),
        }],
    );
    rule_set
}

/// Generates `months` months of history across two work sources, eight
/// shifts per month.
fn history(months: u32) -> Vec<ShiftRecord> {
    let mut shifts = Vec::new();
    for index in 0..months {
        let year = 2022 + (index / 12) as i32;
        let month = index % 12 + 1;
        for (slot, day) in [3u32, 6, 10, 13, 17, 20, 24, 27].iter().enumerate() {
            let source_id = if slot % 2 == 0 { "cafe" } else { "bar" };
            let rate = if slot % 2 == 0 { 1800 } else { 1400 };
            let hours = Decimal::new(5, 0);
            shifts.push(ShiftRecord {
                id: format!("s{}_{}", index, day),
                date: NaiveDate::from_ymd_opt(year, month, *day).unwrap(),
                work_source_id: source_id.to_string(),
                hourly_rate: Decimal::new(rate, 0),
                worked_minutes: 300,
                total_earnings: Decimal::new(rate, 0) * hours,
            });
        }
    }
    shifts
}

fn request(months: u32) -> ForecastRequest {
    let last_month = (months - 1) % 12 + 1;
    let last_year = 2022 + ((months - 1) / 12) as i32;
    ForecastRequest {
        shifts: history(months),
        work_sources: vec![
            WorkSource {
                id: "cafe".to_string(),
                name: "Riverside Cafe".to_string(),
                default_hourly_rate: Decimal::new(1800, 0),
            },
            WorkSource {
                id: "bar".to_string(),
                name: "Harbor Bar".to_string(),
                default_hourly_rate: Decimal::new(1400, 0),
            },
        ],
        jurisdiction: "jp".to_string(),
        as_of: NaiveDate::from_ymd_opt(last_year, last_month, 28).unwrap(),
        constraints: ScheduleConstraints {
            max_weekly_hours: Some(Decimal::new(20, 0)),
            annual_earnings_limit: Some(Decimal::new(1_000_000, 0)),
        },
        objective: OptimizationObjective::MaximizeEarnings,
    }
}

fn candidate_pool() -> Vec<SuggestedShift> {
    (1..=20u32)
        .map(|day| {
            let start = TimeOfDay::from_hm(10, 0);
            let hours = 3 + (day % 5) as u16;
            SuggestedShift {
                date: NaiveDate::from_ymd_opt(2025, 5, day).unwrap(),
                start,
                end: start.plus_hours(hours),
                work_source_id: "cafe".to_string(),
                expected_earnings: Decimal::new(1800 * i64::from(hours), 0),
                priority: Priority::High,
                rationale: vec![],
            }
        })
        .collect()
}

fn bench_forecast_by_history_size(c: &mut Criterion) {
    let engine = ForecastEngine::new(bench_rule_set(), EnginePolicy::default());

    let mut group = c.benchmark_group("forecast");
    for months in [3u32, 12, 36] {
        let req = request(months);
        group.throughput(Throughput::Elements(u64::from(months)));
        group.bench_with_input(BenchmarkId::from_parameter(months), &req, |b, req| {
            b.iter(|| engine.forecast(black_box(req)).unwrap());
        });
    }
    group.finish();
}

fn bench_optimizer(c: &mut Criterion) {
    let candidates = candidate_pool();
    let constraints = ScheduleConstraints {
        max_weekly_hours: Some(Decimal::new(25, 0)),
        annual_earnings_limit: Some(Decimal::new(150_000, 0)),
    };
    let risk = assess_risk(Decimal::new(400_000, 0), Decimal::new(1_030_000, 0));
    let policy = EnginePolicy::default();
    let window = PlanningWindow::new(2025, 5);

    c.bench_function("optimize_schedule_20_candidates", |b| {
        b.iter(|| {
            optimize_schedule(
                black_box(&candidates),
                &constraints,
                OptimizationObjective::MaximizeEarnings,
                window,
                &risk,
                Decimal::new(400_000, 0),
                &policy,
            )
        });
    });
}

criterion_group!(benches, bench_forecast_by_history_size, bench_optimizer);
criterion_main!(benches);
