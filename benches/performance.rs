use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use smart_budget_core::{
    domain::{Budget, DateRange, Transaction},
    storage::JsonExportStore,
    BudgetService, SummaryService,
};

const CATEGORIES: [&str; 5] = ["Food", "Housing", "Utilities", "Travel", "Income"];

fn sample_transactions(count: usize) -> Vec<Transaction> {
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|idx| {
            let category = CATEGORIES[idx % CATEGORIES.len()];
            let amount = if category == "Income" {
                1000.0
            } else {
                -(5.0 + (idx % 100) as f64)
            };
            let date = start + Duration::hours((idx % (365 * 24)) as i64);
            let mut txn = Transaction::new("bench", amount, category, "generated", date);
            if idx % 50 == 0 {
                txn.soft_delete(date);
            }
            txn
        })
        .collect()
}

fn sample_budgets() -> Vec<Budget> {
    (1..=12)
        .flat_map(|month| {
            let start = Utc.with_ymd_and_hms(2025, month, 1, 0, 0, 0).unwrap();
            let end = start + Duration::days(27);
            CATEGORIES[..4].iter().map(move |category| {
                let period = DateRange::new(start, end).unwrap();
                Budget::new("bench", *category, 500.0, period)
            })
        })
        .collect()
}

fn bench_budget_progress(c: &mut Criterion) {
    let txns = sample_transactions(black_box(10_000));
    let budgets = sample_budgets();

    c.bench_function("progress_single_budget_10k", |b| {
        b.iter(|| BudgetService::compute_progress(black_box(&budgets[0]), black_box(&txns)))
    });

    c.bench_function("progress_all_budgets_10k", |b| {
        b.iter(|| BudgetService::progress_for_all(black_box(&budgets), black_box(&txns)))
    });
}

fn bench_dashboard(c: &mut Criterion) {
    let txns = sample_transactions(black_box(10_000));
    let budgets = sample_budgets();

    c.bench_function("dashboard_stats_10k", |b| {
        b.iter(|| SummaryService::compute_dashboard(black_box(&txns), black_box(&budgets), 5))
    });
}

fn bench_export_parse(c: &mut Criterion) {
    let documents: Vec<_> = sample_transactions(5_000)
        .into_iter()
        .map(|txn| {
            json!({
                "id": txn.id,
                "userId": txn.user_id,
                "amount": txn.amount,
                "category": txn.category,
                "description": txn.description,
                "date": txn.date.map(|date| date.to_rfc3339()),
            })
        })
        .collect();
    let export = json!({ "transactions": documents }).to_string();

    c.bench_function("export_parse_5k", |b| {
        b.iter(|| JsonExportStore::from_json(black_box(&export)).expect("parse export"))
    });
}

criterion_group!(benches, bench_budget_progress, bench_dashboard, bench_export_parse);
criterion_main!(benches);
