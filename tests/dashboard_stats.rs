mod common;

use chrono::NaiveDate;
use common::{ts, txn};
use smart_budget_core::{
    core::services::ChartService, domain::Transaction, DashboardState, SummaryService,
};

#[test]
fn balance_is_income_minus_expenses() {
    let txns = vec![
        txn(1200.0, "Income", ts(2025, 1, 1)),
        txn(300.0, "Investment", ts(2025, 1, 15)),
        txn(-450.25, "Housing", ts(2025, 1, 3)),
        txn(-49.75, "Food", ts(2025, 1, 4)),
    ];

    let stats = SummaryService::compute_stats(&txns);
    assert_eq!(stats.total_income, 1500.0);
    assert_eq!(stats.total_expenses, 500.0);
    assert_eq!(stats.total_balance, 1000.0);
}

#[test]
fn zero_amounts_are_neither_income_nor_expense() {
    let txns = vec![txn(0.0, "Gifts", ts(2025, 1, 1))];
    let stats = SummaryService::compute_stats(&txns);
    assert_eq!(stats.total_income, 0.0);
    assert_eq!(stats.total_expenses, 0.0);
    assert_eq!(stats.recent_transactions.len(), 1);
}

#[test]
fn empty_input_gives_empty_dashboard() {
    let stats = SummaryService::compute_dashboard(&[], &[], 5);
    assert_eq!(stats.total_balance, 0.0);
    assert!(stats.recent_transactions.is_empty());
    assert!(stats.budget_progress.is_empty());
}

#[test]
fn recent_limit_comes_from_state() {
    let txns: Vec<Transaction> = (1..=9).map(|day| txn(-1.0, "Food", ts(2025, 1, day))).collect();
    let mut state = DashboardState::new(3);
    state.apply_transactions(txns);

    let recent = &state.stats().recent_transactions;
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].date, Some(ts(2025, 1, 9)));
    assert_eq!(recent[2].date, Some(ts(2025, 1, 7)));
}

#[test]
fn state_is_ready_after_both_snapshots() {
    let mut state = DashboardState::default();
    assert!(!state.is_ready());
    state.apply_transactions(Vec::new());
    assert!(!state.is_ready());
    state.apply_budgets(Vec::new());
    assert!(state.is_ready());
}

#[test]
fn charts_reflect_dashboard_totals() {
    let txns = vec![
        txn(800.0, "Income", ts(2025, 1, 1)),
        txn(-200.0, "Housing", ts(2025, 1, 2)),
        txn(-50.0, "Food", ts(2025, 1, 3)),
        txn(-25.0, "Food", ts(2024, 12, 20)),
    ];
    let stats = SummaryService::compute_stats(&txns);

    let bars = ChartService::income_vs_expense(&stats);
    assert_eq!(bars[0].value, 800.0);
    assert_eq!(bars[1].value, 275.0);

    let slices = ChartService::category_breakdown(&txns);
    let slice_total: f64 = slices.iter().map(|slice| slice.value).sum();
    assert_eq!(slice_total, stats.total_expenses);

    let reference = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    let series = ChartService::monthly_series(&txns, 2, reference);
    assert_eq!(series.len(), 2);
    assert_eq!((series[0].label, series[0].expense), ("Dec", 25.0));
    assert_eq!((series[1].label, series[1].income), ("Jan", 800.0));
}
