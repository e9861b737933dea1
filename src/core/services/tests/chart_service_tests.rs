use chrono::NaiveDate;

use super::*;
use crate::core::services::chart_service::{CHART_COLORS, MAX_SERIES_MONTHS};
use crate::core::services::{BudgetService, ChartService, SummaryService};

#[test]
fn category_breakdown_sorts_by_total_and_keeps_first_seen_colours() {
    let transactions = vec![
        txn(-10.0, "Food", ts(2025, 1, 1)),
        txn(-50.0, "Rent", ts(2025, 1, 2)),
        txn(-15.0, "Food", ts(2025, 1, 3)),
        txn(300.0, "Income", ts(2025, 1, 4)),
    ];

    let slices = ChartService::category_breakdown(&transactions);
    assert_eq!(slices.len(), 2);
    assert_eq!(slices[0].name, "Rent");
    assert_eq!(slices[0].value, 50.0);
    assert_eq!(slices[0].color, CHART_COLORS[1]);
    assert_eq!(slices[1].name, "Food");
    assert_eq!(slices[1].value, 25.0);
    assert_eq!(slices[1].color, CHART_COLORS[0]);
}

#[test]
fn monthly_series_covers_window_across_year_boundary() {
    let transactions = vec![
        txn(1000.0, "Income", ts(2024, 11, 30)),
        txn(-200.0, "Food", ts(2025, 1, 15)),
        txn(-999.0, "Food", ts(2024, 10, 31)),
        undated(-5.0, "Food"),
    ];
    let reference = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();

    let series = ChartService::monthly_series(&transactions, 3, reference);
    let labels: Vec<&str> = series.iter().map(|point| point.label).collect();
    assert_eq!(labels, vec!["Nov", "Dec", "Jan"]);
    assert_eq!(series[0].year, 2024);
    assert_eq!(series[0].income, 1000.0);
    assert_eq!(series[1].income + series[1].expense, 0.0);
    assert_eq!(series[2].year, 2025);
    assert_eq!(series[2].expense, 200.0);

    assert!(ChartService::monthly_series(&transactions, 0, reference).is_empty());
}

#[test]
fn monthly_series_caps_oversized_windows() {
    let transactions = vec![txn(-40.0, "Food", ts(2025, 1, 10))];
    let reference = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();

    for months in [MAX_SERIES_MONTHS + 1, 2_147_483_648, u32::MAX] {
        let series = ChartService::monthly_series(&transactions, months, reference);
        assert_eq!(series.len(), MAX_SERIES_MONTHS as usize);
        assert_eq!((series[0].year, series[0].month), (2015, 2));
        let latest = series.last().unwrap();
        assert_eq!((latest.year, latest.month, latest.expense), (2025, 1, 40.0));
    }
}

#[test]
fn income_vs_expense_mirrors_stats() {
    let transactions = vec![
        txn(120.0, "Income", ts(2025, 1, 1)),
        txn(-20.0, "Food", ts(2025, 1, 1)),
    ];
    let stats = SummaryService::compute_stats(&transactions);
    let bars = ChartService::income_vs_expense(&stats);

    assert_eq!(bars[0].label, "Income");
    assert_eq!(bars[0].value, 120.0);
    assert_eq!(bars[1].label, "Expenses");
    assert_eq!(bars[1].value, 20.0);
}

#[test]
fn progress_chart_uses_known_category_colours_then_palette() {
    let budgets = vec![
        january_budget("Housing", 100.0),
        january_budget("Pets", 100.0),
    ];
    let transactions = vec![txn(-25.0, "Housing", ts(2025, 1, 5))];
    let rows = BudgetService::progress_for_all(&budgets, &transactions);

    let bars = ChartService::budget_progress_chart(&rows);
    assert_eq!(bars[0].color, "#9575CD");
    assert_eq!(bars[0].fraction, 0.25);
    assert_eq!(bars[1].color, CHART_COLORS[1]);
    assert_eq!(bars[1].fraction, 0.0);
}
