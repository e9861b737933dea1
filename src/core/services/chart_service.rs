//! Aggregations feeding the dashboard charts.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::currency::month_label;
use crate::domain::{BudgetProgressRow, Transaction};

use super::DashboardStats;

/// Palette cycled through when a series has no dedicated colour.
pub const CHART_COLORS: [&str; 10] = [
    "#4A90E2", "#E57373", "#81C784", "#FFD54F", "#7986CB", "#FF8A65", "#9575CD", "#4DB6AC",
    "#F06292", "#A1887F",
];

/// Longest window `monthly_series` will build.
pub const MAX_SERIES_MONTHS: u32 = 120;

const INCOME_COLOR: &str = "#4A90E2";
const EXPENSE_COLOR: &str = "#E57373";

static CATEGORY_COLORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Food & Dining", "#4A90E2"),
        ("Transportation", "#E57373"),
        ("Education", "#81C784"),
        ("Clothes", "#FFD54F"),
        ("Healthcare", "#7986CB"),
        ("Entertainment", "#FF8A65"),
        ("Housing", "#9575CD"),
        ("Utilities", "#4DB6AC"),
        ("Shopping", "#F06292"),
        ("Other", "#A1887F"),
    ])
});

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub name: String,
    pub value: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub label: &'static str,
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expense: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: &'static str,
    pub value: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressBar {
    pub label: String,
    /// Consumed share in `[0, 1]`.
    pub fraction: f64,
    pub color: &'static str,
}

pub struct ChartService;

impl ChartService {
    /// Expense totals per category, largest first.
    ///
    /// Colours are assigned from the palette in first-seen order before sorting.
    pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategorySlice> {
        let mut order: Vec<(String, f64)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for txn in transactions
            .iter()
            .filter(|txn| txn.is_active() && txn.is_expense())
        {
            match index.get(txn.category.as_str()) {
                Some(&slot) => order[slot].1 += txn.amount.abs(),
                None => {
                    index.insert(txn.category.as_str(), order.len());
                    order.push((txn.category.clone(), txn.amount.abs()));
                }
            }
        }

        let mut slices: Vec<CategorySlice> = order
            .into_iter()
            .enumerate()
            .map(|(position, (name, value))| CategorySlice {
                name,
                value,
                color: CHART_COLORS[position % CHART_COLORS.len()],
            })
            .collect();
        slices.sort_by(|a, b| b.value.total_cmp(&a.value));
        slices
    }

    /// Income and expense per calendar month for the `months` months ending at `reference`.
    ///
    /// Windows longer than [`MAX_SERIES_MONTHS`] are shortened to that length.
    pub fn monthly_series(
        transactions: &[Transaction],
        months: u32,
        reference: NaiveDate,
    ) -> Vec<MonthlyPoint> {
        let months = months.min(MAX_SERIES_MONTHS);
        if months == 0 {
            return Vec::new();
        }
        let last = month_index(reference.year(), reference.month());
        let Some(first) = i32::try_from(months - 1)
            .ok()
            .and_then(|span| last.checked_sub(span))
        else {
            return Vec::new();
        };

        let mut points: Vec<MonthlyPoint> = (first..=last)
            .map(|idx| {
                let year = idx.div_euclid(12);
                let month = idx.rem_euclid(12) as u32 + 1;
                MonthlyPoint {
                    label: month_label(month),
                    year,
                    month,
                    income: 0.0,
                    expense: 0.0,
                }
            })
            .collect();

        for txn in transactions.iter().filter(|txn| txn.is_active()) {
            let Some(date) = txn.date else {
                continue;
            };
            let idx = month_index(date.year(), date.month());
            if idx < first || idx > last {
                continue;
            }
            let point = &mut points[(idx - first) as usize];
            if txn.is_income() {
                point.income += txn.amount;
            } else {
                point.expense += txn.amount.abs();
            }
        }
        points
    }

    pub fn income_vs_expense(stats: &DashboardStats) -> [ChartBar; 2] {
        [
            ChartBar {
                label: "Income",
                value: stats.total_income,
                color: INCOME_COLOR,
            },
            ChartBar {
                label: "Expenses",
                value: stats.total_expenses,
                color: EXPENSE_COLOR,
            },
        ]
    }

    pub fn budget_progress_chart(rows: &[BudgetProgressRow]) -> Vec<ProgressBar> {
        rows.iter()
            .enumerate()
            .map(|(position, row)| ProgressBar {
                label: row.category.clone(),
                fraction: row.progress.percentage / 100.0,
                color: CATEGORY_COLORS
                    .get(row.category.as_str())
                    .copied()
                    .unwrap_or(CHART_COLORS[position % CHART_COLORS.len()]),
            })
            .collect()
    }
}

fn month_index(year: i32, month: u32) -> i32 {
    year * 12 + month as i32 - 1
}
