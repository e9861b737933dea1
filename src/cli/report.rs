use std::fmt::Write as _;

use colored::Colorize;

use crate::{
    core::{services::BudgetService, DashboardState},
    currency::{format_percentage, format_timestamp, MoneyFormatter},
    domain::{AlertLevel, BudgetProgressRow, Transaction, CAUTION_PERCENTAGE},
};

#[derive(Debug, Clone, Copy)]
pub struct ReportStyle {
    pub color: bool,
    pub caution_percentage: f64,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            color: false,
            caution_percentage: CAUTION_PERCENTAGE,
        }
    }
}

/// Plain-text dashboard for one user.
pub struct Report<'a> {
    user_id: &'a str,
    state: &'a DashboardState,
    money: MoneyFormatter,
    style: ReportStyle,
}

impl<'a> Report<'a> {
    pub fn new(
        user_id: &'a str,
        state: &'a DashboardState,
        money: MoneyFormatter,
        style: ReportStyle,
    ) -> Self {
        Self {
            user_id,
            state,
            money,
            style,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_totals(&mut out);
        self.render_recent(&mut out);
        self.render_budgets(&mut out);
        out
    }

    fn render_totals(&self, out: &mut String) {
        let stats = self.state.stats();
        self.section(out, &format!("Dashboard for {}", self.user_id));
        let _ = writeln!(out, "  Income   : {}", self.money.amount(stats.total_income));
        let _ = writeln!(out, "  Expenses : {}", self.money.amount(stats.total_expenses));
        let _ = writeln!(out, "  Balance  : {}", self.money.signed(stats.total_balance));
    }

    fn render_recent(&self, out: &mut String) {
        let recent = &self.state.stats().recent_transactions;
        self.section(out, "Recent transactions");
        if recent.is_empty() {
            let _ = writeln!(out, "  No transactions yet.");
            return;
        }
        let category_width = column_width(recent.iter().map(|txn| txn.category.as_str()));
        for txn in recent {
            let _ = writeln!(out, "  {}", self.transaction_line(txn, category_width));
        }
    }

    fn transaction_line(&self, txn: &Transaction, category_width: usize) -> String {
        let amount = self.money.signed(txn.amount);
        let amount = if !self.style.color {
            amount
        } else if txn.is_income() {
            amount.bright_green().to_string()
        } else {
            amount.bright_red().to_string()
        };
        format!(
            "{}  {:<width$}  {}  {}",
            format_timestamp(txn.date),
            txn.category,
            amount,
            txn.description,
            width = category_width
        )
        .trim_end()
        .to_string()
    }

    fn render_budgets(&self, out: &mut String) {
        let rows = &self.state.stats().budget_progress;
        self.section(out, "Budgets");
        if rows.is_empty() {
            let _ = writeln!(out, "  No budgets yet.");
            return;
        }
        let category_width = column_width(rows.iter().map(|row| row.category.as_str()));
        for row in rows {
            let _ = writeln!(out, "  {}", self.budget_line(row, category_width));
        }

        let totals = BudgetService::totals(rows);
        let _ = writeln!(
            out,
            "  Total: {} of {} spent, {} left",
            self.money.amount(totals.spent),
            self.money.amount(totals.budgeted),
            self.money.amount(totals.remaining())
        );
    }

    fn budget_line(&self, row: &BudgetProgressRow, category_width: usize) -> String {
        let level = row.alert_level(self.style.caution_percentage);
        let marker = format!("[{level}]");
        let marker = if !self.style.color {
            marker
        } else {
            match level {
                AlertLevel::Healthy => marker.green().to_string(),
                AlertLevel::Caution => marker.yellow().to_string(),
                AlertLevel::Alert => marker.red().bold().to_string(),
            }
        };
        format!(
            "{:<width$}  {} / {}  {:>4}  {} left  {}",
            row.category,
            self.money.amount(row.progress.spent),
            self.money.amount(row.budget),
            format_percentage(row.progress.percentage),
            self.money.amount(row.progress.remaining),
            marker,
            width = category_width
        )
    }

    fn section(&self, out: &mut String, title: &str) {
        if !out.is_empty() {
            out.push('\n');
        }
        let heading = format!("=== {} ===", title);
        if self.style.color {
            let _ = writeln!(out, "{}", heading.bold());
        } else {
            let _ = writeln!(out, "{}", heading);
        }
    }
}

fn column_width<'s>(values: impl Iterator<Item = &'s str>) -> usize {
    values.map(|value| value.chars().count()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::currency::CurrencyCode;
    use crate::domain::{Budget, DateRange};

    fn state() -> DashboardState {
        let jan = |d| Utc.with_ymd_and_hms(2025, 1, d, 12, 0, 0).unwrap();
        let mut state = DashboardState::new(5);
        state.apply_transactions(vec![
            Transaction::new("u1", 1500.0, "Income", "Salary", jan(1)),
            Transaction::new("u1", -80.0, "Food", "Groceries", jan(5)),
        ]);
        let period = DateRange::new(jan(1), jan(31)).unwrap();
        state.apply_budgets(vec![Budget::new("u1", "Food", 100.0, period)]);
        state
    }

    #[test]
    fn renders_sections_without_color() {
        let state = state();
        let money = MoneyFormatter::new(CurrencyCode::Usd, false);
        let text = Report::new("u1", &state, money, ReportStyle::default()).render();

        assert!(text.contains("=== Dashboard for u1 ==="));
        assert!(text.contains("Income   : $1,500.00"));
        assert!(text.contains("Balance  : +$1,420.00"));
        assert!(text.contains("05 Jan 2025  Food    -$80.00  Groceries"));
        assert!(text.contains("80%"));
        assert!(text.contains("[alert]"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn privacy_masks_amounts() {
        let state = state();
        let money = MoneyFormatter::new(CurrencyCode::Eur, true);
        let text = Report::new("u1", &state, money, ReportStyle::default()).render();

        assert!(text.contains("Income   : ****"));
        assert!(!text.contains("€"));
    }
}
