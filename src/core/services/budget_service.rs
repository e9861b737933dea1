//! Budget progress computation and budget input validation.

use chrono::{DateTime, Months, Utc};
use tracing::{debug, warn};

use crate::domain::{
    Budget, BudgetDraft, BudgetProgress, BudgetProgressRow, DateRange, Transaction,
    DEFAULT_ALERT_THRESHOLD,
};

use super::{ServiceError, ServiceResult};

/// Stateless budgeting utilities over transaction snapshots.
pub struct BudgetService;

impl BudgetService {
    /// Computes how much of `budget` the transactions have consumed.
    ///
    /// A transaction counts when it is active, shares the budget's category, is an
    /// expense, and is dated inside the budget period. Records with missing dates
    /// never match; a budget without a valid period reports zero spend.
    pub fn compute_progress(budget: &Budget, transactions: &[Transaction]) -> BudgetProgress {
        let Some(period) = budget.period() else {
            warn!(
                budget = %budget.id,
                category = %budget.category,
                "budget has no valid period; reporting zero progress"
            );
            return BudgetProgress::from_spent(budget.amount, 0.0);
        };

        let spent = transactions
            .iter()
            .filter(|txn| Self::counts_toward(budget, &period, txn))
            .map(|txn| txn.amount.abs())
            .sum::<f64>();
        BudgetProgress::from_spent(budget.amount, spent)
    }

    /// Computes one progress row per budget, preserving budget order.
    pub fn progress_for_all(
        budgets: &[Budget],
        transactions: &[Transaction],
    ) -> Vec<BudgetProgressRow> {
        budgets
            .iter()
            .map(|budget| BudgetProgressRow {
                budget_id: budget.id.clone(),
                category: budget.category.clone(),
                budget: budget.amount,
                alert_threshold: budget.alert_threshold,
                progress: Self::compute_progress(budget, transactions),
            })
            .collect()
    }

    pub fn totals(rows: &[BudgetProgressRow]) -> BudgetTotals {
        rows.iter().fold(BudgetTotals::default(), |mut totals, row| {
            totals.budgeted += row.budget;
            totals.spent += row.progress.spent;
            totals
        })
    }

    /// Validates user input for a new or edited budget.
    ///
    /// Missing dates default to a one-month period starting at `today`.
    pub fn validate_draft(draft: &BudgetDraft, today: DateTime<Utc>) -> ServiceResult<Budget> {
        let category = draft.category.trim();
        if category.is_empty() {
            return Err(ServiceError::Invalid("Budget category is required".into()));
        }
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(ServiceError::Invalid(
                "Budget amount must be greater than zero".into(),
            ));
        }
        let threshold = draft.alert_threshold.unwrap_or(DEFAULT_ALERT_THRESHOLD);
        if !threshold.is_finite() || !(0.0..=100.0).contains(&threshold) {
            return Err(ServiceError::Invalid(
                "Alert threshold must be between 0 and 100".into(),
            ));
        }

        let start = draft.start_date.unwrap_or(today);
        let end = draft
            .end_date
            .unwrap_or_else(|| start.checked_add_months(Months::new(1)).unwrap_or(start));
        let period = DateRange::new(start, end).ok_or_else(|| {
            ServiceError::Invalid("Budget start date must not be after its end date".into())
        })?;

        let mut budget = Budget::new(draft.user_id.clone(), category, draft.amount, period)
            .with_alert_threshold(threshold);
        if let Some(id) = &draft.id {
            budget.id = id.clone();
        }
        budget.created_at = Some(today);
        debug!(budget = %budget.id, category, "validated budget draft");
        Ok(budget)
    }

    fn counts_toward(budget: &Budget, period: &DateRange, txn: &Transaction) -> bool {
        if !txn.is_active() || !txn.is_expense() || txn.category != budget.category {
            return false;
        }
        match txn.date {
            Some(date) => period.contains(date),
            None => {
                warn!(
                    transaction = %txn.id,
                    budget = %budget.id,
                    "transaction has no valid date; excluded from budget"
                );
                false
            }
        }
    }
}

/// Sums across every budget on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BudgetTotals {
    pub budgeted: f64,
    pub spent: f64,
}

impl BudgetTotals {
    pub fn remaining(&self) -> f64 {
        (self.budgeted - self.spent).max(0.0)
    }
}
