//! Dashboard totals and the recent-activity list.

use serde::Serialize;
use tracing::warn;

use crate::domain::{Budget, BudgetProgressRow, Transaction};

use super::BudgetService;

/// Number of transactions listed as recent activity.
pub const RECENT_TRANSACTION_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_income: f64,
    pub total_expenses: f64,
    pub total_balance: f64,
    pub recent_transactions: Vec<Transaction>,
    pub budget_progress: Vec<BudgetProgressRow>,
}

pub struct SummaryService;

impl SummaryService {
    /// Totals and recent activity for a transaction snapshot; budget progress stays empty.
    pub fn compute_stats(transactions: &[Transaction]) -> DashboardStats {
        Self::compute_stats_with_limit(transactions, RECENT_TRANSACTION_LIMIT)
    }

    pub fn compute_stats_with_limit(
        transactions: &[Transaction],
        recent_limit: usize,
    ) -> DashboardStats {
        let mut total_income = 0.0;
        let mut total_expenses = 0.0;
        for txn in transactions.iter().filter(|txn| txn.is_active()) {
            if txn.is_income() {
                total_income += txn.amount;
            } else if txn.is_expense() {
                total_expenses += txn.amount.abs();
            }
        }

        DashboardStats {
            total_income,
            total_expenses,
            total_balance: total_income - total_expenses,
            recent_transactions: Self::recent_transactions(transactions, recent_limit),
            budget_progress: Vec::new(),
        }
    }

    /// Full dashboard: totals, recent activity and progress for every budget.
    pub fn compute_dashboard(
        transactions: &[Transaction],
        budgets: &[Budget],
        recent_limit: usize,
    ) -> DashboardStats {
        let mut stats = Self::compute_stats_with_limit(transactions, recent_limit);
        stats.budget_progress = BudgetService::progress_for_all(budgets, transactions);
        stats
    }

    /// The `limit` most recent dated transactions, newest first.
    ///
    /// Undated records are left out of the ranking; equal dates keep input order.
    pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
        let mut dated: Vec<&Transaction> = transactions
            .iter()
            .filter(|txn| txn.is_active())
            .filter(|txn| {
                if txn.date.is_none() {
                    warn!(
                        transaction = %txn.id,
                        "transaction has no valid date; left out of recent activity"
                    );
                }
                txn.date.is_some()
            })
            .collect();
        dated.sort_by(|a, b| b.date.cmp(&a.date));
        dated.into_iter().take(limit).cloned().collect()
    }

    /// Orders a snapshot newest first, with undated records last.
    pub fn sort_by_date_desc(transactions: &mut [Transaction]) {
        transactions.sort_by(|a, b| match (a.date, b.date) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
    }
}
