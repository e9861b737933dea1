//! Screen-local dashboard state fed by store subscriptions.

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::config::Config;
use crate::core::services::{DashboardStats, SummaryService, RECENT_TRANSACTION_LIMIT};
use crate::domain::{Budget, BudgetProgressRow, Transaction};
use crate::storage::{DocumentStore, Result, Subscription};

/// Latest transaction and budget snapshots plus everything derived from them.
///
/// Every update replaces a whole snapshot and recomputes all derived values.
#[derive(Debug, Clone)]
pub struct DashboardState {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    recent_limit: usize,
    transactions_loaded: bool,
    budgets_loaded: bool,
    stats: DashboardStats,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(RECENT_TRANSACTION_LIMIT)
    }
}

impl DashboardState {
    pub fn new(recent_limit: usize) -> Self {
        Self {
            transactions: Vec::new(),
            budgets: Vec::new(),
            recent_limit,
            transactions_loaded: false,
            budgets_loaded: false,
            stats: DashboardStats::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.recent_transaction_limit)
    }

    pub fn apply_transactions(&mut self, snapshot: Vec<Transaction>) {
        self.transactions = snapshot;
        self.transactions_loaded = true;
        self.recompute();
    }

    pub fn apply_budgets(&mut self, snapshot: Vec<Budget>) {
        self.budgets = snapshot;
        self.budgets_loaded = true;
        self.recompute();
    }

    /// `true` once both collections have delivered at least one snapshot.
    pub fn is_ready(&self) -> bool {
        self.transactions_loaded && self.budgets_loaded
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn progress_for(&self, budget_id: &str) -> Option<&BudgetProgressRow> {
        self.stats
            .budget_progress
            .iter()
            .find(|row| row.budget_id == budget_id)
    }

    fn recompute(&mut self) {
        self.stats =
            SummaryService::compute_dashboard(&self.transactions, &self.budgets, self.recent_limit);
        debug!(
            transactions = self.transactions.len(),
            budgets = self.budgets.len(),
            "dashboard recomputed"
        );
    }
}

/// Keeps a [`DashboardState`] current by subscribing to a store.
///
/// Dropping the watch cancels both subscriptions.
pub struct DashboardWatch {
    state: Arc<Mutex<DashboardState>>,
    _transactions: Subscription,
    _budgets: Subscription,
}

impl DashboardWatch {
    pub fn start(
        store: &dyn DocumentStore,
        user_id: &str,
        initial: DashboardState,
    ) -> Result<Self> {
        let state = Arc::new(Mutex::new(initial));

        let txn_state = Arc::clone(&state);
        let transactions = store.subscribe_transactions(
            user_id,
            Box::new(move |snapshot| {
                if let Ok(mut guard) = txn_state.lock() {
                    guard.apply_transactions(snapshot);
                }
            }),
        )?;

        let budget_state = Arc::clone(&state);
        let budgets = store.subscribe_budgets(
            user_id,
            Box::new(move |snapshot| {
                if let Ok(mut guard) = budget_state.lock() {
                    guard.apply_budgets(snapshot);
                }
            }),
        )?;

        Ok(Self {
            state,
            _transactions: transactions,
            _budgets: budgets,
        })
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> DashboardState {
        match self.state.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
