//! Document store contract and its in-process implementations.
//!
//! A store scopes every query to a user id. Subscriptions deliver the full current
//! collection on every change; consumers recompute from scratch.

pub mod json_export;
pub mod memory;

use crate::{
    core::services::{CategoryService, SummaryService},
    domain::{Budget, Category, Transaction},
    errors::BudgetError,
};

pub use json_export::JsonExportStore;
pub use memory::MemoryStore;

pub type Result<T> = std::result::Result<T, BudgetError>;

/// Receives a complete snapshot of a collection.
pub type SnapshotCallback<T> = Box<dyn Fn(Vec<T>) + Send + Sync>;

/// Abstraction over the backend document database.
pub trait DocumentStore: Send + Sync {
    /// Active transactions of a user, newest first with undated records last.
    fn fetch_transactions(&self, user_id: &str) -> Result<Vec<Transaction>>;

    /// Budgets of a user, most recently created first.
    fn fetch_budgets(&self, user_id: &str) -> Result<Vec<Budget>>;

    /// The user's categories merged with the shared defaults.
    fn fetch_categories(&self, user_id: &str) -> Result<Vec<Category>>;

    /// Delivers the current transactions immediately and again after every change.
    ///
    /// The default implementation suits read-only stores: it delivers one snapshot.
    fn subscribe_transactions(
        &self,
        user_id: &str,
        callback: SnapshotCallback<Transaction>,
    ) -> Result<Subscription> {
        callback(self.fetch_transactions(user_id)?);
        Ok(Subscription::detached())
    }

    fn subscribe_budgets(
        &self,
        user_id: &str,
        callback: SnapshotCallback<Budget>,
    ) -> Result<Subscription> {
        callback(self.fetch_budgets(user_id)?);
        Ok(Subscription::detached())
    }
}

/// Handle for a live subscription. Delivery stops when it is cancelled or dropped.
#[must_use = "dropping a subscription cancels it"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle with nothing to cancel.
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Keeps a user's active transactions, ordered for display.
pub(crate) fn transaction_snapshot(all: &[Transaction], user_id: &str) -> Vec<Transaction> {
    let mut snapshot: Vec<Transaction> = all
        .iter()
        .filter(|txn| txn.user_id == user_id && txn.is_active())
        .cloned()
        .collect();
    SummaryService::sort_by_date_desc(&mut snapshot);
    snapshot
}

pub(crate) fn budget_snapshot(all: &[Budget], user_id: &str) -> Vec<Budget> {
    let mut snapshot: Vec<Budget> = all
        .iter()
        .filter(|budget| budget.user_id == user_id)
        .cloned()
        .collect();
    snapshot.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    snapshot
}

pub(crate) fn category_snapshot(all: &[Category], user_id: &str) -> Vec<Category> {
    let (defaults, owned): (Vec<Category>, Vec<Category>) = all
        .iter()
        .filter(|category| {
            category.user_id.is_none() || category.user_id.as_deref() == Some(user_id)
        })
        .cloned()
        .partition(|category| category.user_id.is_none());
    if defaults.is_empty() {
        CategoryService::catalogue(&owned)
    } else {
        CategoryService::merge(&owned, &defaults)
    }
}
