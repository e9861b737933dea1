use std::sync::{Arc, Mutex, MutexGuard, Weak};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::{
    core::services::CategoryService,
    domain::{Budget, Category, Identifiable, Transaction},
    errors::BudgetError,
};

use super::{
    budget_snapshot, category_snapshot, transaction_snapshot, DocumentStore, Result,
    SnapshotCallback, Subscription,
};

/// A subscriber callback plus the revision of the last snapshot it received.
///
/// Delivery holds `delivered` for the duration of the call, so one listener never
/// runs twice at once and never sees a snapshot older than one it already got.
/// Listeners must not mutate the store they are subscribed to.
struct Listener<T> {
    callback: SnapshotCallback<T>,
    delivered: Mutex<Option<u64>>,
}

impl<T> Listener<T> {
    fn new(callback: SnapshotCallback<T>) -> Arc<Self> {
        Arc::new(Self {
            callback,
            delivered: Mutex::new(None),
        })
    }

    fn deliver(&self, revision: u64, snapshot: Vec<T>) {
        let mut delivered = match self.delivered.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if delivered.is_some_and(|last| last >= revision) {
            debug!(revision, "dropping stale snapshot");
            return;
        }
        (self.callback)(snapshot);
        *delivered = Some(revision);
    }
}

struct Subscriber<T> {
    id: u64,
    user_id: String,
    listener: Arc<Listener<T>>,
}

struct Subscribers<T> {
    entries: Vec<Subscriber<T>>,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Subscribers<T> {
    fn add(&mut self, id: u64, user_id: &str, listener: Arc<Listener<T>>) {
        self.entries.push(Subscriber {
            id,
            user_id: user_id.to_string(),
            listener,
        });
    }

    fn remove(&mut self, id: u64) {
        self.entries.retain(|entry| entry.id != id);
    }

    fn for_user(&self, user_id: &str) -> Vec<Arc<Listener<T>>> {
        self.entries
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| Arc::clone(&entry.listener))
            .collect()
    }
}

#[derive(Default)]
struct Inner {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    categories: Vec<Category>,
    transaction_subscribers: Subscribers<Transaction>,
    budget_subscribers: Subscribers<Budget>,
    next_subscriber: u64,
    /// Bumped on every mutation; snapshots carry the value they were read at.
    revision: u64,
}

impl Inner {
    fn next_id(&mut self) -> u64 {
        self.next_subscriber += 1;
        self.next_subscriber
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}

/// In-process document store with push-style change notification.
///
/// Listeners run outside the internal lock and always receive an owned snapshot.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a transaction by id.
    ///
    /// When the replacement changes the owner, both users are notified.
    pub fn put_transaction(&self, transaction: Transaction) -> Result<()> {
        let user_id = transaction.user_id.clone();
        let previous_owner = {
            let mut inner = self.lock()?;
            inner.bump();
            upsert(&mut inner.transactions, transaction).map(|old| old.user_id)
        };
        if let Some(previous) = previous_owner.filter(|previous| *previous != user_id) {
            self.notify_transactions(&previous)?;
        }
        self.notify_transactions(&user_id)
    }

    pub fn soft_delete_transaction(&self, id: &str, at: DateTime<Utc>) -> Result<()> {
        let user_id = {
            let mut inner = self.lock()?;
            let txn = inner
                .transactions
                .iter_mut()
                .find(|txn| txn.id == id)
                .ok_or_else(|| BudgetError::TransactionNotFound(id.to_string()))?;
            txn.soft_delete(at);
            let owner = txn.user_id.clone();
            inner.bump();
            owner
        };
        self.notify_transactions(&user_id)
    }

    /// Inserts or replaces a budget by id.
    ///
    /// When the replacement changes the owner, both users are notified.
    pub fn put_budget(&self, budget: Budget) -> Result<()> {
        let user_id = budget.user_id.clone();
        let previous_owner = {
            let mut inner = self.lock()?;
            inner.bump();
            upsert(&mut inner.budgets, budget).map(|old| old.user_id)
        };
        if let Some(previous) = previous_owner.filter(|previous| *previous != user_id) {
            self.notify_budgets(&previous)?;
        }
        self.notify_budgets(&user_id)
    }

    /// Removes a budget permanently.
    pub fn delete_budget(&self, id: &str) -> Result<()> {
        let user_id = {
            let mut inner = self.lock()?;
            let position = inner
                .budgets
                .iter()
                .position(|budget| budget.id == id)
                .ok_or_else(|| BudgetError::BudgetNotFound(id.to_string()))?;
            inner.bump();
            inner.budgets.remove(position).user_id
        };
        self.notify_budgets(&user_id)
    }

    /// Adds a category after checking its name against everything the owner can see.
    pub fn put_category(&self, category: Category) -> Result<()> {
        let mut inner = self.lock()?;
        if let Some(owner) = category.user_id.as_deref() {
            let visible = category_snapshot(&inner.categories, owner);
            CategoryService::validate_name(&visible, Some(category.id.as_str()), &category.name)
                .map_err(|err| BudgetError::Validation(err.to_string()))?;
        }
        inner.bump();
        upsert(&mut inner.categories, category);
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        lock_inner(&self.inner)
    }

    fn notify_transactions(&self, user_id: &str) -> Result<()> {
        let (revision, snapshot, listeners) = {
            let inner = self.lock()?;
            (
                inner.revision,
                transaction_snapshot(&inner.transactions, user_id),
                inner.transaction_subscribers.for_user(user_id),
            )
        };
        debug!(user = user_id, revision, listeners = listeners.len(), "transactions changed");
        for listener in listeners {
            listener.deliver(revision, snapshot.clone());
        }
        Ok(())
    }

    fn notify_budgets(&self, user_id: &str) -> Result<()> {
        let (revision, snapshot, listeners) = {
            let inner = self.lock()?;
            (
                inner.revision,
                budget_snapshot(&inner.budgets, user_id),
                inner.budget_subscribers.for_user(user_id),
            )
        };
        debug!(user = user_id, revision, listeners = listeners.len(), "budgets changed");
        for listener in listeners {
            listener.deliver(revision, snapshot.clone());
        }
        Ok(())
    }
}

impl DocumentStore for MemoryStore {
    fn fetch_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        Ok(transaction_snapshot(&self.lock()?.transactions, user_id))
    }

    fn fetch_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
        Ok(budget_snapshot(&self.lock()?.budgets, user_id))
    }

    fn fetch_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        Ok(category_snapshot(&self.lock()?.categories, user_id))
    }

    fn subscribe_transactions(
        &self,
        user_id: &str,
        callback: SnapshotCallback<Transaction>,
    ) -> Result<Subscription> {
        let listener = Listener::new(callback);
        let (id, revision, snapshot) = {
            let mut inner = self.lock()?;
            let id = inner.next_id();
            inner
                .transaction_subscribers
                .add(id, user_id, Arc::clone(&listener));
            (
                id,
                inner.revision,
                transaction_snapshot(&inner.transactions, user_id),
            )
        };
        listener.deliver(revision, snapshot);

        let weak = Arc::downgrade(&self.inner);
        Ok(Subscription::new(move || {
            with_inner(&weak, |inner| inner.transaction_subscribers.remove(id))
        }))
    }

    fn subscribe_budgets(
        &self,
        user_id: &str,
        callback: SnapshotCallback<Budget>,
    ) -> Result<Subscription> {
        let listener = Listener::new(callback);
        let (id, revision, snapshot) = {
            let mut inner = self.lock()?;
            let id = inner.next_id();
            inner
                .budget_subscribers
                .add(id, user_id, Arc::clone(&listener));
            (id, inner.revision, budget_snapshot(&inner.budgets, user_id))
        };
        listener.deliver(revision, snapshot);

        let weak = Arc::downgrade(&self.inner);
        Ok(Subscription::new(move || {
            with_inner(&weak, |inner| inner.budget_subscribers.remove(id))
        }))
    }
}

fn lock_inner(inner: &Mutex<Inner>) -> Result<MutexGuard<'_, Inner>> {
    inner
        .lock()
        .map_err(|_| BudgetError::Storage("memory store lock poisoned".into()))
}

fn with_inner(weak: &Weak<Mutex<Inner>>, apply: impl FnOnce(&mut Inner)) {
    if let Some(inner) = weak.upgrade() {
        if let Ok(mut guard) = lock_inner(&inner) {
            apply(&mut guard);
        }
    }
}

/// Replaces the record with the same id, returning the one it replaced.
fn upsert<T: Identifiable>(records: &mut Vec<T>, record: T) -> Option<T> {
    match records.iter().position(|existing| existing.id() == record.id()) {
        Some(position) => Some(std::mem::replace(&mut records[position], record)),
        None => {
            records.push(record);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listener_drops_snapshots_older_than_the_last_delivered() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let listener: Arc<Listener<u8>> =
            Listener::new(Box::new(move |snapshot| sink.lock().unwrap().push(snapshot)));

        listener.deliver(3, vec![3]);
        listener.deliver(2, vec![2]);
        listener.deliver(3, vec![3]);
        listener.deliver(5, vec![5]);

        assert_eq!(*seen.lock().unwrap(), vec![vec![3], vec![5]]);
    }

    #[test]
    fn upsert_returns_replaced_record() {
        let mut categories = Vec::new();
        let pets = Category::new("u1", "Pets", crate::domain::CategoryGroup::Expenses);
        assert!(upsert(&mut categories, pets.clone()).is_none());

        let mut renamed = pets.clone();
        renamed.name = "Animals".into();
        let replaced = upsert(&mut categories, renamed).map(|old| old.name);
        assert_eq!(replaced.as_deref(), Some("Pets"));
        assert_eq!(categories.len(), 1);
    }
}
