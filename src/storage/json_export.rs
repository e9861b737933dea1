use std::{fs, path::Path};

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::domain::{
    record::{budgets_from_documents, categories_from_documents, transactions_from_documents},
    Budget, Category, Transaction,
};

use super::{
    budget_snapshot, category_snapshot, transaction_snapshot, DocumentStore, Result,
};

/// Raw layout of an exported document collection.
#[derive(Debug, Default, Deserialize)]
struct ExportFile {
    #[serde(default)]
    transactions: Vec<Value>,
    #[serde(default)]
    budgets: Vec<Value>,
    #[serde(default)]
    categories: Vec<Value>,
}

/// Read-only store over a JSON export of backend documents.
///
/// Documents pass through the record boundary on load; unreadable ones are skipped.
#[derive(Debug, Clone, Default)]
pub struct JsonExportStore {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    categories: Vec<Category>,
}

impl JsonExportStore {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let store = Self::from_json(&data)?;
        info!(
            path = %path.display(),
            transactions = store.transactions.len(),
            budgets = store.budgets.len(),
            categories = store.categories.len(),
            "loaded document export"
        );
        Ok(store)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let export: ExportFile = serde_json::from_str(data)?;
        Ok(Self {
            transactions: transactions_from_documents(&export.transactions),
            budgets: budgets_from_documents(&export.budgets),
            categories: categories_from_documents(&export.categories),
        })
    }
}

impl DocumentStore for JsonExportStore {
    fn fetch_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        Ok(transaction_snapshot(&self.transactions, user_id))
    }

    fn fetch_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
        Ok(budget_snapshot(&self.budgets, user_id))
    }

    fn fetch_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        Ok(category_snapshot(&self.categories, user_id))
    }
}
