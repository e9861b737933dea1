//! Strictly-typed records for transactions, budgets and categories.
//!
//! Documents coming from the backend are mapped into these shapes by
//! [`record`] before any calculator sees them.

pub mod budget;
pub mod category;
pub mod common;
pub mod record;
pub mod transaction;

pub use budget::{
    AlertLevel, Budget, BudgetDraft, BudgetProgress, BudgetProgressRow, CAUTION_PERCENTAGE,
    DEFAULT_ALERT_THRESHOLD,
};
pub use category::{default_categories, Category, CategoryGroup};
pub use common::{DateRange, Identifiable};
pub use record::RecordError;
pub use transaction::Transaction;
