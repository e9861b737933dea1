pub mod budget_service;
pub mod category_service;
pub mod chart_service;
pub mod summary_service;

pub use budget_service::{BudgetService, BudgetTotals};
pub use category_service::CategoryService;
pub use chart_service::{
    CategorySlice, ChartBar, ChartService, MonthlyPoint, ProgressBar, MAX_SERIES_MONTHS,
};
pub use summary_service::{DashboardStats, SummaryService, RECENT_TRANSACTION_LIMIT};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Rejected user input; the message is shown to the user as is.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests;
