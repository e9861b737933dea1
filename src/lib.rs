#![doc(test(attr(deny(warnings))))]

//! Smart Budget Core holds the budgeting and dashboard logic of a personal finance
//! app: budget progress, income and expense totals, chart series, the category
//! catalogue, and the document boundary that turns loosely shaped backend records
//! into typed ones.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::core::services::{
    BudgetService, CategoryService, ChartService, DashboardStats, SummaryService,
};
pub use crate::core::{DashboardState, DashboardWatch};
pub use crate::errors::BudgetError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("smart budget core tracing initialized");
    });
}
