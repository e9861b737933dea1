//! Calculators and the dashboard state that drives them.

pub mod dashboard;
pub mod services;

pub use dashboard::{DashboardState, DashboardWatch};
