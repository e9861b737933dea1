use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{DateRange, Identifiable};

/// Threshold applied when a budget is created without one.
pub const DEFAULT_ALERT_THRESHOLD: f64 = 80.0;
/// Consumption percentage at which a budget is flagged before reaching its alert threshold.
pub const CAUTION_PERCENTAGE: f64 = 60.0;

/// A spending target for one category over an inclusive period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub amount: f64,
    /// `None` when the stored start date was missing or unreadable.
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub alert_threshold: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Budget {
    pub fn new(
        user_id: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        period: DateRange,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            category: category.into(),
            amount,
            start_date: Some(period.start),
            end_date: Some(period.end),
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            created_at: None,
        }
    }

    pub fn with_alert_threshold(mut self, threshold: f64) -> Self {
        self.alert_threshold = threshold;
        self
    }

    /// The budget period, or `None` when either bound is missing or start > end.
    pub fn period(&self) -> Option<DateRange> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => DateRange::new(start, end),
            _ => None,
        }
    }
}

impl Identifiable for Budget {
    fn id(&self) -> &str {
        &self.id
    }
}

/// User input for creating or editing a budget, validated by `BudgetService::validate_draft`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetDraft {
    /// Set when editing an existing budget.
    pub id: Option<String>,
    pub user_id: String,
    pub category: String,
    pub amount: f64,
    pub alert_threshold: Option<f64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Derived consumption of a budget. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    pub spent: f64,
    /// Share of the budget consumed, capped at 100.
    pub percentage: f64,
    /// Unspent amount, floored at zero.
    pub remaining: f64,
}

impl BudgetProgress {
    pub fn from_spent(budget_amount: f64, spent: f64) -> Self {
        let percentage = if budget_amount > 0.0 {
            (spent / budget_amount * 100.0).min(100.0)
        } else {
            0.0
        };
        Self {
            spent,
            percentage,
            remaining: (budget_amount - spent).max(0.0),
        }
    }

    pub fn is_over_threshold(&self, alert_threshold: f64) -> bool {
        self.percentage >= alert_threshold
    }

    pub fn alert_level(&self, alert_threshold: f64, caution_percentage: f64) -> AlertLevel {
        if self.is_over_threshold(alert_threshold) {
            AlertLevel::Alert
        } else if self.percentage >= caution_percentage {
            AlertLevel::Caution
        } else {
            AlertLevel::Healthy
        }
    }
}

/// Progress of a single budget, as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgressRow {
    pub budget_id: String,
    pub category: String,
    pub budget: f64,
    pub alert_threshold: f64,
    pub progress: BudgetProgress,
}

impl BudgetProgressRow {
    pub fn alert_level(&self, caution_percentage: f64) -> AlertLevel {
        self.progress
            .alert_level(self.alert_threshold, caution_percentage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertLevel {
    Healthy,
    Caution,
    Alert,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertLevel::Healthy => "on track",
            AlertLevel::Caution => "caution",
            AlertLevel::Alert => "alert",
        };
        f.write_str(label)
    }
}
