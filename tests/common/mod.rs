#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use smart_budget_core::domain::{Budget, DateRange, Transaction};
use tempfile::TempDir;

pub const USER: &str = "user-1";

/// Keeps temp dirs alive until the test binary exits.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn txn(amount: f64, category: &str, date: DateTime<Utc>) -> Transaction {
    Transaction::new(USER, amount, category, format!("{category} entry"), date)
}

pub fn budget(category: &str, amount: f64, start: DateTime<Utc>, end: DateTime<Utc>) -> Budget {
    Budget::new(USER, category, amount, DateRange::new(start, end).expect("ordered range"))
}

/// A small export in the loosely typed shape the backend produces.
pub fn sample_export() -> Value {
    json!({
        "transactions": [
            { "id": "t1", "userId": USER, "amount": 1000, "category": "Income",
              "description": "Salary", "date": { "seconds": 1735732800, "nanoseconds": 0 } },
            { "id": "t2", "userId": USER, "amount": -40, "category": "Food",
              "description": "Groceries", "date": "2025-01-05T10:00:00Z" },
            { "id": "t3", "userId": USER, "amount": -40, "category": "Food",
              "description": "Dinner", "date": "2025-01-20" },
            { "id": "t4", "userId": USER, "amount": -300, "category": "Housing",
              "description": "Rent", "date": "2025-01-02", "isDeleted": true },
            { "id": "t5", "userId": "someone-else", "amount": -999, "category": "Food",
              "description": "Not ours", "date": "2025-01-03" },
            { "id": "broken", "userId": USER, "category": "Food" }
        ],
        "budgets": [
            { "id": "b1", "userId": USER, "category": "Food", "amount": 100,
              "startDate": "2025-01-01T00:00:00Z", "endDate": "2025-01-31T23:59:59Z",
              "alertThreshold": 80 }
        ],
        "categories": [
            { "id": "c1", "userId": USER, "name": "Pets", "parentCategory": "Expenses" }
        ]
    })
}

pub fn write_export(value: &Value) -> PathBuf {
    let path = temp_dir().join("export.json");
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}
