use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{Budget, DateRange, Transaction};

mod chart_service_tests;

const USER: &str = "user-1";

fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn txn(amount: f64, category: &str, date: DateTime<Utc>) -> Transaction {
    Transaction::new(USER, amount, category, format!("{category} entry"), date)
}

fn undated(amount: f64, category: &str) -> Transaction {
    let mut txn = Transaction::new(USER, amount, category, "undated", ts(2025, 1, 1));
    txn.date = None;
    txn
}

fn january_budget(category: &str, amount: f64) -> Budget {
    let period = DateRange::new(ts(2025, 1, 1), ts(2025, 1, 31)).unwrap();
    Budget::new(USER, category, amount, period)
}
