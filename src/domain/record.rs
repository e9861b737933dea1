//! Maps loosely typed backend documents into typed records.
//!
//! Documents use the backend's camelCase field names. Required fields that are
//! missing reject the whole document; unreadable dates are kept as `None` so the
//! calculators can skip them.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use super::budget::{Budget, DEFAULT_ALERT_THRESHOLD};
use super::category::{Category, CategoryGroup};
use super::transaction::Transaction;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("document is not a JSON object")]
    NotAnObject,
    #[error("document `{id}` is missing required field `{field}`")]
    MissingField { id: String, field: &'static str },
    #[error("document `{id}` has an invalid `{field}` value")]
    InvalidField { id: String, field: &'static str },
}

/// Reads a backend timestamp.
///
/// Accepts `{seconds, nanoseconds}` objects (with or without leading underscores),
/// RFC 3339 strings, `YYYY-MM-DD` strings (midnight UTC) and epoch milliseconds.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))?
                .as_i64()?;
            let nanos = map
                .get("nanoseconds")
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            let nanos = u32::try_from(nanos).ok()?;
            Utc.timestamp_opt(seconds, nanos).single()
        }
        Value::String(raw) => {
            let raw = raw.trim();
            if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
                return Some(parsed.with_timezone(&Utc));
            }
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive))
        }
        Value::Number(number) => number
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

pub fn transaction_from_document(doc: &Value) -> Result<Transaction, RecordError> {
    let map = doc.as_object().ok_or(RecordError::NotAnObject)?;
    let id = document_id(map)?;
    let amount = required_number(map, &id, "amount")?;
    let user_id = optional_str(map, "userId").unwrap_or_default();

    Ok(Transaction {
        user_id,
        amount,
        category: optional_str(map, "category").unwrap_or_default(),
        description: optional_str(map, "description").unwrap_or_default(),
        date: timestamp_field(map, &id, "date"),
        notes: optional_str(map, "notes").filter(|notes| !notes.is_empty()),
        is_deleted: map
            .get("isDeleted")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        deleted_at: timestamp_field(map, &id, "deletedAt"),
        id,
    })
}

pub fn budget_from_document(doc: &Value) -> Result<Budget, RecordError> {
    let map = doc.as_object().ok_or(RecordError::NotAnObject)?;
    let id = document_id(map)?;
    let category = optional_str(map, "category")
        .filter(|category| !category.is_empty())
        .ok_or_else(|| RecordError::MissingField {
            id: id.clone(),
            field: "category",
        })?;
    let amount = required_number(map, &id, "amount")?;
    let alert_threshold = map
        .get("alertThreshold")
        .and_then(number_value)
        .map(|threshold| threshold.clamp(0.0, 100.0))
        .unwrap_or(DEFAULT_ALERT_THRESHOLD);

    Ok(Budget {
        user_id: optional_str(map, "userId").unwrap_or_default(),
        category,
        amount,
        start_date: timestamp_field(map, &id, "startDate"),
        end_date: timestamp_field(map, &id, "endDate"),
        alert_threshold,
        created_at: timestamp_field(map, &id, "createdAt"),
        id,
    })
}

pub fn category_from_document(doc: &Value) -> Result<Category, RecordError> {
    let map = doc.as_object().ok_or(RecordError::NotAnObject)?;
    let id = document_id(map)?;
    let name = optional_str(map, "name")
        .filter(|name| !name.is_empty())
        .ok_or_else(|| RecordError::MissingField {
            id: id.clone(),
            field: "name",
        })?;
    let parent = optional_str(map, "parentCategory")
        .as_deref()
        .and_then(CategoryGroup::parse)
        .unwrap_or(CategoryGroup::Expenses);
    let keywords = map
        .get("keywords")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(Category {
        user_id: optional_str(map, "userId"),
        name,
        parent,
        color: optional_str(map, "color").unwrap_or_else(|| "#636E72".into()),
        icon: optional_str(map, "icon").unwrap_or_else(|| "pricetag".into()),
        keywords,
        is_default: map
            .get("isDefault")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        id,
    })
}

/// Maps every readable transaction document, skipping the rest with a warning.
pub fn transactions_from_documents(docs: &[Value]) -> Vec<Transaction> {
    map_documents(docs, "transaction", transaction_from_document)
}

pub fn budgets_from_documents(docs: &[Value]) -> Vec<Budget> {
    map_documents(docs, "budget", budget_from_document)
}

pub fn categories_from_documents(docs: &[Value]) -> Vec<Category> {
    map_documents(docs, "category", category_from_document)
}

fn map_documents<T>(
    docs: &[Value],
    kind: &str,
    convert: fn(&Value) -> Result<T, RecordError>,
) -> Vec<T> {
    docs.iter()
        .filter_map(|doc| match convert(doc) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(kind, error = %err, "skipping unreadable document");
                None
            }
        })
        .collect()
}

fn document_id(map: &Map<String, Value>) -> Result<String, RecordError> {
    match map.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(RecordError::MissingField {
            id: "<unknown>".into(),
            field: "id",
        }),
    }
}

fn optional_str(map: &Map<String, Value>, field: &str) -> Option<String> {
    map.get(field).and_then(Value::as_str).map(str::to_string)
}

fn number_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|number| number.is_finite())
}

fn required_number(
    map: &Map<String, Value>,
    id: &str,
    field: &'static str,
) -> Result<f64, RecordError> {
    let value = map.get(field).ok_or_else(|| RecordError::MissingField {
        id: id.to_string(),
        field,
    })?;
    number_value(value).ok_or_else(|| RecordError::InvalidField {
        id: id.to_string(),
        field,
    })
}

fn timestamp_field(map: &Map<String, Value>, id: &str, field: &str) -> Option<DateTime<Utc>> {
    let value = map.get(field).filter(|value| !value.is_null())?;
    let parsed = parse_timestamp(value);
    if parsed.is_none() {
        warn!(document = id, field, "unreadable timestamp; treating as missing");
    }
    parsed
}
