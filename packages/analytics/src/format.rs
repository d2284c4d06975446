//! Result formatting for the HTTP layer.
//!
//! Converts typed result rows into flat JSON records and wraps them under
//! the key of the query that produced them. Field names, field order and
//! scalar types pass through unchanged; nested values are rejected.

use incident_stats_analytics_models::QueryKind;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::AnalyticsError;

/// A flat record: field name to scalar value, in declaration order.
pub type Record = Map<String, Value>;

/// Converts result rows into flat records.
///
/// # Errors
///
/// Returns [`AnalyticsError::Format`] if a row does not serialize to a JSON
/// object, or if any field holds an array or object.
pub fn to_records<T: Serialize>(rows: &[T]) -> Result<Vec<Record>, AnalyticsError> {
    rows.iter().map(to_record).collect()
}

fn to_record<T: Serialize>(row: &T) -> Result<Record, AnalyticsError> {
    let value = serde_json::to_value(row).map_err(|e| AnalyticsError::Format {
        message: e.to_string(),
    })?;

    let Value::Object(record) = value else {
        return Err(AnalyticsError::Format {
            message: format!("expected an object row, got {value}"),
        });
    };

    if let Some((field, _)) = record
        .iter()
        .find(|(_, v)| matches!(v, Value::Array(_) | Value::Object(_)))
    {
        return Err(AnalyticsError::Format {
            message: format!("field '{field}' is not a scalar"),
        });
    }

    Ok(record)
}

/// Formats `rows` and wraps them as `{"<result key>": [...]}`.
///
/// # Errors
///
/// Returns [`AnalyticsError::Format`] under the same conditions as
/// [`to_records`].
pub fn to_response<T: Serialize>(kind: QueryKind, rows: &[T]) -> Result<Value, AnalyticsError> {
    let records = to_records(rows)?;

    let mut body = Map::new();
    body.insert(
        kind.result_key().to_string(),
        Value::Array(records.into_iter().map(Value::Object).collect()),
    );

    log::debug!("Formatted {} rows for {kind}", rows.len());

    Ok(Value::Object(body))
}
