//! Boundary parsing for loosely-typed act documents.
//!
//! Act documents come straight from the marketplace store, so flags can be
//! `"yes"` or `1` and fees can be `"£1,200"`. Everything is coerced here,
//! once, so the pricing code only ever sees `bool` and `Decimal`.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde_json::Value;

/// Interpret a JSON value as a boolean flag.
///
/// Accepts `true`, `1`, and the strings `"true"`, `"1"`, `"yes"`, `"on"`
/// (case-insensitive, trimmed). Everything else, including `null`, is false.
pub fn parse_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f == 1.0).unwrap_or(false),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
        _ => false,
    }
}

/// Same as [`parse_truthy`] for an optional field.
pub fn truthy_field(value: Option<&Value>) -> bool {
    value.map(parse_truthy).unwrap_or(false)
}

/// Parse a JSON number or numeric string into a `Decimal`.
///
/// Strings may carry a leading `£` and `,` thousands separators.
/// Returns `None` for anything that isn't a finite number.
pub fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            // The textual form keeps integers and short decimals exact.
            Decimal::from_str(&n.to_string())
                .ok()
                .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok()))
        }
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .trim_start_matches('£')
                .chars()
                .filter(|c| *c != ',')
                .collect();
            let cleaned = cleaned.trim();
            if cleaned.is_empty() {
                return None;
            }
            Decimal::from_str(cleaned)
                .or_else(|_| Decimal::from_scientific(cleaned))
                .ok()
        }
        _ => None,
    }
}

/// Numeric field with a zero fallback.
pub fn decimal_or_zero(value: Option<&Value>) -> Decimal {
    value.and_then(parse_decimal).unwrap_or(Decimal::ZERO)
}

/// Trimmed, non-empty string field.
pub fn string_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Document id as stored by the marketplace: a plain string or `{"$oid": "..."}`.
pub fn document_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Object(map) => string_field(map.get("$oid")),
        other => string_field(Some(other)),
    }
}

/// Event date from `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            raw.get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}
