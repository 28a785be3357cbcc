use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use serde_json::Value;

use super::ColumnType;

/// One cell of a query result row.
///
/// Values are hashable so distinct-value sets can be built directly from rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(OrderedFloat<f64>),
    Decimal(Decimal),
    Text(String),
    DateTime(DateTime<Utc>),
}

impl Scalar {
    /// Canonical string used as a series or value key.
    ///
    /// Integral numbers print without a fraction, decimals are normalized and
    /// datetimes use RFC 3339 with a `Z` suffix.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Null => "null".to_owned(),
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => number_key(value.into_inner()),
            Self::Decimal(value) => value.normalize().to_string(),
            Self::Text(value) => value.clone(),
            Self::DateTime(value) => value.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Converts a raw JSON cell, using the column type to recover datetimes and
    /// exact decimals that drivers deliver as strings.
    #[must_use]
    pub fn from_json(value: &Value, column_type: ColumnType) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(value) => Self::Bool(*value),
            Value::Number(number) => number
                .as_f64()
                .map_or_else(|| Self::Text(number.to_string()), Self::from),
            Value::String(text) => Self::from_text(text, column_type),
            Value::Array(_) | Value::Object(_) => Self::Text(value.to_string()),
        }
    }

    fn from_text(text: &str, column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Date | ColumnType::Datetime => {
                parse_datetime(text).map_or_else(|| Self::Text(text.to_owned()), Self::DateTime)
            }
            ColumnType::Integer | ColumnType::Float => Decimal::from_str(text.trim())
                .map_or_else(|_| Self::Text(text.to_owned()), Self::Decimal),
            _ => Self::Text(text.to_owned()),
        }
    }
}

fn number_key(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    if value.is_infinite() {
        let key = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return key.to_owned();
    }
    value.to_string()
}

fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Number(OrderedFloat(value))
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Decimal(Decimal::from(value))
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Decimal> for Scalar {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}
