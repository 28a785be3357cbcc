use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::ConfigError;

/// Raw numeric input collected from an editor field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Input that resets the field to auto.
    #[must_use]
    pub fn cleared() -> Self {
        Self::Text(String::new())
    }

    /// Resolves the input to a finite number.
    ///
    /// Empty input clears the field without a notice; anything unparseable
    /// clears it and reports `UnparseableNumericInput`.
    pub fn resolve(&self, field: &str) -> (Option<f64>, Option<ConfigError>) {
        match self {
            Self::Number(value) if value.is_finite() => (Some(*value), None),
            Self::Number(value) => (None, Some(unparseable(field, value.to_string()))),
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return (None, None);
                }
                match trimmed.parse::<f64>() {
                    Ok(value) if value.is_finite() => (Some(value), None),
                    _ => (None, Some(unparseable(field, text.clone()))),
                }
            }
        }
    }

    /// Resolves the input to a non-negative whole count such as a label length.
    pub fn resolve_count(&self, field: &str) -> (Option<u32>, Option<ConfigError>) {
        let (value, notice) = self.resolve(field);
        match value {
            None => (None, notice),
            Some(value) if value >= 0.0 && value <= f64::from(u32::MAX) => {
                (Some(value.trunc() as u32), None)
            }
            Some(value) => (None, Some(unparseable(field, value.to_string()))),
        }
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

fn unparseable(field: &str, input: String) -> ConfigError {
    warn!(field, input = %input, "numeric input not parseable, falling back to auto");
    ConfigError::UnparseableNumericInput {
        field: field.to_owned(),
        input,
    }
}

/// Reads a stored number that older payloads may hold as a string or null.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        Value::Number(number) => number.as_f64().filter(|value| value.is_finite()),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }))
}

pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_f64(deserializer)?
        .filter(|value| *value >= 0.0 && *value <= f64::from(u32::MAX))
        .map(|value| value.trunc() as u32))
}
