use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, ConfigResult};

use super::Scalar;

/// Column type reported by the query-execution collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    String,
    Integer,
    #[serde(alias = "number")]
    Float,
    Boolean,
    Date,
    Datetime,
    #[serde(other)]
    Other,
}

impl ColumnType {
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    #[must_use]
    pub fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::Datetime)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
}

impl ColumnSchema {
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

pub type Row = IndexMap<String, Scalar>;

/// Read-only query result the engine derives series and values from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataSnapshot {
    columns: Vec<ColumnSchema>,
    rows: Vec<Row>,
}

impl DataSnapshot {
    #[must_use]
    pub fn new(columns: Vec<ColumnSchema>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Builds a snapshot from JSON object rows, coercing cells by column type.
    ///
    /// Cells for columns missing from the schema are kept as plain text or
    /// numbers.
    pub fn from_json_rows(columns: Vec<ColumnSchema>, rows: &[Value]) -> ConfigResult<Self> {
        let types: IndexMap<&str, ColumnType> = columns
            .iter()
            .map(|column| (column.name.as_str(), column.column_type))
            .collect();

        let mut parsed = Vec::with_capacity(rows.len());
        for (position, row) in rows.iter().enumerate() {
            let Value::Object(cells) = row else {
                return Err(ConfigError::InvalidData(format!(
                    "row {position} must be a JSON object"
                )));
            };
            let row = cells
                .iter()
                .map(|(name, cell)| {
                    let column_type = types.get(name.as_str()).copied().unwrap_or_default();
                    (name.clone(), Scalar::from_json(cell, column_type))
                })
                .collect();
            parsed.push(row);
        }

        Ok(Self::new(columns, parsed))
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|column| column.name == name)
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Distinct cell values of `column` in first-seen order. Missing cells count as null.
    #[must_use]
    pub fn distinct_values(&self, column: &str) -> IndexSet<Scalar> {
        self.rows
            .iter()
            .map(|row| row.get(column).cloned().unwrap_or(Scalar::Null))
            .collect()
    }

    /// Distinct canonical keys of `column` in first-seen order.
    ///
    /// Different scalars sharing a key (`1.0` and decimal `1`) collapse into one.
    #[must_use]
    pub fn distinct_keys(&self, column: &str) -> Vec<String> {
        let keys: IndexSet<String> = self
            .distinct_values(column)
            .iter()
            .map(Scalar::key)
            .collect();
        keys.into_iter().collect()
    }
}
