use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid role assignment: column `{column}` ({role}) is not part of the data schema")]
    InvalidRoleAssignment { column: String, role: String },

    #[error("malformed partial update: {0}")]
    MalformedPartialUpdate(String),

    #[error("unparseable numeric input for `{field}`: {input:?}")]
    UnparseableNumericInput { field: String, input: String },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl ConfigError {
    /// Returns `true` for errors that reject a whole edit.
    ///
    /// Numeric input problems are resolved locally (the field falls back to
    /// auto) and never reject an edit.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::UnparseableNumericInput { .. })
    }
}
