use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Code shown for the custom family before the user writes any.
pub const DEFAULT_CUSTOM_CODE: &str = "// Available variables are x, ys, element, and Plotly
// Type console.log(x, ys); for more info about x and ys
// To plot your graph call Plotly.plot(element, ...)
// Plotly examples and docs: https://plot.ly/javascript/";

/// Engine tuning.
///
/// Serializable so hosts can keep it next to their own settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub custom_code_template: String,
    /// Cap on distinct group/category values per reconcile; `None` keeps all.
    pub max_category_values: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            custom_code_template: DEFAULT_CUSTOM_CODE.to_owned(),
            max_category_values: None,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_custom_code_template(mut self, template: impl Into<String>) -> Self {
        self.custom_code_template = template.into();
        self
    }

    #[must_use]
    pub fn with_max_category_values(mut self, limit: Option<usize>) -> Self {
        self.max_category_values = limit;
        self
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ConfigResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ConfigError::InvalidData(format!("failed to parse config: {e}")))
    }
}
