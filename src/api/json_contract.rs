use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

use super::ChartConfiguration;

pub const CHART_CONFIGURATION_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfigurationJsonContractV1 {
    pub schema_version: u32,
    pub options: ChartConfiguration,
}

/// Borrowing twin of the contract, avoids cloning on serialize.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContractV1Ref<'a> {
    schema_version: u32,
    options: &'a ChartConfiguration,
}

impl ChartConfiguration {
    pub fn to_json_pretty(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ConfigError::InvalidData(format!("failed to serialize chart configuration: {e}"))
        })
    }

    pub fn to_json_value(&self) -> ConfigResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| {
            ConfigError::InvalidData(format!("failed to serialize chart configuration: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> ConfigResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ConfigError::InvalidData(format!("failed to parse chart configuration: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> ConfigResult<String> {
        let payload = ContractV1Ref {
            schema_version: CHART_CONFIGURATION_JSON_SCHEMA_V1,
            options: self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ConfigError::InvalidData(format!(
                "failed to serialize chart configuration contract v1: {e}"
            ))
        })
    }

    /// Accepts either a bare configuration object or the versioned envelope.
    pub fn from_json_compat_str(input: &str) -> ConfigResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            ConfigError::InvalidData(format!("failed to parse chart configuration json: {e}"))
        })?;
        let Some(version) = value.get("schemaVersion").cloned() else {
            return serde_json::from_value(value).map_err(|e| {
                ConfigError::InvalidData(format!("failed to parse chart configuration: {e}"))
            });
        };
        if version.as_u64() != Some(u64::from(CHART_CONFIGURATION_JSON_SCHEMA_V1)) {
            return Err(ConfigError::InvalidData(format!(
                "unsupported chart configuration schema version: {version}"
            )));
        }

        let payload: ChartConfigurationJsonContractV1 =
            serde_json::from_value(value).map_err(|e| {
                ConfigError::InvalidData(format!(
                    "failed to parse chart configuration contract payload: {e}"
                ))
            })?;
        Ok(payload.options)
    }
}
