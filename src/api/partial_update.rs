use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{AxisIndex, ChartFamily};
use crate::error::{ConfigError, ConfigResult};

use super::{
    AxisPatch, LegendOptions, NumericInput, RoleAssignment, SeriesDefaults, SeriesOptionsPatch,
    ValueOptionsPatch,
};

/// One edit to a [`ChartConfiguration`](super::ChartConfiguration).
///
/// Every present field replaces the stored one, except `column_mapping`
/// (applied through the role map), `x_axis`/`y_axis` (merged into the axis
/// records) and the per-entity option maps (patched per key). Keys this type
/// does not know land in `extra` and are stored verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_series_type: Option<ChartFamily>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_mapping: Option<RoleAssignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_options: Option<IndexMap<String, SeriesOptionsPatch>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_options: Option<IndexMap<String, ValueOptionsPatch>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_list: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<AxisPatch>,
    /// Two slots, one per Y axis; `null` leaves that axis untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<Vec<Option<AxisPatch>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<SeriesDefaults>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_data_labels: Option<bool>,
    #[serde(rename = "showpoints", default, skip_serializing_if = "Option::is_none")]
    pub show_points: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_x: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_x: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_y: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_y: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis_label_length: Option<NumericInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time_format: Option<String>,
    #[serde(
        rename = "dateTImeFormat",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub legacy_date_time_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_min_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_max_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_console_logs: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_redraw: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PartialUpdate {
    /// Parses an edit payload. Anything but a well-shaped JSON object is a
    /// `MalformedPartialUpdate`.
    pub fn from_json_value(value: &Value) -> ConfigResult<Self> {
        if !value.is_object() {
            return Err(ConfigError::MalformedPartialUpdate(
                "edit payload must be a JSON object".to_owned(),
            ));
        }
        let partial: Self = serde_json::from_value(value.clone())
            .map_err(|e| ConfigError::MalformedPartialUpdate(e.to_string()))?;
        partial.validate_shape()?;
        Ok(partial)
    }

    pub fn from_json_str(input: &str) -> ConfigResult<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| ConfigError::MalformedPartialUpdate(e.to_string()))?;
        Self::from_json_value(&value)
    }

    /// Checks constraints serde cannot express.
    pub fn validate_shape(&self) -> ConfigResult<()> {
        if let Some(slots) = &self.y_axis {
            if slots.len() != 2 {
                return Err(ConfigError::MalformedPartialUpdate(format!(
                    "yAxis update must have exactly 2 slots, got {}",
                    slots.len()
                )));
            }
        }
        if let Some(list) = &self.series_list {
            let unique: IndexSet<&String> = list.iter().collect();
            if unique.len() != list.len() {
                return Err(ConfigError::MalformedPartialUpdate(
                    "seriesList must not repeat a series".to_owned(),
                ));
            }
        }
        Ok(())
    }

    /// Whether the edit changes the role map.
    #[must_use]
    pub fn touches_roles(&self) -> bool {
        self.column_mapping.is_some()
    }

    /// Edit that only updates one Y axis.
    #[must_use]
    pub fn y_axis(index: AxisIndex, patch: AxisPatch) -> Self {
        let mut slots = vec![None, None];
        slots[index.as_usize()] = Some(patch);
        Self {
            y_axis: Some(slots),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn roles(assignment: RoleAssignment) -> Self {
        Self {
            column_mapping: Some(assignment),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn family(family: ChartFamily) -> Self {
        Self {
            global_series_type: Some(family),
            ..Self::default()
        }
    }
}
