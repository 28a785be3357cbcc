use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{ChartFamily, FamilyAffordances};

use super::numeric_input::lenient_u32;
use super::series_registry::order_series_keys;
use super::{AxisRecord, RoleMap, SeriesOptions, ValueOptions, YAxes};

/// How series are stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stacking {
    #[serde(alias = "normal")]
    Stack,
    Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendOptions {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            extra: Map::new(),
        }
    }
}

/// Settings shared by every series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDefaults {
    #[serde(default)]
    pub stacking: Option<Stacking>,
    #[serde(default)]
    pub percent_values: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Persisted chart configuration: one immutable snapshot.
///
/// The shape is flat. Which fields are meaningful depends on
/// `global_series_type`, see [`FamilyAffordances`]:
/// - `series.stacking` only for line/area/column, `series.percent_values` likewise
/// - `show_points` only for box
/// - `color_scheme`, `heat_min_color`, `heat_max_color` only for heatmap
/// - `custom_code`, `enable_console_logs`, `auto_redraw` only for custom
/// - `values_options` only for pie; `series_options` for every other family
/// - axes, sorting and label settings for every family but custom
///
/// Fields meaningless for the current family are kept latent, never cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfiguration {
    #[serde(default)]
    pub global_series_type: ChartFamily,
    #[serde(default)]
    pub column_mapping: RoleMap,
    #[serde(default)]
    pub series_options: IndexMap<String, Arc<SeriesOptions>>,
    #[serde(default)]
    pub values_options: IndexMap<String, Arc<ValueOptions>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_list: Option<Vec<String>>,
    #[serde(default = "default_x_axis")]
    pub x_axis: Arc<AxisRecord>,
    #[serde(default)]
    pub y_axis: YAxes,
    #[serde(default)]
    pub legend: LegendOptions,
    #[serde(default)]
    pub series: SeriesDefaults,
    #[serde(default)]
    pub show_data_labels: bool,
    #[serde(rename = "showpoints", default)]
    pub show_points: bool,
    #[serde(default = "default_true")]
    pub sort_x: bool,
    #[serde(default)]
    pub reverse_x: bool,
    #[serde(default)]
    pub sort_y: bool,
    #[serde(default)]
    pub reverse_y: bool,
    #[serde(
        default,
        deserialize_with = "lenient_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub x_axis_label_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time_format: Option<String>,
    /// Key written by older editors. Kept verbatim; `date_time_format` wins
    /// when both are present, see [`ChartConfiguration::effective_date_time_format`].
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
    #[serde(default)]
    pub enable_console_logs: bool,
    #[serde(default)]
    pub auto_redraw: bool,
    /// Fields this engine does not interpret, kept for lossless round trips.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ChartConfiguration {
    fn default() -> Self {
        Self {
            global_series_type: ChartFamily::default(),
            column_mapping: RoleMap::default(),
            series_options: IndexMap::new(),
            values_options: IndexMap::new(),
            series_list: None,
            x_axis: default_x_axis(),
            y_axis: YAxes::default(),
            legend: LegendOptions::default(),
            series: SeriesDefaults::default(),
            show_data_labels: false,
            show_points: false,
            sort_x: true,
            reverse_x: false,
            sort_y: false,
            reverse_y: false,
            x_axis_label_length: None,
            number_format: None,
            percent_format: None,
            date_time_format: None,
            legacy_date_time_format: None,
            text_format: None,
            color_scheme: None,
            heat_min_color: None,
            heat_max_color: None,
            custom_code: None,
            enable_console_logs: false,
            auto_redraw: false,
            extra: Map::new(),
        }
    }
}

impl ChartConfiguration {
    /// Empty configuration for `family`.
    #[must_use]
    pub fn for_family(family: ChartFamily) -> Self {
        Self {
            show_data_labels: family.is_single_dimension(),
            global_series_type: family,
            ..Self::default()
        }
    }

    /// Editor affordances for the current family, widened by per-series
    /// family overrides (a bubble series shows the size column).
    #[must_use]
    pub fn affordances(&self) -> FamilyAffordances {
        FamilyAffordances::for_family(&self.global_series_type)
            .with_series_families(self.series_options.values().map(|options| &options.family))
    }

    /// Series keys in display order.
    #[must_use]
    pub fn series_display_order(&self) -> Vec<String> {
        order_series_keys(&self.series_options, self.series_list.as_deref())
    }

    /// Value keys sorted for display.
    #[must_use]
    pub fn value_display_order(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values_options.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Datetime format to render with: the current key, else the legacy one.
    #[must_use]
    pub fn effective_date_time_format(&self) -> Option<&str> {
        self.date_time_format
            .as_deref()
            .or(self.legacy_date_time_format.as_deref())
    }

    /// Stored custom code, or `template` when none was written yet.
    #[must_use]
    pub fn effective_custom_code<'a>(&'a self, template: &'a str) -> &'a str {
        self.custom_code.as_deref().unwrap_or(template)
    }

    /// Whether any series overrides its family to `family`.
    #[must_use]
    pub fn uses_series_family(&self, family: &ChartFamily) -> bool {
        self.series_options
            .values()
            .any(|options| options.family == *family)
    }
}

fn default_x_axis() -> Arc<AxisRecord> {
    Arc::new(AxisRecord::x_default())
}

fn default_true() -> bool {
    true
}
