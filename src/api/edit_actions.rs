use indexmap::IndexMap;

use crate::core::{AxisIndex, ChartFamily, ColumnRole};

use super::{
    AxisLabels, AxisPatch, AxisScale, AxisTitle, ChartConfiguration, LegendOptions, NumericInput,
    PartialUpdate, SeriesDefaults, SeriesOptionsPatch, Stacking, ValueOptionsPatch,
};

/// One user edit coming from the configuration editor.
///
/// Every action lowers to a [`PartialUpdate`] against the snapshot it was
/// issued for, see [`EditAction::to_partial`].
#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    SetGlobalFamily(ChartFamily),
    SetXColumn(Option<String>),
    /// Replaces the y set; retained members keep their relative order.
    SetYColumns(Vec<String>),
    SetGroupbyColumn(Option<String>),
    SetSizeColumn(Option<String>),
    SetErrorColumn(Option<String>),
    SetZValueColumn(Option<String>),
    SetLegendEnabled(bool),
    SetStacking(Option<Stacking>),
    SetPercentValues(bool),
    SetShowPoints(bool),
    SetShowDataLabels(bool),
    SetSortX(bool),
    SetReverseX(bool),
    SetSortY(bool),
    SetReverseY(bool),
    SetXLabelsEnabled(bool),
    SetXAxisLabelLength(NumericInput),
    SetXAxisScale(AxisScale),
    SetXAxisTitle(String),
    SetYAxisScale {
        index: AxisIndex,
        scale: AxisScale,
    },
    SetYAxisTitle {
        index: AxisIndex,
        title: String,
    },
    SetYAxisRangeMin {
        index: AxisIndex,
        input: NumericInput,
    },
    SetYAxisRangeMax {
        index: AxisIndex,
        input: NumericInput,
    },
    /// Explicit display order; an empty list falls back to `zIndex` order.
    SetSeriesOrder(Vec<String>),
    PatchSeries {
        key: String,
        patch: SeriesOptionsPatch,
    },
    PatchValue {
        key: String,
        patch: ValueOptionsPatch,
    },
    SetNumberFormat(String),
    SetPercentFormat(String),
    SetDateTimeFormat(String),
    SetTextFormat(String),
    SetColorScheme(String),
    SetHeatMinColor(String),
    SetHeatMaxColor(String),
    SetCustomCode(String),
    SetConsoleLogs(bool),
    SetAutoRedraw(bool),
}

impl EditAction {
    /// Lowers the action into the partial update it stands for.
    ///
    /// `current` supplies the sub-records that partial updates replace
    /// wholesale (legend, series defaults, axis title and labels), so their
    /// untouched fields survive.
    #[must_use]
    pub fn to_partial(&self, current: &ChartConfiguration) -> PartialUpdate {
        let roles = &current.column_mapping;
        match self {
            Self::SetGlobalFamily(family) => PartialUpdate::family(family.clone()),
            Self::SetXColumn(column) => PartialUpdate::roles(
                roles.single_role_assignment(ColumnRole::X, column.as_deref()),
            ),
            Self::SetYColumns(columns) => PartialUpdate::roles(roles.y_assignment(columns)),
            Self::SetGroupbyColumn(column) => PartialUpdate::roles(
                roles.single_role_assignment(ColumnRole::Groupby, column.as_deref()),
            ),
            Self::SetSizeColumn(column) => PartialUpdate::roles(
                roles.single_role_assignment(ColumnRole::Size, column.as_deref()),
            ),
            Self::SetErrorColumn(column) => PartialUpdate::roles(
                roles.single_role_assignment(ColumnRole::Error, column.as_deref()),
            ),
            Self::SetZValueColumn(column) => PartialUpdate::roles(
                roles.single_role_assignment(ColumnRole::ZValue, column.as_deref()),
            ),
            Self::SetLegendEnabled(enabled) => PartialUpdate {
                legend: Some(LegendOptions {
                    enabled: *enabled,
                    ..current.legend.clone()
                }),
                ..PartialUpdate::default()
            },
            Self::SetStacking(stacking) => PartialUpdate {
                series: Some(SeriesDefaults {
                    stacking: *stacking,
                    ..current.series.clone()
                }),
                ..PartialUpdate::default()
            },
            Self::SetPercentValues(percent_values) => PartialUpdate {
                series: Some(SeriesDefaults {
                    percent_values: *percent_values,
                    ..current.series.clone()
                }),
                ..PartialUpdate::default()
            },
            Self::SetShowPoints(value) => PartialUpdate {
                show_points: Some(*value),
                ..PartialUpdate::default()
            },
            Self::SetShowDataLabels(value) => PartialUpdate {
                show_data_labels: Some(*value),
                ..PartialUpdate::default()
            },
            Self::SetSortX(value) => PartialUpdate {
                sort_x: Some(*value),
                ..PartialUpdate::default()
            },
            Self::SetReverseX(value) => PartialUpdate {
                reverse_x: Some(*value),
                ..PartialUpdate::default()
            },
            Self::SetSortY(value) => PartialUpdate {
                sort_y: Some(*value),
                ..PartialUpdate::default()
            },
            Self::SetReverseY(value) => PartialUpdate {
                reverse_y: Some(*value),
                ..PartialUpdate::default()
            },
            Self::SetXLabelsEnabled(enabled) => x_axis(AxisPatch {
                labels: Some(AxisLabels {
                    enabled: *enabled,
                    ..current.x_axis.labels.clone()
                }),
                ..AxisPatch::default()
            }),
            Self::SetXAxisLabelLength(input) => PartialUpdate {
                x_axis_label_length: Some(input.clone()),
                ..PartialUpdate::default()
            },
            Self::SetXAxisScale(scale) => x_axis(AxisPatch::scale(*scale)),
            Self::SetXAxisTitle(text) => x_axis(AxisPatch {
                title: Some(retitled(&current.x_axis.title, text)),
                ..AxisPatch::default()
            }),
            Self::SetYAxisScale { index, scale } => {
                PartialUpdate::y_axis(*index, AxisPatch::scale(*scale))
            }
            Self::SetYAxisTitle { index, title } => PartialUpdate::y_axis(
                *index,
                AxisPatch {
                    title: Some(retitled(&current.y_axis.get(*index).title, title)),
                    ..AxisPatch::default()
                },
            ),
            Self::SetYAxisRangeMin { index, input } => {
                PartialUpdate::y_axis(*index, AxisPatch::range_min(input.clone()))
            }
            Self::SetYAxisRangeMax { index, input } => {
                PartialUpdate::y_axis(*index, AxisPatch::range_max(input.clone()))
            }
            Self::SetSeriesOrder(keys) => PartialUpdate {
                series_list: Some(keys.clone()),
                ..PartialUpdate::default()
            },
            Self::PatchSeries { key, patch } => PartialUpdate {
                series_options: Some(IndexMap::from([(key.clone(), patch.clone())])),
                ..PartialUpdate::default()
            },
            Self::PatchValue { key, patch } => PartialUpdate {
                values_options: Some(IndexMap::from([(key.clone(), patch.clone())])),
                ..PartialUpdate::default()
            },
            Self::SetNumberFormat(format) => PartialUpdate {
                number_format: Some(format.clone()),
                ..PartialUpdate::default()
            },
            Self::SetPercentFormat(format) => PartialUpdate {
                percent_format: Some(format.clone()),
                ..PartialUpdate::default()
            },
            Self::SetDateTimeFormat(format) => PartialUpdate {
                date_time_format: Some(format.clone()),
                ..PartialUpdate::default()
            },
            Self::SetTextFormat(format) => PartialUpdate {
                text_format: Some(format.clone()),
                ..PartialUpdate::default()
            },
            Self::SetColorScheme(scheme) => PartialUpdate {
                color_scheme: Some(scheme.clone()),
                ..PartialUpdate::default()
            },
            Self::SetHeatMinColor(color) => PartialUpdate {
                heat_min_color: Some(color.clone()),
                ..PartialUpdate::default()
            },
            Self::SetHeatMaxColor(color) => PartialUpdate {
                heat_max_color: Some(color.clone()),
                ..PartialUpdate::default()
            },
            Self::SetCustomCode(code) => PartialUpdate {
                custom_code: Some(code.clone()),
                ..PartialUpdate::default()
            },
            Self::SetConsoleLogs(value) => PartialUpdate {
                enable_console_logs: Some(*value),
                ..PartialUpdate::default()
            },
            Self::SetAutoRedraw(value) => PartialUpdate {
                auto_redraw: Some(*value),
                ..PartialUpdate::default()
            },
        }
    }
}

fn x_axis(patch: AxisPatch) -> PartialUpdate {
    PartialUpdate {
        x_axis: Some(patch),
        ..PartialUpdate::default()
    }
}

fn retitled(current: &AxisTitle, text: &str) -> AxisTitle {
    AxisTitle {
        text: (!text.is_empty()).then(|| text.to_owned()),
        ..current.clone()
    }
}
