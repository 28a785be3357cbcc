use std::sync::Arc;

use crate::api::{
    AxisRecord, ChartConfiguration, SeriesOptions, SeriesRegistry, ValueOptions, ValuesRegistry,
    YAxes,
};
use crate::core::{ChartFamily, DataSnapshot, FamilyAffordances};
use crate::error::{ConfigError, ConfigResult};

#[derive(Debug, Clone, PartialEq)]
pub struct FrameSeries {
    pub key: String,
    pub options: Arc<SeriesOptions>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameValue {
    pub key: String,
    pub options: Arc<ValueOptions>,
}

/// Columns resolved for each role.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameColumns {
    pub x: Option<String>,
    pub y: Vec<String>,
    pub groupby: Option<String>,
    pub size: Option<String>,
    pub error: Option<String>,
    pub z_value: Option<String>,
}

/// Everything a renderer needs from one configuration snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub family: ChartFamily,
    pub affordances: FamilyAffordances,
    pub columns: FrameColumns,
    /// Series in display order.
    pub series: Vec<FrameSeries>,
    /// Category values in display order; only filled for single-dimension families.
    pub values: Vec<FrameValue>,
    pub x_axis: Arc<AxisRecord>,
    pub y_axis: YAxes,
}

impl RenderFrame {
    pub fn build(config: &ChartConfiguration, data: &DataSnapshot) -> ConfigResult<Self> {
        Self::build_capped(config, data, None)
    }

    /// Same as [`RenderFrame::build`] with the distinct-value cap the
    /// configuration was reconciled with.
    pub fn build_capped(
        config: &ChartConfiguration,
        data: &DataSnapshot,
        max_category_values: Option<usize>,
    ) -> ConfigResult<Self> {
        let roles = &config.column_mapping;
        if let Some(column) = roles.dangling_columns(data).first() {
            return Err(ConfigError::InvalidData(format!(
                "role column `{column}` is not part of the data"
            )));
        }

        let family = config.global_series_type.clone();
        let candidates = SeriesRegistry::new(data)
            .with_max_category_values(max_category_values)
            .candidate_keys(roles, &family);
        if let Some(key) = candidates
            .iter()
            .find(|key| !config.series_options.contains_key(*key))
        {
            return Err(ConfigError::InvalidData(format!(
                "series `{key}` has no options"
            )));
        }
        let series = config
            .series_display_order()
            .into_iter()
            .filter_map(|key| {
                let options = Arc::clone(config.series_options.get(&key)?);
                Some(FrameSeries { key, options })
            })
            .collect();

        let values = if family.is_single_dimension() {
            let keys = ValuesRegistry::new(data)
                .with_max_category_values(max_category_values)
                .value_keys(roles);
            if let Some(key) = keys
                .iter()
                .find(|key| !config.values_options.contains_key(*key))
            {
                return Err(ConfigError::InvalidData(format!(
                    "category value `{key}` has no options"
                )));
            }
            config
                .value_display_order()
                .into_iter()
                .filter_map(|key| {
                    let options = Arc::clone(config.values_options.get(&key)?);
                    Some(FrameValue { key, options })
                })
                .collect()
        } else {
            Vec::new()
        };

        let inverse = roles.inverse();
        let owned = |column: Option<&str>| column.map(str::to_owned);
        Ok(Self {
            family,
            affordances: config.affordances(),
            columns: FrameColumns {
                x: owned(inverse.x),
                y: inverse.y.iter().map(|column| (*column).to_owned()).collect(),
                groupby: owned(inverse.groupby),
                size: owned(inverse.size),
                error: owned(inverse.error),
                z_value: owned(inverse.z_value),
            },
            series,
            values,
            x_axis: Arc::clone(&config.x_axis),
            y_axis: config.y_axis.clone(),
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty() && self.values.is_empty()
    }
}
