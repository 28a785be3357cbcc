use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

use crate::core::AxisIndex;
use crate::error::{ConfigError, ConfigResult};

use super::NumericInput;
use super::numeric_input::lenient_f64;

/// Scale kind of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AxisScale {
    /// Let the renderer pick from the data.
    #[default]
    #[serde(rename = "-", alias = "auto")]
    Auto,
    #[serde(rename = "linear")]
    Linear,
    #[serde(rename = "logarithmic", alias = "log")]
    Logarithmic,
    #[serde(rename = "datetime")]
    Datetime,
    #[serde(rename = "category")]
    Category,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisTitle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AxisTitle {
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabels {
    #[serde(default = "default_labels_enabled")]
    pub enabled: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for AxisLabels {
    fn default() -> Self {
        Self {
            enabled: default_labels_enabled(),
            extra: Map::new(),
        }
    }
}

fn default_labels_enabled() -> bool {
    true
}

/// Persisted configuration of one axis.
///
/// An inverted or absent range is tolerated; renderers fall back to
/// auto-scaling.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisRecord {
    #[serde(rename = "type", default)]
    pub scale: AxisScale,
    #[serde(default)]
    pub title: AxisTitle,
    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub range_min: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub range_max: Option<f64>,
    #[serde(default)]
    pub labels: AxisLabels,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Shallow partial update of an [`AxisRecord`].
///
/// `title` and `labels` replace the stored sub-records wholesale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AxisPatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<AxisScale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<AxisTitle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_min: Option<NumericInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_max: Option<NumericInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<AxisLabels>,
}

impl AxisPatch {
    #[must_use]
    pub fn scale(scale: AxisScale) -> Self {
        Self {
            scale: Some(scale),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn range_min(input: impl Into<NumericInput>) -> Self {
        Self {
            range_min: Some(input.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn range_max(input: impl Into<NumericInput>) -> Self {
        Self {
            range_max: Some(input.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl AxisRecord {
    /// Default record for the X axis.
    #[must_use]
    pub fn x_default() -> Self {
        Self::default()
    }

    /// Default record for a Y axis; the secondary one is drawn on the opposite side.
    #[must_use]
    pub fn y_default(index: AxisIndex) -> Self {
        let mut extra = Map::new();
        if index == AxisIndex::Secondary {
            extra.insert("opposite".to_owned(), Value::Bool(true));
        }
        Self {
            scale: AxisScale::Linear,
            extra,
            ..Self::default()
        }
    }

    /// Returns `self` shallow-merged with `patch`.
    ///
    /// Range inputs that do not parse fall back to auto and are reported in
    /// `notices` under `{field}.rangeMin` / `{field}.rangeMax`.
    #[must_use]
    pub fn patched(&self, patch: &AxisPatch, field: &str, notices: &mut Vec<ConfigError>) -> Self {
        let mut next = self.clone();
        if let Some(scale) = patch.scale {
            next.scale = scale;
        }
        if let Some(title) = &patch.title {
            next.title = title.clone();
        }
        if let Some(input) = &patch.range_min {
            let (value, notice) = input.resolve(&format!("{field}.rangeMin"));
            next.range_min = value;
            notices.extend(notice);
        }
        if let Some(input) = &patch.range_max {
            let (value, notice) = input.resolve(&format!("{field}.rangeMax"));
            next.range_max = value;
            notices.extend(notice);
        }
        if let Some(labels) = &patch.labels {
            next.labels = labels.clone();
        }
        next
    }
}

/// The two Y axes, addressed by [`AxisIndex`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AxisRecord>", into = "Vec<AxisRecord>")]
pub struct YAxes([Arc<AxisRecord>; 2]);

/// Result of [`YAxes::update_axis`].
#[derive(Debug, Clone, PartialEq)]
pub struct AxisUpdate {
    pub axes: YAxes,
    pub notices: Vec<ConfigError>,
}

impl YAxes {
    #[must_use]
    pub fn new(primary: AxisRecord, secondary: AxisRecord) -> Self {
        Self([Arc::new(primary), Arc::new(secondary)])
    }

    #[must_use]
    pub fn get(&self, index: AxisIndex) -> &Arc<AxisRecord> {
        &self.0[index.as_usize()]
    }

    #[must_use]
    pub fn primary(&self) -> &Arc<AxisRecord> {
        self.get(AxisIndex::Primary)
    }

    #[must_use]
    pub fn secondary(&self) -> &Arc<AxisRecord> {
        self.get(AxisIndex::Secondary)
    }

    /// Builds a new pair where `index` is merged with `patch` and the other
    /// axis is the same `Arc` as before.
    #[must_use]
    pub fn update_axis(&self, index: AxisIndex, patch: &AxisPatch) -> AxisUpdate {
        let mut notices = Vec::new();
        let field = format!("yAxis[{}]", index.as_usize());
        let updated = self.get(index).patched(patch, &field, &mut notices);
        let mut axes = self.0.clone();
        axes[index.as_usize()] = Arc::new(updated);
        trace!(axis = index.as_usize(), notices = notices.len(), "y axis updated");
        AxisUpdate {
            axes: Self(axes),
            notices,
        }
    }
}

impl Default for YAxes {
    fn default() -> Self {
        Self::new(
            AxisRecord::y_default(AxisIndex::Primary),
            AxisRecord::y_default(AxisIndex::Secondary),
        )
    }
}

impl TryFrom<Vec<AxisRecord>> for YAxes {
    type Error = ConfigError;

    fn try_from(records: Vec<AxisRecord>) -> ConfigResult<Self> {
        let mut records = records.into_iter();
        let primary = records
            .next()
            .unwrap_or_else(|| AxisRecord::y_default(AxisIndex::Primary));
        let secondary = records
            .next()
            .unwrap_or_else(|| AxisRecord::y_default(AxisIndex::Secondary));
        if records.next().is_some() {
            return Err(ConfigError::InvalidData(
                "yAxis must hold at most two axis records".to_owned(),
            ));
        }
        Ok(Self::new(primary, secondary))
    }
}

impl From<YAxes> for Vec<AxisRecord> {
    fn from(axes: YAxes) -> Self {
        axes.0
            .into_iter()
            .map(Arc::unwrap_or_clone)
            .collect()
    }
}
