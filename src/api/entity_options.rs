use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{AxisIndex, ChartFamily};

/// Presentation options stored per series key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesOptions {
    #[serde(rename = "type", default)]
    pub family: ChartFamily,
    #[serde(default, alias = "yAxis")]
    pub y_axis_index: AxisIndex,
    #[serde(default)]
    pub z_index: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Display name overriding the series key in legends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SeriesOptions {
    /// Options synthesized the first time a series key appears.
    #[must_use]
    pub fn new(family: ChartFamily, z_index: i64) -> Self {
        Self {
            family,
            y_axis_index: AxisIndex::Primary,
            z_index,
            color: None,
            name: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_family(&self, family: ChartFamily) -> Self {
        Self {
            family,
            ..self.clone()
        }
    }

    /// Returns `self` with `patch` applied. An empty `color` or `name` clears it.
    #[must_use]
    pub fn patched(&self, patch: &SeriesOptionsPatch) -> Self {
        let mut next = self.clone();
        if let Some(family) = &patch.family {
            next.family = family.clone();
        }
        if let Some(index) = patch.y_axis_index {
            next.y_axis_index = index;
        }
        if let Some(z_index) = patch.z_index {
            next.z_index = z_index;
        }
        if let Some(color) = &patch.color {
            next.color = non_empty(color);
        }
        if let Some(name) = &patch.name {
            next.name = non_empty(name);
        }
        for (key, value) in &patch.extra {
            next.extra.insert(key.clone(), value.clone());
        }
        next
    }
}

/// Partial update of one series' options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesOptionsPatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub family: Option<ChartFamily>,
    #[serde(default, alias = "yAxis", skip_serializing_if = "Option::is_none")]
    pub y_axis_index: Option<AxisIndex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SeriesOptionsPatch {
    #[must_use]
    pub fn family(family: ChartFamily) -> Self {
        Self {
            family: Some(family),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn y_axis(index: AxisIndex) -> Self {
        Self {
            y_axis_index: Some(index),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }
}

/// Presentation options stored per distinct category value (pie slices).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ValueOptions {
    #[must_use]
    pub fn patched(&self, patch: &ValueOptionsPatch) -> Self {
        let mut next = self.clone();
        if let Some(color) = &patch.color {
            next.color = non_empty(color);
        }
        for (key, value) in &patch.extra {
            next.extra.insert(key.clone(), value.clone());
        }
        next
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueOptionsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ValueOptionsPatch {
    #[must_use]
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            extra: Map::new(),
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_owned())
    }
}
