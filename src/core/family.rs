use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Chart family selected globally or per series.
///
/// Families this engine does not know load as [`ChartFamily::Other`] and are
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChartFamily {
    #[default]
    Line,
    Column,
    Area,
    Bar,
    Pie,
    Scatter,
    Bubble,
    Heatmap,
    Box,
    /// Escape hatch: the user supplies plotting code.
    Custom,
    /// Wire name of a family written by a newer editor.
    Other(String),
}

impl ChartFamily {
    pub const ALL: [Self; 10] = [
        Self::Line,
        Self::Column,
        Self::Area,
        Self::Bar,
        Self::Pie,
        Self::Scatter,
        Self::Bubble,
        Self::Heatmap,
        Self::Box,
        Self::Custom,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Line => "line",
            Self::Column => "column",
            Self::Area => "area",
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Scatter => "scatter",
            Self::Bubble => "bubble",
            Self::Heatmap => "heatmap",
            Self::Box => "box",
            Self::Custom => "custom",
            Self::Other(name) => name,
        }
    }

    /// Families that plot one category dimension and colour by value.
    #[must_use]
    pub fn is_single_dimension(&self) -> bool {
        matches!(self, Self::Pie)
    }

    fn is_custom_or_heatmap(&self) -> bool {
        matches!(self, Self::Custom | Self::Heatmap)
    }

    #[must_use]
    pub fn supports_groupby(&self) -> bool {
        !self.is_custom_or_heatmap()
    }

    #[must_use]
    pub fn supports_error_column(&self) -> bool {
        !self.is_custom_or_heatmap()
    }

    #[must_use]
    pub fn supports_legend(&self) -> bool {
        !self.is_custom_or_heatmap()
    }

    /// Whether the stacking selector is shown at all.
    #[must_use]
    pub fn shows_stacking(&self) -> bool {
        !self.is_custom_or_heatmap()
    }

    /// Whether stacking can actually be changed.
    #[must_use]
    pub fn enables_stacking(&self) -> bool {
        matches!(self, Self::Line | Self::Area | Self::Column)
    }

    #[must_use]
    pub fn supports_percent_values(&self) -> bool {
        matches!(self, Self::Line | Self::Area | Self::Column)
    }

    #[must_use]
    pub fn supports_size_column(&self) -> bool {
        matches!(self, Self::Bubble)
    }

    #[must_use]
    pub fn supports_color_value(&self) -> bool {
        matches!(self, Self::Heatmap)
    }

    #[must_use]
    pub fn supports_show_points(&self) -> bool {
        matches!(self, Self::Box)
    }

    #[must_use]
    pub fn supports_custom_code(&self) -> bool {
        matches!(self, Self::Custom)
    }

    #[must_use]
    pub fn supports_data_labels(&self) -> bool {
        matches!(
            self,
            Self::Line | Self::Column | Self::Area | Self::Scatter | Self::Pie
        )
    }

    /// Axis, sorting and series panels are meaningless for the escape hatch.
    #[must_use]
    pub fn has_axes(&self) -> bool {
        !matches!(self, Self::Custom)
    }

    #[must_use]
    pub fn color_editor_target(&self) -> Option<ColorEditorTarget> {
        if self.is_custom_or_heatmap() {
            None
        } else if self.is_single_dimension() {
            Some(ColorEditorTarget::Values)
        } else {
            Some(ColorEditorTarget::Series)
        }
    }
}

impl fmt::Display for ChartFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editor input: only known families, matched case-insensitively.
impl FromStr for ChartFamily {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|family| family.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| {
                ConfigError::MalformedPartialUpdate(format!("unknown chart family `{value}`"))
            })
    }
}

impl From<String> for ChartFamily {
    fn from(name: String) -> Self {
        Self::ALL
            .into_iter()
            .find(|family| family.as_str() == name)
            .unwrap_or(Self::Other(name))
    }
}

impl From<ChartFamily> for String {
    fn from(family: ChartFamily) -> Self {
        match family {
            ChartFamily::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

/// Which per-entity option map the color editor works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorEditorTarget {
    Series,
    Values,
}

/// Editor affordances resolved for a family.
///
/// Always computed on read, never persisted alongside the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FamilyAffordances {
    pub groupby: bool,
    pub error_column: bool,
    pub legend: bool,
    pub stacking_visible: bool,
    pub stacking_enabled: bool,
    pub percent_values: bool,
    pub size_column: bool,
    pub color_value_column: bool,
    pub color_scheme: bool,
    pub show_points: bool,
    pub custom_code: bool,
    pub data_labels: bool,
    pub axes: bool,
    pub series_editor: bool,
    pub color_editor: Option<ColorEditorTarget>,
}

impl FamilyAffordances {
    #[must_use]
    pub fn for_family(family: &ChartFamily) -> Self {
        Self {
            groupby: family.supports_groupby(),
            error_column: family.supports_error_column(),
            legend: family.supports_legend(),
            stacking_visible: family.shows_stacking(),
            stacking_enabled: family.enables_stacking(),
            percent_values: family.supports_percent_values(),
            size_column: family.supports_size_column(),
            color_value_column: family.supports_color_value(),
            color_scheme: family.supports_color_value(),
            show_points: family.supports_show_points(),
            custom_code: family.supports_custom_code(),
            data_labels: family.supports_data_labels(),
            axes: family.has_axes(),
            series_editor: family.has_axes(),
            color_editor: family.color_editor_target(),
        }
    }

    /// Widens the result with families used by individual series overrides.
    #[must_use]
    pub fn with_series_families<'a, I>(mut self, families: I) -> Self
    where
        I: IntoIterator<Item = &'a ChartFamily>,
    {
        for family in families {
            self.size_column |= family.supports_size_column();
            self.color_value_column |= family.supports_color_value();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartFamily, ColorEditorTarget, FamilyAffordances};

    #[test]
    fn family_parses_case_insensitively() {
        assert_eq!("Pie".parse::<ChartFamily>(), Ok(ChartFamily::Pie));
        assert!("donut".parse::<ChartFamily>().is_err());
    }

    #[test]
    fn unknown_wire_family_round_trips() {
        let family: ChartFamily = serde_json::from_str(r#""sunburst""#).expect("parse family");
        assert_eq!(family, ChartFamily::Other("sunburst".to_owned()));
        assert_eq!(
            serde_json::to_string(&family).expect("serialize family"),
            r#""sunburst""#
        );
        assert_eq!(
            serde_json::from_str::<ChartFamily>(r#""pie""#).expect("parse pie"),
            ChartFamily::Pie
        );
    }

    #[test]
    fn unknown_family_gets_two_dimensional_affordances() {
        let family = ChartFamily::Other("sunburst".to_owned());
        assert!(!family.is_single_dimension());
        assert!(family.has_axes());
        assert_eq!(family.color_editor_target(), Some(ColorEditorTarget::Series));
    }

    #[test]
    fn custom_family_hides_axes_and_colors() {
        let affordances = FamilyAffordances::for_family(&ChartFamily::Custom);
        assert!(!affordances.axes);
        assert!(affordances.custom_code);
        assert_eq!(affordances.color_editor, None);
    }

    #[test]
    fn pie_colors_values() {
        assert_eq!(
            ChartFamily::Pie.color_editor_target(),
            Some(ColorEditorTarget::Values)
        );
        assert_eq!(
            ChartFamily::Column.color_editor_target(),
            Some(ColorEditorTarget::Series)
        );
    }
}
