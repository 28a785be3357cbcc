use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Semantic purpose a data column plays in a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnRole {
    #[serde(rename = "x")]
    X,
    #[serde(rename = "y")]
    Y,
    #[serde(rename = "groupby", alias = "series")]
    Groupby,
    #[serde(rename = "size")]
    Size,
    #[serde(rename = "yError", alias = "error")]
    Error,
    #[serde(rename = "zVal", alias = "zValue")]
    ZValue,
}

impl ColumnRole {
    pub const ALL: [Self; 6] = [
        Self::X,
        Self::Y,
        Self::Groupby,
        Self::Size,
        Self::Error,
        Self::ZValue,
    ];

    /// `y` is the only role several columns may hold at once.
    #[must_use]
    pub fn is_multi_valued(self) -> bool {
        matches!(self, Self::Y)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Groupby => "groupby",
            Self::Size => "size",
            Self::Error => "yError",
            Self::ZValue => "zVal",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index of a Y axis: 0 is the primary (left) axis, 1 the secondary (right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AxisIndex {
    #[default]
    Primary,
    Secondary,
}

impl AxisIndex {
    /// The axis an update to `self` must leave untouched.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }

    #[must_use]
    pub fn as_usize(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
        }
    }

    pub fn from_position(position: usize) -> ConfigResult<Self> {
        match position {
            0 => Ok(Self::Primary),
            1 => Ok(Self::Secondary),
            _ => Err(ConfigError::MalformedPartialUpdate(format!(
                "y-axis index must be 0 or 1, got {position}"
            ))),
        }
    }
}

impl TryFrom<u8> for AxisIndex {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_position(usize::from(value))
    }
}

impl From<AxisIndex> for u8 {
    fn from(value: AxisIndex) -> Self {
        match value {
            AxisIndex::Primary => 0,
            AxisIndex::Secondary => 1,
        }
    }
}
