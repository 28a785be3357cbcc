use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::ChartFamily;
use crate::error::{ConfigError, ConfigResult};

use super::ChartConfiguration;

/// Supplies display names and default options per visualization kind.
pub trait VisualizationRegistry {
    fn display_name(&self, kind: &str) -> Option<&str>;
    fn default_options(&self, kind: &str) -> Option<ChartConfiguration>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEntry {
    pub display_name: String,
    pub default_options: ChartConfiguration,
}

/// In-memory [`VisualizationRegistry`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StaticRegistry {
    entries: IndexMap<String, RegistryEntry>,
}

impl StaticRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the `CHART` kind with line defaults.
    #[must_use]
    pub fn with_chart_defaults() -> Self {
        Self::new().with_kind(
            "CHART",
            "Chart",
            ChartConfiguration::for_family(ChartFamily::Line),
        )
    }

    #[must_use]
    pub fn with_kind(
        mut self,
        kind: impl Into<String>,
        display_name: impl Into<String>,
        default_options: ChartConfiguration,
    ) -> Self {
        self.entries.insert(
            kind.into(),
            RegistryEntry {
                display_name: display_name.into(),
                default_options,
            },
        );
        self
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }
}

impl VisualizationRegistry for StaticRegistry {
    fn display_name(&self, kind: &str) -> Option<&str> {
        self.entries
            .get(kind)
            .map(|entry| entry.display_name.as_str())
    }

    fn default_options(&self, kind: &str) -> Option<ChartConfiguration> {
        self.entries
            .get(kind)
            .map(|entry| entry.default_options.clone())
    }
}

/// A named visualization holding one configuration snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visualization {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub options: Arc<ChartConfiguration>,
}

impl Visualization {
    /// New visualization of `kind` named and configured from the registry.
    pub fn new<R: VisualizationRegistry + ?Sized>(registry: &R, kind: &str) -> ConfigResult<Self> {
        let (name, options) = registry_entry(registry, kind)?;
        Ok(Self {
            kind: kind.to_owned(),
            name,
            options: Arc::new(options),
        })
    }

    /// Switches the visualization kind.
    ///
    /// A different kind takes the registry defaults for its options. The name
    /// follows the new kind only while it still equals the old kind's default
    /// name, so user-chosen names survive.
    pub fn update_kind<R: VisualizationRegistry + ?Sized>(
        &self,
        registry: &R,
        kind: &str,
    ) -> ConfigResult<Self> {
        let (default_name, default_options) = registry_entry(registry, kind)?;
        let keeps_default_name = registry.display_name(&self.kind) == Some(self.name.as_str());
        let name = if keeps_default_name {
            default_name
        } else {
            self.name.clone()
        };
        let options = if kind == self.kind {
            Arc::clone(&self.options)
        } else {
            Arc::new(default_options)
        };
        debug!(from = %self.kind, to = %kind, renamed = keeps_default_name, "visualization kind updated");
        Ok(Self {
            kind: kind.to_owned(),
            name,
            options,
        })
    }

    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_options(&self, options: Arc<ChartConfiguration>) -> Self {
        Self {
            options,
            ..self.clone()
        }
    }
}

fn registry_entry<R: VisualizationRegistry + ?Sized>(
    registry: &R,
    kind: &str,
) -> ConfigResult<(String, ChartConfiguration)> {
    match (registry.display_name(kind), registry.default_options(kind)) {
        (Some(name), Some(options)) => Ok((name.to_owned(), options)),
        _ => Err(ConfigError::InvalidData(format!(
            "unknown visualization kind `{kind}`"
        ))),
    }
}
