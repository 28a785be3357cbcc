use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::core::{AxisIndex, ChartFamily, DataSnapshot};
use crate::error::{ConfigError, ConfigResult};
use crate::render::RenderFrame;

use super::chart_type_transition::transition_global_family;
use super::role_inference::infer_roles;
use super::{
    AxisPatch, ChartConfiguration, EditAction, EngineConfig, OptionsMerger, PartialUpdate,
    RoleAssignment,
};

/// Result of one edit.
///
/// On rejection `snapshot` is the prior snapshot (same `Arc`) and `rejection`
/// says why. `notices` lists numeric inputs that fell back to auto.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    pub snapshot: Arc<ChartConfiguration>,
    pub rejection: Option<ConfigError>,
    pub notices: Vec<ConfigError>,
}

impl EditOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        self.rejection.is_none()
    }

    fn rejected(current: &Arc<ChartConfiguration>, error: ConfigError) -> Self {
        warn!(error = %error, "edit rejected, keeping prior snapshot");
        Self {
            snapshot: Arc::clone(current),
            rejection: Some(error),
            notices: Vec::new(),
        }
    }
}

/// Pure configuration-state transformer.
///
/// Holds only its tuning; every call takes the current snapshot and the data
/// snapshot explicitly and returns the successor.
#[derive(Debug, Clone, Default)]
pub struct ChartConfigEngine {
    config: EngineConfig,
}

impl ChartConfigEngine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn merger<'a>(&self, data: &'a DataSnapshot) -> OptionsMerger<'a> {
        OptionsMerger::new(data).with_max_category_values(self.config.max_category_values)
    }

    /// Builds a self-consistent configuration for `data` and `family`.
    ///
    /// `base` is the registry default for the family, if any. Roles it names
    /// that `data` lacks are dropped; with no roles left they are inferred
    /// from the schema.
    #[must_use]
    pub fn derive_initial(
        &self,
        data: &DataSnapshot,
        family: ChartFamily,
        base: Option<ChartConfiguration>,
    ) -> Arc<ChartConfiguration> {
        let mut next = base.unwrap_or_else(|| ChartConfiguration::for_family(family.clone()));
        if next.global_series_type != family {
            next = transition_global_family(&next, family);
        }
        let (retained, _) = next.column_mapping.retain_schema(data);
        next.column_mapping = if retained.is_empty() {
            infer_roles(data)
        } else {
            retained
        };
        self.merger(data).reconcile_entities(&mut next);
        debug!(
            family = %next.global_series_type,
            series = next.series_options.len(),
            values = next.values_options.len(),
            "initial chart configuration derived"
        );
        Arc::new(next)
    }

    /// Applies one partial update.
    #[must_use]
    pub fn apply(
        &self,
        current: &Arc<ChartConfiguration>,
        data: &DataSnapshot,
        partial: &PartialUpdate,
    ) -> EditOutcome {
        match self.merger(data).apply(current, partial) {
            Ok(output) => {
                let snapshot = if output.configuration == **current {
                    Arc::clone(current)
                } else {
                    Arc::new(output.configuration)
                };
                EditOutcome {
                    snapshot,
                    rejection: None,
                    notices: output.notices,
                }
            }
            Err(error) => EditOutcome::rejected(current, error),
        }
    }

    /// Applies a raw JSON edit payload.
    #[must_use]
    pub fn apply_json(
        &self,
        current: &Arc<ChartConfiguration>,
        data: &DataSnapshot,
        payload: &Value,
    ) -> EditOutcome {
        match PartialUpdate::from_json_value(payload) {
            Ok(partial) => self.apply(current, data, &partial),
            Err(error) => EditOutcome::rejected(current, error),
        }
    }

    #[must_use]
    pub fn dispatch(
        &self,
        current: &Arc<ChartConfiguration>,
        data: &DataSnapshot,
        action: &EditAction,
    ) -> EditOutcome {
        self.apply(current, data, &action.to_partial(current))
    }

    #[must_use]
    pub fn set_global_family(
        &self,
        current: &Arc<ChartConfiguration>,
        data: &DataSnapshot,
        family: ChartFamily,
    ) -> EditOutcome {
        self.apply(current, data, &PartialUpdate::family(family))
    }

    #[must_use]
    pub fn set_roles(
        &self,
        current: &Arc<ChartConfiguration>,
        data: &DataSnapshot,
        assignment: RoleAssignment,
    ) -> EditOutcome {
        self.apply(current, data, &PartialUpdate::roles(assignment))
    }

    #[must_use]
    pub fn update_y_axis(
        &self,
        current: &Arc<ChartConfiguration>,
        data: &DataSnapshot,
        index: AxisIndex,
        patch: AxisPatch,
    ) -> EditOutcome {
        self.apply(current, data, &PartialUpdate::y_axis(index, patch))
    }

    /// Carries `current` onto a new data snapshot.
    ///
    /// Roles naming columns `data` lacks are dropped, then series and values
    /// are reconciled so surviving entities keep their options.
    #[must_use]
    pub fn rebase_on_data(
        &self,
        current: &Arc<ChartConfiguration>,
        data: &DataSnapshot,
    ) -> Arc<ChartConfiguration> {
        let mut next = ChartConfiguration::clone(current);
        let (retained, dropped) = next.column_mapping.retain_schema(data);
        if !dropped.is_empty() {
            warn!(columns = ?dropped, "roles pruned, columns missing from data");
        }
        next.column_mapping = retained;
        self.merger(data).reconcile_entities(&mut next);
        if next == **current {
            Arc::clone(current)
        } else {
            Arc::new(next)
        }
    }

    /// Resolves `config` for a renderer, honoring the distinct-value cap.
    pub fn render_frame(
        &self,
        config: &ChartConfiguration,
        data: &DataSnapshot,
    ) -> ConfigResult<RenderFrame> {
        RenderFrame::build_capped(config, data, self.config.max_category_values)
    }

    /// Custom code to show for `config`, falling back to the template.
    #[must_use]
    pub fn effective_custom_code<'a>(&'a self, config: &'a ChartConfiguration) -> &'a str {
        config.effective_custom_code(&self.config.custom_code_template)
    }
}
