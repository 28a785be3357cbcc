use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::{AxisIndex, DataSnapshot};
use crate::error::{ConfigError, ConfigResult};

use super::chart_type_transition::transition_global_family;
use super::role_map::validate_assignment;
use super::{ChartConfiguration, PartialUpdate, SeriesRegistry, ValuesRegistry};

/// Result of a successful merge.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutput {
    pub configuration: ChartConfiguration,
    /// Locally resolved input problems (unparseable numbers fell back to auto).
    pub notices: Vec<ConfigError>,
}

/// Applies partial updates onto configuration snapshots.
#[derive(Debug, Clone, Copy)]
pub struct OptionsMerger<'a> {
    data: &'a DataSnapshot,
    max_category_values: Option<usize>,
}

impl<'a> OptionsMerger<'a> {
    #[must_use]
    pub fn new(data: &'a DataSnapshot) -> Self {
        Self {
            data,
            max_category_values: None,
        }
    }

    #[must_use]
    pub fn with_max_category_values(mut self, limit: Option<usize>) -> Self {
        self.max_category_values = limit;
        self
    }

    /// Merges `partial` into `current` and returns the next snapshot.
    ///
    /// Role and family changes are applied first and trigger series (and, for
    /// single-dimension families, value) reconciliation, so per-entity patches
    /// in the same edit address the post-merge keys. On error nothing is
    /// applied.
    pub fn apply(
        &self,
        current: &ChartConfiguration,
        partial: &PartialUpdate,
    ) -> ConfigResult<MergeOutput> {
        partial.validate_shape()?;
        let mut notices = Vec::new();
        let mut next = current.clone();

        let roles_changed = match &partial.column_mapping {
            Some(assignment) => {
                validate_assignment(assignment, self.data)?;
                next.column_mapping = current.column_mapping.set_roles(assignment);
                next.column_mapping != current.column_mapping
            }
            None => false,
        };

        // Selecting a family retypes every series, even when it is the current one.
        let family_changed = match &partial.global_series_type {
            Some(family) => {
                next = transition_global_family(&next, family.clone());
                *family != current.global_series_type
            }
            None => false,
        };

        if partial.touches_roles() || family_changed {
            self.reconcile_entities(&mut next);
        }

        self.apply_entity_patches(&mut next, partial)?;
        apply_axis_patches(&mut next, partial, &mut notices);
        apply_scalar_fields(&mut next, partial, &mut notices);

        debug!(
            roles_changed,
            family_changed,
            notices = notices.len(),
            "merged chart configuration update"
        );
        Ok(MergeOutput {
            configuration: next,
            notices,
        })
    }

    /// Recomputes series and value options so their keys match the role map.
    pub fn reconcile_entities(&self, next: &mut ChartConfiguration) {
        let reconciled = SeriesRegistry::new(self.data)
            .with_max_category_values(self.max_category_values)
            .reconcile(
                &next.column_mapping,
                &next.series_options,
                &next.global_series_type,
                next.series_list.as_deref(),
            );
        if next.series_list.is_some() {
            next.series_list = Some(reconciled.ordered_keys);
        }
        next.series_options = reconciled.options;

        if next.global_series_type.is_single_dimension() {
            next.values_options = ValuesRegistry::new(self.data)
                .with_max_category_values(self.max_category_values)
                .reconcile(&next.column_mapping, &next.values_options);
        }
    }

    fn apply_entity_patches(
        &self,
        next: &mut ChartConfiguration,
        partial: &PartialUpdate,
    ) -> ConfigResult<()> {
        if let Some(patches) = &partial.series_options {
            for (key, patch) in patches {
                let Some(existing) = next.series_options.get(key) else {
                    return Err(ConfigError::MalformedPartialUpdate(format!(
                        "unknown series `{key}`"
                    )));
                };
                let patched = Arc::new(existing.patched(patch));
                next.series_options.insert(key.clone(), patched);
                trace!(series = %key, "series options patched");
            }
        }

        if let Some(patches) = &partial.values_options {
            for (key, patch) in patches {
                let Some(existing) = next.values_options.get(key) else {
                    return Err(ConfigError::MalformedPartialUpdate(format!(
                        "unknown category value `{key}`"
                    )));
                };
                let patched = Arc::new(existing.patched(patch));
                next.values_options.insert(key.clone(), patched);
            }
        }

        if let Some(list) = &partial.series_list {
            if let Some(unknown) = list
                .iter()
                .find(|key| !next.series_options.contains_key(*key))
            {
                return Err(ConfigError::MalformedPartialUpdate(format!(
                    "seriesList names unknown series `{unknown}`"
                )));
            }
            next.series_list = if list.is_empty() {
                None
            } else {
                Some(list.clone())
            };
        }
        Ok(())
    }
}

fn apply_axis_patches(
    next: &mut ChartConfiguration,
    partial: &PartialUpdate,
    notices: &mut Vec<ConfigError>,
) {
    if let Some(patch) = &partial.x_axis {
        next.x_axis = Arc::new(next.x_axis.patched(patch, "xAxis", notices));
    }
    if let Some(slots) = &partial.y_axis {
        for (index, slot) in [AxisIndex::Primary, AxisIndex::Secondary]
            .into_iter()
            .zip(slots)
        {
            if let Some(patch) = slot {
                let update = next.y_axis.update_axis(index, patch);
                next.y_axis = update.axes;
                notices.extend(update.notices);
            }
        }
    }
}

fn apply_scalar_fields(
    next: &mut ChartConfiguration,
    partial: &PartialUpdate,
    notices: &mut Vec<ConfigError>,
) {
    if let Some(legend) = &partial.legend {
        next.legend = legend.clone();
    }
    if let Some(series) = &partial.series {
        next.series = series.clone();
    }

    for (slot, value) in [
        (&mut next.show_data_labels, partial.show_data_labels),
        (&mut next.show_points, partial.show_points),
        (&mut next.sort_x, partial.sort_x),
        (&mut next.reverse_x, partial.reverse_x),
        (&mut next.sort_y, partial.sort_y),
        (&mut next.reverse_y, partial.reverse_y),
        (&mut next.enable_console_logs, partial.enable_console_logs),
        (&mut next.auto_redraw, partial.auto_redraw),
    ] {
        if let Some(value) = value {
            *slot = value;
        }
    }

    if let Some(input) = &partial.x_axis_label_length {
        let (value, notice) = input.resolve_count("xAxisLabelLength");
        next.x_axis_label_length = value;
        notices.extend(notice);
    }

    for (slot, value) in [
        (&mut next.number_format, &partial.number_format),
        (&mut next.percent_format, &partial.percent_format),
        (&mut next.date_time_format, &partial.date_time_format),
        (
            &mut next.legacy_date_time_format,
            &partial.legacy_date_time_format,
        ),
        (&mut next.text_format, &partial.text_format),
        (&mut next.color_scheme, &partial.color_scheme),
        (&mut next.heat_min_color, &partial.heat_min_color),
        (&mut next.heat_max_color, &partial.heat_max_color),
        (&mut next.custom_code, &partial.custom_code),
    ] {
        if let Some(value) = value {
            *slot = if value.is_empty() {
                None
            } else {
                Some(value.clone())
            };
        }
    }

    for (key, value) in &partial.extra {
        next.extra.insert(key.clone(), value.clone());
    }
}
