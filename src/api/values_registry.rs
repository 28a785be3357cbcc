use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::core::DataSnapshot;

use super::series_registry::capped_keys;
use super::{RoleMap, ValueOptions};

/// Reconciles per-value options against the distinct x values.
///
/// Existing entries are reused as the same `Arc`, new values get empty options
/// and values no longer present are dropped. No ordering metadata is kept.
#[must_use]
pub fn reconcile_value_options(
    values: &[String],
    prior: &IndexMap<String, Arc<ValueOptions>>,
) -> IndexMap<String, Arc<ValueOptions>> {
    let options: IndexMap<String, Arc<ValueOptions>> = values
        .iter()
        .map(|value| {
            let entry = prior
                .get(value)
                .map_or_else(|| Arc::new(ValueOptions::default()), Arc::clone);
            (value.clone(), entry)
        })
        .collect();
    debug!(
        values = options.len(),
        dropped = prior.keys().filter(|key| !options.contains_key(*key)).count(),
        "reconciled value options"
    );
    options
}

/// Derives the distinct category values of the x column.
#[derive(Debug, Clone, Copy)]
pub struct ValuesRegistry<'a> {
    data: &'a DataSnapshot,
    max_category_values: Option<usize>,
}

impl<'a> ValuesRegistry<'a> {
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

    /// Distinct x values in first-seen order; empty when no x column is set.
    #[must_use]
    pub fn value_keys(&self, role_map: &RoleMap) -> Vec<String> {
        role_map.x_column().map_or_else(Vec::new, |column| {
            capped_keys(self.data, column, self.max_category_values)
        })
    }

    #[must_use]
    pub fn reconcile(
        &self,
        role_map: &RoleMap,
        prior: &IndexMap<String, Arc<ValueOptions>>,
    ) -> IndexMap<String, Arc<ValueOptions>> {
        reconcile_value_options(&self.value_keys(role_map), prior)
    }
}
