use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};

use crate::core::{ChartFamily, DataSnapshot};

use super::{RoleMap, SeriesOptions};

/// Output of a series reconcile pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledSeries {
    /// Keys in display order (explicit list, then `zIndex`, then first seen).
    pub ordered_keys: Vec<String>,
    /// Options for exactly the current keys, in first-seen order.
    pub options: IndexMap<String, Arc<SeriesOptions>>,
}

/// Derives the active series set from the role map and the data snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SeriesRegistry<'a> {
    data: &'a DataSnapshot,
    max_category_values: Option<usize>,
}

impl<'a> SeriesRegistry<'a> {
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

    /// Candidate series keys in first-seen order.
    ///
    /// - no y columns: no series
    /// - no groupby: one key per y column
    /// - groupby with one y column, or a single-dimension family: one key per
    ///   distinct group value
    /// - groupby with several y columns: group-major cross product keyed
    ///   `"{group} ({y})"`
    #[must_use]
    pub fn candidate_keys(&self, role_map: &RoleMap, family: &ChartFamily) -> Vec<String> {
        let inverse = role_map.inverse();
        if inverse.y.is_empty() {
            return Vec::new();
        }
        let Some(groupby) = inverse.groupby else {
            return inverse.y.iter().map(|column| (*column).to_owned()).collect();
        };

        let groups = capped_keys(self.data, groupby, self.max_category_values);
        if family.is_single_dimension() || inverse.y.len() == 1 {
            return groups;
        }

        let keys: IndexSet<String> = groups
            .iter()
            .flat_map(|group| inverse.y.iter().map(move |y| series_key(group, y)))
            .collect();
        keys.into_iter().collect()
    }

    /// Reconciles `prior` options against the current candidate keys.
    ///
    /// Existing options are reused as the same `Arc`; new keys get
    /// `{ type: family, yAxisIndex: 0, zIndex: <next> }`; stale keys are dropped.
    #[must_use]
    pub fn reconcile(
        &self,
        role_map: &RoleMap,
        prior: &IndexMap<String, Arc<SeriesOptions>>,
        family: &ChartFamily,
        series_list: Option<&[String]>,
    ) -> ReconciledSeries {
        let candidates = self.candidate_keys(role_map, family);
        let mut next_z_index = candidates
            .iter()
            .filter_map(|key| prior.get(key))
            .map(|options| options.z_index)
            .max()
            .map_or(0, |max| max + 1);

        let mut options = IndexMap::with_capacity(candidates.len());
        let mut created = 0usize;
        for key in &candidates {
            let entry = match prior.get(key) {
                Some(existing) => Arc::clone(existing),
                None => {
                    created += 1;
                    let synthesized = SeriesOptions::new(family.clone(), next_z_index);
                    next_z_index += 1;
                    Arc::new(synthesized)
                }
            };
            options.insert(key.clone(), entry);
        }

        let ordered_keys = order_series_keys(&options, series_list);
        debug!(
            series = options.len(),
            created,
            dropped = prior.keys().filter(|key| !options.contains_key(*key)).count(),
            "reconciled series options"
        );
        ReconciledSeries {
            ordered_keys,
            options,
        }
    }
}

/// Key of one cell of the groupby × y cross product.
#[must_use]
pub fn series_key(group: &str, y_column: &str) -> String {
    format!("{group} ({y_column})")
}

/// Orders keys by position in `series_list`, then ascending `zIndex`, then
/// first-seen position. Keys missing from the list sort after listed ones.
#[must_use]
pub fn order_series_keys(
    options: &IndexMap<String, Arc<SeriesOptions>>,
    series_list: Option<&[String]>,
) -> Vec<String> {
    let mut ranked: Vec<((usize, i64, usize), &String)> = options
        .iter()
        .enumerate()
        .map(|(first_seen, (key, entry))| {
            let listed = series_list
                .and_then(|list| list.iter().position(|listed| listed == key))
                .unwrap_or(usize::MAX);
            ((listed, entry.z_index, first_seen), key)
        })
        .collect();
    ranked.sort_by_key(|(rank, _)| *rank);
    ranked.into_iter().map(|(_, key)| key.clone()).collect()
}

pub(crate) fn capped_keys(data: &DataSnapshot, column: &str, limit: Option<usize>) -> Vec<String> {
    let mut keys = data.distinct_keys(column);
    if let Some(limit) = limit {
        if keys.len() > limit {
            warn!(
                column,
                distinct = keys.len(),
                limit,
                "distinct values exceed configured cap, ignoring the rest"
            );
            keys.truncate(limit);
        }
    }
    keys
}
