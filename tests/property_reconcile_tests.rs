use std::sync::Arc;

use chart_config::api::{
    ChartConfigEngine, ChartConfiguration, RoleAssignment, RoleMap, SeriesOptions, SeriesRegistry,
};
use chart_config::core::{
    ChartFamily, ColumnRole, ColumnSchema, ColumnType, DataSnapshot, Row, Scalar,
};
use chart_config::render::RenderFrame;
use indexmap::IndexMap;
use proptest::prelude::*;

const Y_COLUMNS: [&str; 4] = ["a", "b", "c", "d"];

fn data_with_groups(groups: &[u8]) -> DataSnapshot {
    let mut columns = vec![ColumnSchema::new("group", ColumnType::String)];
    columns.extend(
        Y_COLUMNS
            .iter()
            .map(|name| ColumnSchema::new(*name, ColumnType::Float)),
    );
    let rows = groups
        .iter()
        .map(|group| {
            let mut row = Row::new();
            row.insert("group".to_owned(), Scalar::from(format!("g{group}")));
            for name in Y_COLUMNS {
                row.insert(name.to_owned(), Scalar::from(f64::from(*group)));
            }
            row
        })
        .collect();
    DataSnapshot::new(columns, rows)
}

fn family_strategy() -> impl Strategy<Value = ChartFamily> {
    proptest::sample::select(ChartFamily::ALL.to_vec())
}

fn roles_for(y_mask: u8, grouped: bool) -> RoleMap {
    let mut assignment: RoleAssignment = Y_COLUMNS
        .iter()
        .enumerate()
        .filter(|(index, _)| y_mask & (1 << index) != 0)
        .map(|(_, name)| ((*name).to_owned(), Some(ColumnRole::Y)))
        .collect();
    if grouped {
        assignment.insert("group".to_owned(), Some(ColumnRole::Groupby));
    }
    RoleMap::new().set_roles(&assignment)
}

proptest! {
    #[test]
    fn reconcile_output_matches_candidates_exactly(
        groups in proptest::collection::vec(0u8..6, 0..20),
        y_mask in 0u8..16,
        grouped in any::<bool>(),
        prior_mask in 0u8..16,
        family in family_strategy()
    ) {
        let data = data_with_groups(&groups);
        let registry = SeriesRegistry::new(&data);
        let roles = roles_for(y_mask, grouped);

        let mut prior = IndexMap::new();
        for (index, name) in Y_COLUMNS.iter().enumerate() {
            if prior_mask & (1 << index) != 0 {
                prior.insert((*name).to_owned(), Arc::new(SeriesOptions::new(ChartFamily::Box, index as i64)));
            }
        }

        let candidates = registry.candidate_keys(&roles, &family);
        let reconciled = registry.reconcile(&roles, &prior, &family, None);

        prop_assert_eq!(reconciled.options.keys().cloned().collect::<Vec<_>>(), candidates.clone());
        prop_assert_eq!(reconciled.ordered_keys.len(), candidates.len());
        for (key, options) in &reconciled.options {
            match prior.get(key) {
                Some(previous) => prop_assert!(Arc::ptr_eq(options, previous)),
                None => prop_assert_eq!(&options.family, &family),
            }
        }

        let again = registry.reconcile(&roles, &reconciled.options, &family, None);
        prop_assert_eq!(again.ordered_keys, reconciled.ordered_keys);
        for (key, options) in &again.options {
            prop_assert!(Arc::ptr_eq(options, &reconciled.options[key]));
        }
    }

    #[test]
    fn engine_snapshots_always_render(
        groups in proptest::collection::vec(0u8..6, 0..12),
        edits in proptest::collection::vec((0u8..16, any::<bool>(), family_strategy()), 1..6)
    ) {
        let data = data_with_groups(&groups);
        let engine = ChartConfigEngine::default();
        let mut snapshot = Arc::new(ChartConfiguration::default());

        for (y_mask, grouped, family) in edits {
            let mut partial = chart_config::api::PartialUpdate::roles(
                roles_for(y_mask, grouped)
                    .iter()
                    .map(|(column, role)| (column.to_owned(), Some(role)))
                    .chain(
                        Y_COLUMNS
                            .iter()
                            .filter(|name| roles_for(y_mask, grouped).role_of(name).is_none())
                            .map(|name| ((*name).to_owned(), None)),
                    )
                    .collect(),
            );
            partial.global_series_type = Some(family);
            let outcome = engine.apply(&snapshot, &data, &partial);
            prop_assert!(outcome.is_applied());
            snapshot = outcome.snapshot;
            prop_assert!(RenderFrame::build(&snapshot, &data).is_ok());
        }
    }
}
