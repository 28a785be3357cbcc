use std::hint::black_box;
use std::sync::Arc;

use chart_config::api::{ChartConfigEngine, ChartConfiguration, RoleAssignment, SeriesRegistry};
use chart_config::core::{ChartFamily, ColumnRole, ColumnSchema, ColumnType, DataSnapshot, Row, Scalar};
use criterion::{Criterion, criterion_group, criterion_main};
use indexmap::IndexMap;
use serde_json::json;

fn grouped_data(rows: usize, groups: usize) -> DataSnapshot {
    let columns = vec![
        ColumnSchema::new("day", ColumnType::Integer),
        ColumnSchema::new("group", ColumnType::String),
        ColumnSchema::new("revenue", ColumnType::Float),
        ColumnSchema::new("cost", ColumnType::Float),
    ];
    let rows = (0..rows)
        .map(|i| {
            let mut row = Row::new();
            row.insert("day".to_owned(), Scalar::from(i as i64));
            row.insert("group".to_owned(), Scalar::from(format!("g{}", i % groups)));
            row.insert("revenue".to_owned(), Scalar::from(i as f64 * 1.5));
            row.insert("cost".to_owned(), Scalar::from(i as f64 * 0.5));
            row
        })
        .collect();
    DataSnapshot::new(columns, rows)
}

fn grouped_roles() -> RoleAssignment {
    [
        ("day", ColumnRole::X),
        ("group", ColumnRole::Groupby),
        ("revenue", ColumnRole::Y),
        ("cost", ColumnRole::Y),
    ]
    .into_iter()
    .map(|(column, role)| (column.to_owned(), Some(role)))
    .collect()
}

fn bench_reconcile_500_groups(c: &mut Criterion) {
    let data = grouped_data(10_000, 500);
    let roles = chart_config::api::RoleMap::new().set_roles(&grouped_roles());
    let registry = SeriesRegistry::new(&data);
    let prior = registry
        .reconcile(&roles, &IndexMap::new(), &ChartFamily::Line, None)
        .options;

    c.bench_function("reconcile_500_groups_x2_y", |b| {
        b.iter(|| {
            let _ = registry.reconcile(
                black_box(&roles),
                black_box(&prior),
                &ChartFamily::Line,
                None,
            );
        })
    });
}

fn bench_merge_and_json_round_trip(c: &mut Criterion) {
    let data = grouped_data(2_000, 50);
    let engine = ChartConfigEngine::default();
    let start = engine
        .set_roles(
            &Arc::new(ChartConfiguration::default()),
            &data,
            grouped_roles(),
        )
        .snapshot;
    let edit = json!({
        "yAxis": [{"rangeMin": 0}, {"type": "logarithmic"}],
        "seriesOptions": {"g1 (cost)": {"yAxis": 1}},
        "globalSeriesType": "column"
    });

    c.bench_function("merge_edit_and_json_round_trip", |b| {
        b.iter(|| {
            let outcome = engine.apply_json(black_box(&start), &data, black_box(&edit));
            let json = outcome.snapshot.to_json_pretty().expect("serialize");
            let _ = ChartConfiguration::from_json_str(&json).expect("parse");
        })
    });
}

criterion_group!(
    benches,
    bench_reconcile_500_groups,
    bench_merge_and_json_round_trip
);
criterion_main!(benches);
