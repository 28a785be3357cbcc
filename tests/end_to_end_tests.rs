use std::sync::Arc;

use chart_config::api::{AxisPatch, AxisScale, ChartConfigEngine, ChartConfiguration, RoleAssignment};
use chart_config::core::{AxisIndex, ChartFamily, ColumnRole, ColumnSchema, ColumnType, DataSnapshot};
use chart_config::error::ConfigError;
use serde_json::json;

fn monthly() -> DataSnapshot {
    let columns: Vec<ColumnSchema> = serde_json::from_value(json!([
        {"name": "month", "type": "datetime"},
        {"name": "revenue", "type": "number"},
        {"name": "cost", "type": "number"}
    ]))
    .expect("parse schema");
    DataSnapshot::from_json_rows(
        columns,
        &[
            json!({"month": "2024-01-01T00:00:00Z", "revenue": 100, "cost": 60}),
            json!({"month": "2024-02-01T00:00:00Z", "revenue": 120, "cost": 70}),
            json!({"month": "2024-03-01T00:00:00Z", "revenue": 90, "cost": 65}),
            json!({"month": "2024-02-01T00:00:00Z", "revenue": 20, "cost": 10}),
        ],
    )
    .expect("valid rows")
}

fn assign(pairs: &[(&str, Option<ColumnRole>)]) -> RoleAssignment {
    pairs
        .iter()
        .map(|(column, role)| ((*column).to_owned(), *role))
        .collect()
}

#[test]
fn line_to_pie_walkthrough() {
    let data = monthly();
    let engine = ChartConfigEngine::default();
    let empty = Arc::new(ChartConfiguration::for_family(ChartFamily::Line));

    let outcome = engine.set_roles(
        &empty,
        &data,
        assign(&[
            ("month", Some(ColumnRole::X)),
            ("revenue", Some(ColumnRole::Y)),
            ("cost", Some(ColumnRole::Y)),
        ]),
    );
    assert!(outcome.is_applied());
    let line = outcome.snapshot;
    assert_eq!(line.series_display_order(), vec!["revenue", "cost"]);
    for options in line.series_options.values() {
        assert_eq!(options.family, ChartFamily::Line);
        assert_eq!(options.y_axis_index, AxisIndex::Primary);
    }

    let pie = engine.set_global_family(&line, &data, ChartFamily::Pie).snapshot;
    assert!(pie.show_data_labels);
    assert!(
        pie.series_options
            .values()
            .all(|options| options.family == ChartFamily::Pie)
    );
    assert_eq!(
        pie.value_display_order(),
        vec![
            "2024-01-01T00:00:00Z",
            "2024-02-01T00:00:00Z",
            "2024-03-01T00:00:00Z"
        ]
    );
    assert_eq!(line.global_series_type, ChartFamily::Line);
}

#[test]
fn rejected_edit_returns_the_prior_snapshot() {
    let data = monthly();
    let engine = ChartConfigEngine::default();
    let current = engine.derive_initial(&data, ChartFamily::Column, None);

    let outcome = engine.set_roles(
        &current,
        &data,
        assign(&[("quarter", Some(ColumnRole::X))]),
    );
    assert!(!outcome.is_applied());
    assert!(Arc::ptr_eq(&outcome.snapshot, &current));
    assert!(matches!(
        outcome.rejection,
        Some(ConfigError::InvalidRoleAssignment { ref column, .. }) if column == "quarter"
    ));

    let outcome = engine.apply_json(&current, &data, &json!(["not", "an", "object"]));
    assert!(Arc::ptr_eq(&outcome.snapshot, &current));
    assert!(matches!(
        outcome.rejection,
        Some(ConfigError::MalformedPartialUpdate(_))
    ));

    let outcome = engine.apply_json(&current, &data, &json!({"sortX": "sometimes"}));
    assert!(Arc::ptr_eq(&outcome.snapshot, &current));
    assert!(outcome.rejection.is_some());
}

#[test]
fn no_op_edit_keeps_the_same_snapshot() {
    let data = monthly();
    let engine = ChartConfigEngine::default();
    let current = engine.derive_initial(&data, ChartFamily::Line, None);

    let outcome = engine.apply_json(&current, &data, &json!({"sortX": true}));
    assert!(outcome.is_applied());
    assert!(Arc::ptr_eq(&outcome.snapshot, &current));
}

#[test]
fn sequential_edits_are_deterministic() {
    let data = monthly();
    let engine = ChartConfigEngine::default();
    let start = engine.derive_initial(&data, ChartFamily::Line, None);
    let edits = [
        json!({"yAxis": [{"rangeMin": 5}, null]}),
        json!({"yAxis": [null, {"type": "logarithmic"}]}),
        json!({"seriesOptions": {"cost": {"yAxis": 1, "color": "#c0392b"}}}),
        json!({"globalSeriesType": "column", "series": {"stacking": "stack"}}),
    ];

    let run = || {
        edits.iter().fold(Arc::clone(&start), |snapshot, edit| {
            let outcome = engine.apply_json(&snapshot, &data, edit);
            assert!(outcome.is_applied(), "{edit} rejected: {:?}", outcome.rejection);
            outcome.snapshot
        })
    };
    let first = run();
    let second = run();
    assert_eq!(first, second);

    assert_eq!(first.y_axis.primary().range_min, Some(5.0));
    assert_eq!(first.y_axis.secondary().scale, AxisScale::Logarithmic);
    assert_eq!(first.series_options["cost"].y_axis_index, AxisIndex::Secondary);
    assert_eq!(first.series_options["cost"].family, ChartFamily::Column);
    assert_eq!(first.series_options["cost"].color.as_deref(), Some("#c0392b"));
}

#[test]
fn axis_isolation_through_the_engine() {
    let data = monthly();
    let engine = ChartConfigEngine::default();
    let start = engine.derive_initial(&data, ChartFamily::Line, None);

    let first = engine
        .update_y_axis(&start, &data, AxisIndex::Primary, AxisPatch::range_min(5.0))
        .snapshot;
    assert!(Arc::ptr_eq(first.y_axis.secondary(), start.y_axis.secondary()));

    let second = engine
        .update_y_axis(
            &first,
            &data,
            AxisIndex::Secondary,
            AxisPatch::scale(AxisScale::Logarithmic),
        )
        .snapshot;
    assert!(Arc::ptr_eq(second.y_axis.primary(), first.y_axis.primary()));
    assert_eq!(second.y_axis.primary().range_min, Some(5.0));
}

#[test]
fn rebase_prunes_missing_columns_and_keeps_survivors() {
    let data = monthly();
    let engine = ChartConfigEngine::default();
    let start = engine.derive_initial(&data, ChartFamily::Line, None);
    let colored = engine
        .apply_json(
            &start,
            &data,
            &json!({"seriesOptions": {"revenue": {"color": "#2ecc71"}}}),
        )
        .snapshot;

    let narrower = DataSnapshot::from_json_rows(
        vec![
            ColumnSchema::new("month", ColumnType::Datetime),
            ColumnSchema::new("revenue", ColumnType::Float),
        ],
        &[json!({"month": "2024-04-01", "revenue": 130})],
    )
    .expect("valid rows");
    let rebased = engine.rebase_on_data(&colored, &narrower);

    assert!(rebased.column_mapping.dangling_columns(&narrower).is_empty());
    assert_eq!(rebased.series_display_order(), vec!["revenue"]);
    assert!(Arc::ptr_eq(
        &rebased.series_options["revenue"],
        &colored.series_options["revenue"]
    ));
    engine
        .render_frame(&rebased, &narrower)
        .expect("rebased configuration renders");

    let unchanged = engine.rebase_on_data(&rebased, &narrower);
    assert!(Arc::ptr_eq(&unchanged, &rebased));
}

#[test]
fn derive_initial_respects_registry_defaults() {
    let data = monthly();
    let engine = ChartConfigEngine::default();
    let mut base = ChartConfiguration::for_family(ChartFamily::Line);
    base.legend.enabled = false;
    base.column_mapping = base.column_mapping.set_roles(&assign(&[
        ("month", Some(ColumnRole::X)),
        ("cost", Some(ColumnRole::Y)),
        ("gone", Some(ColumnRole::Groupby)),
    ]));

    let derived = engine.derive_initial(&data, ChartFamily::Bar, Some(base));
    assert_eq!(derived.global_series_type, ChartFamily::Bar);
    assert!(!derived.legend.enabled);
    assert_eq!(derived.column_mapping.y_columns(), vec!["cost"]);
    assert_eq!(derived.column_mapping.groupby_column(), None);
    assert_eq!(derived.series_options["cost"].family, ChartFamily::Bar);
}
