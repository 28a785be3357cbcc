use std::sync::Arc;

use chart_config::api::{ChartConfigEngine, ChartConfiguration, EngineConfig, RoleAssignment};
use chart_config::core::{ChartFamily, ColumnRole, ColumnSchema, ColumnType, DataSnapshot};
use chart_config::error::ConfigError;
use chart_config::render::{NullRenderer, RenderFrame, render_configuration};
use serde_json::json;

fn browsers() -> DataSnapshot {
    DataSnapshot::from_json_rows(
        vec![
            ColumnSchema::new("browser", ColumnType::String),
            ColumnSchema::new("visits", ColumnType::Integer),
        ],
        &[
            json!({"browser": "firefox", "visits": 10}),
            json!({"browser": "chrome", "visits": 30}),
            json!({"browser": "safari", "visits": 8}),
        ],
    )
    .expect("valid rows")
}

#[test]
fn pie_frame_lists_series_and_sorted_values() {
    let data = browsers();
    let engine = ChartConfigEngine::default();
    let config = engine.derive_initial(&data, ChartFamily::Pie, None);

    let frame = RenderFrame::build(&config, &data).expect("frame");
    assert_eq!(frame.family, ChartFamily::Pie);
    assert_eq!(frame.columns.x.as_deref(), Some("browser"));
    assert_eq!(frame.columns.y, vec!["visits"]);
    assert_eq!(
        frame.series.iter().map(|s| s.key.as_str()).collect::<Vec<_>>(),
        vec!["visits"]
    );
    assert_eq!(
        frame.values.iter().map(|v| v.key.as_str()).collect::<Vec<_>>(),
        vec!["chrome", "firefox", "safari"]
    );

    let mut renderer = NullRenderer::default();
    render_configuration(&mut renderer, &config, &data).expect("render");
    assert_eq!(renderer.last_series_count, 1);
    assert_eq!(renderer.last_value_count, 3);
    assert_eq!(renderer.last_row_count, 3);
}

#[test]
fn dangling_role_fails_frame_build() {
    let data = browsers();
    let mut config = ChartConfiguration::default();
    let assignment: RoleAssignment = [("os".to_owned(), Some(ColumnRole::X))]
        .into_iter()
        .collect();
    config.column_mapping = config.column_mapping.set_roles(&assignment);

    let err = RenderFrame::build(&config, &data).expect_err("dangling role");
    assert!(matches!(err, ConfigError::InvalidData(ref message) if message.contains("os")));
}

#[test]
fn series_without_options_fails_frame_build() {
    let data = browsers();
    let engine = ChartConfigEngine::default();
    let config = engine.derive_initial(&data, ChartFamily::Column, None);
    let mut broken = ChartConfiguration::clone(&config);
    broken.series_options.clear();

    assert!(RenderFrame::build(&config, &data).is_ok());
    assert!(RenderFrame::build(&broken, &data).is_err());
}

#[test]
fn frame_shares_axis_records_with_the_snapshot() {
    let data = browsers();
    let engine = ChartConfigEngine::default();
    let config = engine.derive_initial(&data, ChartFamily::Line, None);
    let frame = engine.render_frame(&config, &data).expect("frame");
    assert!(Arc::ptr_eq(&frame.x_axis, &config.x_axis));
    assert!(frame.values.is_empty());
    assert!(frame.affordances.legend);
}

#[test]
fn capped_engine_frames_match_capped_reconcile() {
    let data = browsers();
    let engine = ChartConfigEngine::new(EngineConfig::default().with_max_category_values(Some(2)));
    let config = engine.derive_initial(&data, ChartFamily::Pie, None);
    assert_eq!(config.values_options.len(), 2);

    let frame = engine.render_frame(&config, &data).expect("capped frame");
    assert_eq!(frame.values.len(), 2);
    assert!(RenderFrame::build(&config, &data).is_err());
}
