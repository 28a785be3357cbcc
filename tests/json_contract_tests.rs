use chart_config::api::{
    CHART_CONFIGURATION_JSON_SCHEMA_V1, ChartConfigEngine, ChartConfiguration,
};
use chart_config::core::{AxisIndex, ChartFamily, ColumnRole};
use serde_json::{Value, json};

const STORED: &str = r##"{
  "globalSeriesType": "column",
  "columnMapping": {"month": "x", "revenue": "y", "cost": "y", "err": "yError"},
  "seriesOptions": {
    "revenue": {"type": "column", "yAxis": 0, "zIndex": 0, "color": "#356aff", "index": 0},
    "cost": {"type": "line", "yAxis": 1, "zIndex": 1, "index": 1}
  },
  "valuesOptions": {},
  "xAxis": {"type": "datetime", "labels": {"enabled": true}},
  "yAxis": [{"type": "linear", "rangeMin": "0"}, {"type": "linear", "opposite": true}],
  "legend": {"enabled": true, "placement": "auto"},
  "series": {"stacking": null, "error_y": {"type": "data", "visible": true}},
  "showDataLabels": false,
  "dateTImeFormat": "DD/MM/YYYY HH:mm",
  "xAxisLabelLength": "300",
  "minColumns": 1,
  "error_y": {"type": "data"}
}"##;

#[test]
fn legacy_payload_loads_with_typed_fields() {
    let config = ChartConfiguration::from_json_str(STORED).expect("parse stored options");

    assert_eq!(config.global_series_type, ChartFamily::Column);
    assert_eq!(config.column_mapping.role_of("err"), Some(ColumnRole::Error));
    assert_eq!(config.series_options["cost"].family, ChartFamily::Line);
    assert_eq!(config.series_options["cost"].y_axis_index, AxisIndex::Secondary);
    assert_eq!(config.y_axis.primary().range_min, Some(0.0));
    assert_eq!(config.date_time_format, None);
    assert_eq!(
        config.effective_date_time_format(),
        Some("DD/MM/YYYY HH:mm")
    );
    assert_eq!(config.x_axis_label_length, Some(300));
    assert!(config.sort_x);
}

#[test]
fn unknown_fields_survive_load_edit_save() {
    let data = chart_config::core::DataSnapshot::new(
        vec![
            chart_config::core::ColumnSchema::new(
                "month",
                chart_config::core::ColumnType::Datetime,
            ),
            chart_config::core::ColumnSchema::new("revenue", chart_config::core::ColumnType::Float),
            chart_config::core::ColumnSchema::new("cost", chart_config::core::ColumnType::Float),
            chart_config::core::ColumnSchema::new("err", chart_config::core::ColumnType::Float),
        ],
        Vec::new(),
    );
    let engine = ChartConfigEngine::default();
    let loaded = std::sync::Arc::new(ChartConfiguration::from_json_str(STORED).expect("parse"));
    let edited = engine
        .apply_json(&loaded, &data, &json!({"legend": {"enabled": false, "placement": "auto"}}))
        .snapshot;

    let saved: Value = edited.to_json_value().expect("serialize");
    assert_eq!(saved["minColumns"], 1);
    assert_eq!(saved["error_y"], json!({"type": "data"}));
    assert_eq!(saved["series"]["error_y"]["visible"], true);
    assert_eq!(saved["seriesOptions"]["revenue"]["index"], 0);
    assert_eq!(saved["yAxis"][1]["opposite"], true);
    assert_eq!(saved["legend"], json!({"enabled": false, "placement": "auto"}));
    assert_eq!(saved["dateTImeFormat"], "DD/MM/YYYY HH:mm");
    assert!(saved.get("dateTimeFormat").is_none());
}

#[test]
fn both_datetime_format_keys_load_and_survive_save() {
    let stored = r#"{"globalSeriesType":"line","dateTimeFormat":"DD/MM/YY HH:mm","dateTImeFormat":"YYYY"}"#;
    let config = ChartConfiguration::from_json_str(stored).expect("both keys parse");
    assert_eq!(config.date_time_format.as_deref(), Some("DD/MM/YY HH:mm"));
    assert_eq!(config.legacy_date_time_format.as_deref(), Some("YYYY"));
    assert_eq!(config.effective_date_time_format(), Some("DD/MM/YY HH:mm"));

    let compat = ChartConfiguration::from_json_compat_str(stored).expect("compat parse");
    assert_eq!(compat, config);

    let saved = config.to_json_value().expect("serialize");
    assert_eq!(saved["dateTimeFormat"], "DD/MM/YY HH:mm");
    assert_eq!(saved["dateTImeFormat"], "YYYY");
}

#[test]
fn datetime_format_edit_overrides_the_legacy_key() {
    let data = chart_config::core::DataSnapshot::new(Vec::new(), Vec::new());
    let loaded = std::sync::Arc::new(ChartConfiguration::from_json_str(STORED).expect("parse"));
    let edited = ChartConfigEngine::default()
        .apply_json(&loaded, &data, &json!({"dateTimeFormat": "HH:mm"}))
        .snapshot;

    assert_eq!(edited.effective_date_time_format(), Some("HH:mm"));
    assert_eq!(
        edited.legacy_date_time_format.as_deref(),
        Some("DD/MM/YYYY HH:mm")
    );
}

#[test]
fn serialize_deserialize_serialize_is_byte_identical() {
    let config = ChartConfiguration::from_json_str(STORED).expect("parse");
    let first = config.to_json_pretty().expect("serialize");
    let reloaded = ChartConfiguration::from_json_str(&first).expect("reparse");
    let second = reloaded.to_json_pretty().expect("serialize again");

    assert_eq!(first, second);
    assert_eq!(reloaded, config);
}

#[test]
fn contract_v1_wraps_and_unwraps() {
    let config = ChartConfiguration::from_json_str(STORED).expect("parse");
    let contract = config.to_json_contract_v1_pretty().expect("contract");
    let envelope: Value = serde_json::from_str(&contract).expect("json");
    assert_eq!(envelope["schemaVersion"], CHART_CONFIGURATION_JSON_SCHEMA_V1);
    assert_eq!(envelope["options"]["globalSeriesType"], "column");

    assert_eq!(
        ChartConfiguration::from_json_compat_str(&contract).expect("from contract"),
        config
    );
    assert_eq!(
        ChartConfiguration::from_json_compat_str(STORED).expect("from bare"),
        config
    );
}

#[test]
fn unsupported_contract_version_is_rejected() {
    let payload = json!({"schemaVersion": 2, "options": {}}).to_string();
    let err = ChartConfiguration::from_json_compat_str(&payload).expect_err("version 2");
    assert!(err.to_string().contains("unsupported"));
}

#[test]
fn defaults_fill_missing_fields() {
    let config = ChartConfiguration::from_json_str("{}").expect("parse empty");
    assert_eq!(config, ChartConfiguration::default());
    assert_eq!(config.global_series_type, ChartFamily::Line);
    assert!(config.legend.enabled);
}

#[test]
fn unknown_chart_family_survives_load_edit_save() {
    let stored = r#"{"globalSeriesType":"sunburst","seriesOptions":{"revenue":{"type":"treemap","yAxis":0,"zIndex":0}}}"#;
    let loaded = std::sync::Arc::new(ChartConfiguration::from_json_str(stored).expect("parse"));
    assert_eq!(
        loaded.global_series_type,
        ChartFamily::Other("sunburst".to_owned())
    );
    assert!(loaded.affordances().axes);

    let data = chart_config::core::DataSnapshot::new(Vec::new(), Vec::new());
    let edited = ChartConfigEngine::default()
        .apply_json(&loaded, &data, &json!({"sortX": false}))
        .snapshot;

    let saved = edited.to_json_value().expect("serialize");
    assert_eq!(saved["globalSeriesType"], "sunburst");
    assert_eq!(saved["seriesOptions"]["revenue"]["type"], "treemap");
    assert_eq!(saved["sortX"], false);
}
