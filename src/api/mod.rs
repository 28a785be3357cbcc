mod axis_config;
mod chart_configuration;
mod chart_type_transition;
mod column_picker;
mod edit_actions;
mod engine;
mod engine_config;
mod entity_options;
mod json_contract;
mod numeric_input;
mod options_merger;
mod partial_update;
mod role_inference;
mod role_map;
mod series_registry;
mod values_registry;
mod visualization;

pub use axis_config::{
    AxisLabels, AxisPatch, AxisRecord, AxisScale, AxisTitle, AxisUpdate, YAxes,
};
pub use chart_configuration::{ChartConfiguration, LegendOptions, SeriesDefaults, Stacking};
pub use chart_type_transition::transition_global_family;
pub use column_picker::{available_columns, conflicting_roles};
pub use edit_actions::EditAction;
pub use engine::{ChartConfigEngine, EditOutcome};
pub use engine_config::{DEFAULT_CUSTOM_CODE, EngineConfig};
pub use entity_options::{SeriesOptions, SeriesOptionsPatch, ValueOptions, ValueOptionsPatch};
pub use json_contract::{CHART_CONFIGURATION_JSON_SCHEMA_V1, ChartConfigurationJsonContractV1};
pub use numeric_input::NumericInput;
pub use options_merger::{MergeOutput, OptionsMerger};
pub use partial_update::PartialUpdate;
pub use role_inference::infer_roles;
pub use role_map::{RoleAssignment, RoleInverse, RoleMap, validate_assignment};
pub use series_registry::{ReconciledSeries, SeriesRegistry, order_series_keys, series_key};
pub use values_registry::{ValuesRegistry, reconcile_value_options};
pub use visualization::{RegistryEntry, StaticRegistry, Visualization, VisualizationRegistry};
