//! chart-config-rs: chart configuration engine for tabular query results.
//!
//! Derives a structurally valid chart configuration from a data schema and a
//! chart family, keeps it consistent across incremental edits, and carries
//! per-series, per-value and per-axis settings across role and family changes.
//! Every operation is a pure function from (snapshot, data, edit) to the next
//! immutable snapshot.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfigEngine, ChartConfiguration, EditAction, EditOutcome, PartialUpdate};
pub use error::{ConfigError, ConfigResult};
