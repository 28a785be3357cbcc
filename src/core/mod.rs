pub mod family;
pub mod scalar;
pub mod schema;
pub mod types;

pub use family::{ChartFamily, ColorEditorTarget, FamilyAffordances};
pub use scalar::Scalar;
pub use schema::{ColumnSchema, ColumnType, DataSnapshot, Row};
pub use types::{AxisIndex, ColumnRole};
