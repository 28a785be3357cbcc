use tracing::trace;

use crate::core::{ColumnRole, ColumnSchema, DataSnapshot};

use super::RoleMap;

/// Initial role guess for a fresh configuration.
///
/// x goes to the first temporal column, else the first non-numeric one, else
/// the first column; every other numeric column becomes a y member.
#[must_use]
pub fn infer_roles(data: &DataSnapshot) -> RoleMap {
    let columns = data.columns();
    let x = columns
        .iter()
        .find(|column| column.column_type.is_temporal())
        .or_else(|| {
            columns
                .iter()
                .find(|column| !column.column_type.is_numeric())
        })
        .or_else(|| columns.first());

    let x_name = x.map(|column| column.name.as_str());
    let roles: RoleMap = x_name
        .map(|name| (name.to_owned(), ColumnRole::X))
        .into_iter()
        .chain(
            columns
                .iter()
                .filter(|column| is_y_candidate(column, x_name))
                .map(|column| (column.name.clone(), ColumnRole::Y)),
        )
        .collect();
    trace!(x = ?x_name, y = roles.y_columns().len(), "roles inferred from schema");
    roles
}

fn is_y_candidate(column: &ColumnSchema, x: Option<&str>) -> bool {
    column.column_type.is_numeric() && Some(column.name.as_str()) != x
}
