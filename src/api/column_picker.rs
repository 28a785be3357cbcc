use crate::core::{ColumnRole, ColumnSchema, DataSnapshot};

use super::RoleMap;

/// Roles whose columns the picker for `role` hides.
#[must_use]
pub fn conflicting_roles(role: ColumnRole) -> &'static [ColumnRole] {
    match role {
        ColumnRole::X | ColumnRole::Error => &[ColumnRole::Y, ColumnRole::Groupby],
        ColumnRole::Y => &[ColumnRole::X, ColumnRole::Groupby],
        ColumnRole::Groupby => &[ColumnRole::X, ColumnRole::Y],
        ColumnRole::Size | ColumnRole::ZValue => &[ColumnRole::Y, ColumnRole::Groupby],
    }
}

/// Schema columns the picker for `role` may offer, in schema order.
#[must_use]
pub fn available_columns<'d>(
    role_map: &RoleMap,
    data: &'d DataSnapshot,
    role: ColumnRole,
) -> Vec<&'d ColumnSchema> {
    let occupied = role_map.occupied_by(conflicting_roles(role));
    data.columns()
        .iter()
        .filter(|column| !occupied.contains(&column.name.as_str()))
        .collect()
}
