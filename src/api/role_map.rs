use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{ColumnRole, DataSnapshot};
use crate::error::{ConfigError, ConfigResult};

/// Requested column → role changes. `None` removes the column's role.
pub type RoleAssignment = IndexMap<String, Option<ColumnRole>>;

/// Assignment of data columns to semantic roles.
///
/// A column holds at most one role, every role but `y` is held by at most one
/// column, and `y` members keep the order in which they joined.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(
    from = "IndexMap<String, ColumnRole>",
    into = "IndexMap<String, ColumnRole>"
)]
pub struct RoleMap {
    columns: IndexMap<String, ColumnRole>,
}

/// Role → column(s) view of a [`RoleMap`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoleInverse<'a> {
    pub x: Option<&'a str>,
    pub y: Vec<&'a str>,
    pub groupby: Option<&'a str>,
    pub size: Option<&'a str>,
    pub error: Option<&'a str>,
    pub z_value: Option<&'a str>,
}

impl RoleMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `assignment` and returns the resulting map.
    ///
    /// A single-valued role moves to its newly assigned column and is vacated
    /// everywhere else; the last entry wins when the assignment itself names
    /// the same single-valued role twice. When the assignment names `y` at all,
    /// the y set becomes exactly its `y` columns: retained members keep their
    /// position and new ones follow in assignment order. Re-applying the same
    /// assignment is a no-op.
    #[must_use]
    pub fn set_roles(&self, assignment: &RoleAssignment) -> Self {
        let mut columns = self.columns.clone();
        if assignment.values().any(|role| *role == Some(ColumnRole::Y)) {
            columns.retain(|name, held| {
                *held != ColumnRole::Y || assignment.get(name) == Some(&Some(ColumnRole::Y))
            });
        }
        for (column, role) in assignment {
            match role {
                None => {
                    if let Some(previous) = columns.shift_remove(column) {
                        trace!(column = %column, role = %previous, "role cleared");
                    }
                }
                Some(role) => {
                    if !role.is_multi_valued() {
                        columns.retain(|name, held| name == column || *held != *role);
                    }
                    match columns.get(column).copied() {
                        Some(held) if held == *role => {}
                        Some(_) => {
                            columns.shift_remove(column);
                            columns.insert(column.clone(), *role);
                        }
                        None => {
                            columns.insert(column.clone(), *role);
                        }
                    }
                    trace!(column = %column, role = %role, "role assigned");
                }
            }
        }
        Self { columns }
    }

    /// Builds the assignment that turns the y set into exactly `columns`.
    ///
    /// Retained members keep their position; new members are appended in the
    /// given order.
    #[must_use]
    pub fn y_assignment(&self, columns: &[String]) -> RoleAssignment {
        let mut assignment = RoleAssignment::new();
        for current in self.y_columns() {
            if !columns.iter().any(|column| column == current) {
                assignment.insert(current.to_owned(), None);
            }
        }
        for column in columns {
            assignment.insert(column.clone(), Some(ColumnRole::Y));
        }
        assignment
    }

    /// Builds the assignment that moves `role` onto `column`, or clears its
    /// current holder when `column` is `None`.
    #[must_use]
    pub fn single_role_assignment(&self, role: ColumnRole, column: Option<&str>) -> RoleAssignment {
        let mut assignment = RoleAssignment::new();
        match column {
            Some(column) => {
                assignment.insert(column.to_owned(), Some(role));
            }
            None => {
                for holder in self.columns_with(role) {
                    assignment.insert(holder.to_owned(), None);
                }
            }
        }
        assignment
    }

    #[must_use]
    pub fn role_of(&self, column: &str) -> Option<ColumnRole> {
        self.columns.get(column).copied()
    }

    /// First column holding `role`.
    #[must_use]
    pub fn column_for(&self, role: ColumnRole) -> Option<&str> {
        self.columns_with(role).next()
    }

    pub fn columns_with(&self, role: ColumnRole) -> impl Iterator<Item = &str> + '_ {
        self.columns
            .iter()
            .filter(move |(_, held)| **held == role)
            .map(|(column, _)| column.as_str())
    }

    #[must_use]
    pub fn x_column(&self) -> Option<&str> {
        self.column_for(ColumnRole::X)
    }

    #[must_use]
    pub fn y_columns(&self) -> Vec<&str> {
        self.columns_with(ColumnRole::Y).collect()
    }

    #[must_use]
    pub fn groupby_column(&self) -> Option<&str> {
        self.column_for(ColumnRole::Groupby)
    }

    /// Columns currently holding any of `roles`.
    #[must_use]
    pub fn occupied_by(&self, roles: &[ColumnRole]) -> SmallVec<[&str; 4]> {
        self.columns
            .iter()
            .filter(|(_, held)| roles.contains(held))
            .map(|(column, _)| column.as_str())
            .collect()
    }

    #[must_use]
    pub fn inverse(&self) -> RoleInverse<'_> {
        RoleInverse {
            x: self.column_for(ColumnRole::X),
            y: self.y_columns(),
            groupby: self.column_for(ColumnRole::Groupby),
            size: self.column_for(ColumnRole::Size),
            error: self.column_for(ColumnRole::Error),
            z_value: self.column_for(ColumnRole::ZValue),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnRole)> + '_ {
        self.columns
            .iter()
            .map(|(column, role)| (column.as_str(), *role))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Drops roles naming columns absent from `data`. Returns the pruned map
    /// and the dropped column names.
    #[must_use]
    pub fn retain_schema(&self, data: &DataSnapshot) -> (Self, Vec<String>) {
        let mut dropped = Vec::new();
        let columns = self
            .columns
            .iter()
            .filter(|(column, _)| {
                let keep = data.has_column(column);
                if !keep {
                    dropped.push((*column).clone());
                }
                keep
            })
            .map(|(column, role)| (column.clone(), *role))
            .collect();
        (Self { columns }, dropped)
    }

    /// Columns holding a role that `data` does not contain.
    #[must_use]
    pub fn dangling_columns(&self, data: &DataSnapshot) -> Vec<&str> {
        self.columns
            .keys()
            .filter(|column| !data.has_column(column))
            .map(String::as_str)
            .collect()
    }
}

/// Rejects assignments that give a role to a column outside the schema.
///
/// Removals are always accepted so stale roles can be cleared.
pub fn validate_assignment(assignment: &RoleAssignment, data: &DataSnapshot) -> ConfigResult<()> {
    for (column, role) in assignment {
        if let Some(role) = role {
            if !data.has_column(column) {
                return Err(ConfigError::InvalidRoleAssignment {
                    column: column.clone(),
                    role: role.to_string(),
                });
            }
        }
    }
    Ok(())
}

impl From<IndexMap<String, ColumnRole>> for RoleMap {
    fn from(stored: IndexMap<String, ColumnRole>) -> Self {
        let assignment: RoleAssignment = stored
            .into_iter()
            .map(|(column, role)| (column, Some(role)))
            .collect();
        Self::new().set_roles(&assignment)
    }
}

impl From<RoleMap> for IndexMap<String, ColumnRole> {
    fn from(map: RoleMap) -> Self {
        map.columns
    }
}

impl FromIterator<(String, ColumnRole)> for RoleMap {
    fn from_iter<T: IntoIterator<Item = (String, ColumnRole)>>(iter: T) -> Self {
        Self::from(iter.into_iter().collect::<IndexMap<_, _>>())
    }
}
