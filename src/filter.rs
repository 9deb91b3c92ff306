//! Filter state: per-column values plus one global search string.

use std::collections::HashMap;

use crate::value::CellValue;

/// Filter state for one table instance.
///
/// Holds per-column filter values and the distinguished global filter. The
/// global filter matches any column unless the table was configured with a
/// dedicated search column, in which case the engine routes search input to
/// that column's filter instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    columns: HashMap<String, String>,
    global: String,
}

impl FilterState {
    /// The global filter string.
    pub fn global(&self) -> &str {
        &self.global
    }

    /// The filter value for a specific column, if set.
    pub fn column(&self, column_id: &str) -> Option<&str> {
        self.columns.get(column_id).map(String::as_str)
    }

    /// All active per-column filters.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns `true` if no filter is active.
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.columns.is_empty()
    }

    /// Set the global filter. Returns whether the state changed.
    pub(crate) fn set_global(&mut self, value: &str) -> bool {
        if self.global == value {
            return false;
        }
        self.global = value.to_string();
        true
    }

    /// Set a column filter. An empty value clears the entry.
    /// Returns whether the state changed.
    pub(crate) fn set_column(&mut self, column_id: &str, value: &str) -> bool {
        if value.is_empty() {
            return self.columns.remove(column_id).is_some();
        }
        if self.columns.get(column_id).is_some_and(|v| v == value) {
            return false;
        }
        self.columns.insert(column_id.to_string(), value.to_string());
        true
    }
}

/// Case-insensitive substring match against a cell's display form.
///
/// An empty needle matches everything.
pub fn cell_matches(cell: &CellValue, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    cell.to_string()
        .to_lowercase()
        .contains(&needle.to_lowercase())
}
