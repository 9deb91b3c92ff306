//! Sort direction cycling and single-column sort state.

use serde::{Deserialize, Serialize};

use crate::state::Mode;

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Computes the next direction for a column the user just toggled.
///
/// Client mode cycles `None -> Asc -> Desc -> None`. Server mode has no
/// unsorted state once a column was selected: an unselected column starts at
/// `Asc`, then toggles `Asc <-> Desc` indefinitely. `current` is the toggled
/// column's own direction, so selecting a different column (current `None`)
/// starts at `Asc` in either mode.
pub fn next_direction(mode: Mode, current: Option<SortDirection>) -> Option<SortDirection> {
    match (mode, current) {
        (_, None) => Some(SortDirection::Asc),
        (Mode::Client, Some(SortDirection::Asc)) => Some(SortDirection::Desc),
        (Mode::Client, Some(SortDirection::Desc)) => None,
        (Mode::Server, Some(current)) => Some(current.flipped()),
    }
}

/// Sort state: at most one column is sorted at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<(String, SortDirection)>,
}

impl SortState {
    /// The active sort column and direction, if any.
    pub fn active(&self) -> Option<(&str, SortDirection)> {
        self.active.as_ref().map(|(id, dir)| (id.as_str(), *dir))
    }

    /// The direction of a specific column, `None` if it is not the active
    /// sort column.
    pub fn direction_of(&self, column_id: &str) -> Option<SortDirection> {
        match &self.active {
            Some((id, dir)) if id == column_id => Some(*dir),
            _ => None,
        }
    }

    /// Advance the cycle for a column, clearing any other column's sort.
    ///
    /// Returns the column's new direction (`None` when a client-mode cycle
    /// returns to unsorted).
    pub(crate) fn toggle(&mut self, mode: Mode, column_id: &str) -> Option<SortDirection> {
        let next = next_direction(mode, self.direction_of(column_id));
        self.active = next.map(|dir| (column_id.to_string(), dir));
        next
    }
}
