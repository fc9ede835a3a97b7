//! Level arithmetic over workspace numbers.
//!
//! A level is a band of [`LEVEL_SIZE`] consecutive workspace numbers. Numbers
//! `100..=199` belong to level 1, `200..=299` to level 2, and so on. Floor
//! division keeps the `-1` that i3 reports for unnumbered workspaces out of
//! level 0.

use crate::constants::LEVEL_SIZE;
use crate::wm::Workspace;

/// Workspace number as reported by the window manager.
pub type WorkspaceNumber = i32;

/// Index of a level.
pub type Level = i32;

/// Returns the level a workspace number belongs to.
#[must_use]
pub const fn level_of(number: WorkspaceNumber) -> Level { number.div_euclid(LEVEL_SIZE) }

/// Returns `true` if both numbers belong to the same level.
#[must_use]
pub const fn is_same_level(a: WorkspaceNumber, b: WorkspaceNumber) -> bool {
    level_of(a) == level_of(b)
}

/// Returns the first workspace number of a level, or `None` if it does not
/// fit in a [`WorkspaceNumber`].
#[must_use]
pub const fn first_number_of(level: Level) -> Option<WorkspaceNumber> {
    match level.checked_mul(LEVEL_SIZE) {
        Some(base) => base.checked_add(1),
        None => None,
    }
}

/// Returns the number directly after `number`, or `None` at `i32::MAX`.
#[must_use]
pub const fn next_number(number: WorkspaceNumber) -> Option<WorkspaceNumber> {
    number.checked_add(1)
}

/// Returns the contiguous run that starts at `start`.
///
/// The run is the longest slice `workspaces[start..end]` in which every entry
/// is exactly one more than the entry before it and stays in the level of
/// `workspaces[start - 1]`, the anchor. With `start == 0` the first entry is
/// its own anchor. An out-of-range `start` yields an empty run.
#[must_use]
pub fn contiguous_run(workspaces: &[Workspace], start: usize) -> &[Workspace] {
    if start >= workspaces.len() {
        return &[];
    }

    let anchor = workspaces[start.saturating_sub(1)].num;
    let mut end = start;
    while end < workspaces.len() {
        let current = workspaces[end].num;
        let follows = end == 0 || next_number(workspaces[end - 1].num) == Some(current);
        if !follows || !is_same_level(current, anchor) {
            break;
        }
        end += 1;
    }

    &workspaces[start..end]
}

/// Returns `true` if no workspace in the snapshot belongs to `level`.
#[must_use]
pub fn is_level_empty(workspaces: &[Workspace], level: Level) -> bool {
    !workspaces.iter().any(|w| level_of(w.num) == level)
}
