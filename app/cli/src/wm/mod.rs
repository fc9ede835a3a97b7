//! Window manager collaborator.
//!
//! The navigation engine only ever talks to the window manager through the
//! [`WindowManager`] trait: one query for the ordered workspace list and three
//! imperative commands. [`I3Msg`] implements it on top of `i3-msg`/`swaymsg`.

mod i3;

use serde::{Deserialize, Serialize};

pub use i3::{I3Msg, parse_command_replies, parse_workspaces};

use crate::error::LevelsResult;
use crate::levels::WorkspaceNumber;

/// One workspace as reported by the window manager at query time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workspace {
    /// Window manager internal id.
    pub id: i64,
    /// Workspace number; `-1` when the workspace name has no numeric prefix.
    pub num: WorkspaceNumber,
    /// Full workspace name.
    pub name: String,
    /// Whether the workspace is visible on its output.
    pub visible: bool,
    /// Whether the workspace holds input focus.
    pub focused: bool,
    /// Whether a window on the workspace demands attention.
    pub urgent: bool,
    /// Name of the output the workspace lives on.
    pub output: String,
}

impl Workspace {
    /// Builds an unfocused workspace whose name is its number.
    #[must_use]
    pub fn numbered(num: WorkspaceNumber) -> Self {
        Self {
            id: i64::from(num),
            num,
            name: num.to_string(),
            ..Self::default()
        }
    }

    /// Returns the same workspace marked as focused and visible.
    #[must_use]
    pub fn into_focused(self) -> Self {
        Self {
            focused: true,
            visible: true,
            ..self
        }
    }
}

/// The ordered workspace list for one directive.
///
/// Order is exactly what the window manager returned and is never re-sorted:
/// it defines adjacency for stepping and where level boundaries fall.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    workspaces: Vec<Workspace>,
}

impl Snapshot {
    /// Wraps a workspace list without reordering it.
    #[must_use]
    pub const fn new(workspaces: Vec<Workspace>) -> Self { Self { workspaces } }

    /// Returns the workspaces in window manager order.
    #[must_use]
    pub fn workspaces(&self) -> &[Workspace] { &self.workspaces }

    /// Returns the workspace at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Workspace> { self.workspaces.get(index) }

    /// Returns the index of the focused workspace.
    ///
    /// If several workspaces claim focus, the first one wins.
    #[must_use]
    pub fn focused_index(&self) -> Option<usize> { self.workspaces.iter().position(|w| w.focused) }

    /// Returns the focused workspace together with its index.
    #[must_use]
    pub fn focused(&self) -> Option<(usize, &Workspace)> {
        self.focused_index().map(|index| (index, &self.workspaces[index]))
    }
}

impl From<Vec<Workspace>> for Snapshot {
    fn from(workspaces: Vec<Workspace>) -> Self { Self::new(workspaces) }
}

/// Query and command channel to the window manager.
pub trait WindowManager {
    /// Returns every workspace in the window manager's canonical order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query cannot be issued or its reply cannot be parsed.
    fn workspaces(&self) -> LevelsResult<Vec<Workspace>>;

    /// Renames the workspace currently numbered `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if the window manager rejects the rename.
    fn rename_workspace(&self, from: WorkspaceNumber, to: WorkspaceNumber) -> LevelsResult<()>;

    /// Switches focus to workspace `number`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the window manager rejects the switch.
    fn focus_workspace(&self, number: WorkspaceNumber) -> LevelsResult<()>;

    /// Moves the focused container to workspace `number` without following it.
    ///
    /// # Errors
    ///
    /// Returns an error if the window manager rejects the move.
    fn move_container_to(&self, number: WorkspaceNumber) -> LevelsResult<()>;

    /// Queries the workspace list and wraps it in a [`Snapshot`].
    ///
    /// # Errors
    ///
    /// Propagates any error from [`WindowManager::workspaces`].
    fn snapshot(&self) -> LevelsResult<Snapshot> { self.workspaces().map(Snapshot::new) }
}
