//! Navigation engine.
//!
//! Each directive is one read-compute-act cycle: query the workspace list,
//! find the focused workspace, work out a target number with the level
//! model, then issue window manager commands. The engine keeps no state of
//! its own; level-visit memory lives behind a [`LevelVisitStore`].
//!
//! Every operation returns the workspace number it switched to, or `None`
//! when there was nothing to do (no focused workspace, an edge of the list,
//! a level boundary in the way).

mod shift;

pub use shift::shift_up;

use crate::constants::MAX_LEVELS;
use crate::directive::{Direction, Directive};
use crate::error::{LevelsError, LevelsResult};
use crate::levels::{
    Level, WorkspaceNumber, contiguous_run, first_number_of, is_level_empty, is_same_level,
    level_of, next_number,
};
use crate::state::LevelVisitStore;
use crate::wm::{Snapshot, WindowManager, Workspace};

/// Executes directives against a window manager and a level-visit store.
pub struct Navigator<'a, W: ?Sized, S: ?Sized> {
    wm: &'a W,
    store: &'a S,
}

impl<'a, W, S> Navigator<'a, W, S>
where
    W: WindowManager + ?Sized,
    S: LevelVisitStore + ?Sized,
{
    /// Creates a navigator over the given collaborators.
    #[must_use]
    pub const fn new(wm: &'a W, store: &'a S) -> Self { Self { wm, store } }

    /// Runs a directive, optionally carrying the focused container along.
    ///
    /// # Errors
    ///
    /// Returns an error if the window manager fails or, for
    /// [`Directive::NewLevel`], no empty level exists below the search bound.
    pub fn run(
        &self,
        directive: Directive,
        move_container: bool,
    ) -> LevelsResult<Option<WorkspaceNumber>> {
        tracing::debug!(%directive, move_container, "running directive");
        match directive {
            Directive::Right => self.move_by(Direction::Right, move_container),
            Directive::Left => self.move_by(Direction::Left, move_container),
            Directive::Insert => self.insert(move_container),
            Directive::Endsert => self.endsert(move_container),
            Directive::NewLevel => self.insert_level(move_container),
            Directive::Down => self.move_level_down(move_container),
            Directive::Up => self.move_level_up(move_container),
        }
    }

    /// Steps to the neighbouring workspace without leaving the current level.
    ///
    /// # Errors
    ///
    /// Returns an error if the window manager query or switch fails.
    pub fn move_by(
        &self,
        direction: Direction,
        move_container: bool,
    ) -> LevelsResult<Option<WorkspaceNumber>> {
        let snapshot = self.wm.snapshot()?;
        let Some((index, current)) = snapshot.focused() else {
            return Ok(none_focused());
        };

        let Some(next) = index.checked_add_signed(direction.offset()).and_then(|i| snapshot.get(i))
        else {
            tracing::debug!(?direction, "already at the edge of the workspace list");
            return Ok(None);
        };

        if !is_same_level(next.num, current.num) {
            tracing::debug!(?direction, from = current.num, "next workspace is on another level");
            return Ok(None);
        }

        self.switch_to(next.num, move_container).map(Some)
    }

    /// Opens a new workspace directly after the focused one.
    ///
    /// Workspaces numbered consecutively after the focused one on the same
    /// level are shifted up by one to make room. Nothing happens if that would
    /// push a number past `i32::MAX`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query, any rename, or the switch fails.
    pub fn insert(&self, move_container: bool) -> LevelsResult<Option<WorkspaceNumber>> {
        let snapshot = self.wm.snapshot()?;
        let Some((index, focused)) = snapshot.focused() else {
            return Ok(none_focused());
        };

        let run = contiguous_run(snapshot.workspaces(), index + 1);
        let highest = run.last().unwrap_or(focused);
        let (Some(target), Some(_)) = (next_number(focused.num), next_number(highest.num)) else {
            return Ok(number_exhausted(highest.num));
        };

        shift_up(self.wm, run)?;

        self.switch_to(target, move_container).map(Some)
    }

    /// Opens a new workspace after the last one on the focused level.
    ///
    /// Nothing happens if that workspace is numbered `i32::MAX`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or the switch fails.
    pub fn endsert(&self, move_container: bool) -> LevelsResult<Option<WorkspaceNumber>> {
        let snapshot = self.wm.snapshot()?;
        let Some((index, focused)) = snapshot.focused() else {
            return Ok(none_focused());
        };

        let workspaces = snapshot.workspaces();
        let last_on_level = workspaces[index..]
            .iter()
            .take_while(|w| is_same_level(w.num, focused.num))
            .last()
            .unwrap_or(focused);

        let Some(target) = next_number(last_on_level.num) else {
            return Ok(number_exhausted(last_on_level.num));
        };

        self.switch_to(target, move_container).map(Some)
    }

    /// Opens the first workspace of the nearest level below the focused one
    /// that has no workspaces.
    ///
    /// The focused workspace is remembered for its level before leaving.
    ///
    /// # Errors
    ///
    /// Returns [`LevelsError::NoEmptyLevel`] if every level up to
    /// [`MAX_LEVELS`] is occupied, or a window manager error.
    pub fn insert_level(&self, move_container: bool) -> LevelsResult<Option<WorkspaceNumber>> {
        let snapshot = self.wm.snapshot()?;
        let Some((_, focused)) = snapshot.focused() else {
            return Ok(none_focused());
        };

        let target = (level_of(focused.num) + 1..MAX_LEVELS)
            .find(|&level| is_level_empty(snapshot.workspaces(), level))
            .and_then(first_number_of)
            .ok_or(LevelsError::NoEmptyLevel { searched: MAX_LEVELS })?;

        self.record_departure(focused);
        self.switch_to(target, move_container).map(Some)
    }

    /// Moves to the nearest populated level after the focused one.
    ///
    /// # Errors
    ///
    /// Returns an error if the window manager query or switch fails.
    pub fn move_level_down(&self, move_container: bool) -> LevelsResult<Option<WorkspaceNumber>> {
        let snapshot = self.wm.snapshot()?;
        let Some((index, focused)) = snapshot.focused() else {
            return Ok(none_focused());
        };

        let current = level_of(focused.num);
        let target = snapshot.workspaces()[index + 1..]
            .iter()
            .map(|w| level_of(w.num))
            .find(|&level| level > current);

        self.cross_to(&snapshot, focused, target, move_container)
    }

    /// Moves to the nearest populated level before the focused one.
    ///
    /// # Errors
    ///
    /// Returns an error if the window manager query or switch fails.
    pub fn move_level_up(&self, move_container: bool) -> LevelsResult<Option<WorkspaceNumber>> {
        let snapshot = self.wm.snapshot()?;
        let Some((index, focused)) = snapshot.focused() else {
            return Ok(none_focused());
        };

        let current = level_of(focused.num);
        let target = snapshot.workspaces()[..index]
            .iter()
            .rev()
            .map(|w| level_of(w.num))
            .find(|&level| level < current);

        self.cross_to(&snapshot, focused, target, move_container)
    }

    /// Switches to `target`, preferring the workspace last visited there.
    ///
    /// Falls back to the first workspace of the level in snapshot order, and
    /// does nothing if the level has neither.
    ///
    /// # Errors
    ///
    /// Returns an error if the switch fails.
    pub fn move_to_level(
        &self,
        snapshot: &Snapshot,
        target: Level,
        move_container: bool,
    ) -> LevelsResult<Option<WorkspaceNumber>> {
        if let Some(remembered) = self.store.load().last_visited(target) {
            tracing::debug!(level = target, workspace = remembered, "restoring last visited workspace");
            return self.switch_to(remembered, move_container).map(Some);
        }

        match snapshot.workspaces().iter().find(|w| level_of(w.num) == target) {
            Some(first) => self.switch_to(first.num, move_container).map(Some),
            None => {
                tracing::debug!(level = target, "level has no workspace to move to");
                Ok(None)
            }
        }
    }

    fn cross_to(
        &self,
        snapshot: &Snapshot,
        focused: &Workspace,
        target: Option<Level>,
        move_container: bool,
    ) -> LevelsResult<Option<WorkspaceNumber>> {
        let Some(target) = target else {
            tracing::debug!(from = focused.num, "no level to move to");
            return Ok(None);
        };

        self.record_departure(focused);
        self.move_to_level(snapshot, target, move_container)
    }

    fn record_departure(&self, focused: &Workspace) {
        self.store.record(level_of(focused.num), focused.num);
    }

    fn switch_to(&self, number: WorkspaceNumber, move_container: bool) -> LevelsResult<WorkspaceNumber> {
        if move_container {
            // The focus switch still happens when the container cannot follow.
            if let Err(err) = self.wm.move_container_to(number) {
                tracing::warn!(error = %err, workspace = number, "failed to move container");
            }
        }
        self.wm.focus_workspace(number)?;
        tracing::info!(workspace = number, move_container, "switched workspace");
        Ok(number)
    }
}

fn none_focused() -> Option<WorkspaceNumber> {
    tracing::debug!("no focused workspace, nothing to do");
    None
}

fn number_exhausted(highest: WorkspaceNumber) -> Option<WorkspaceNumber> {
    tracing::warn!(workspace = highest, "no workspace number left after this one");
    None
}
