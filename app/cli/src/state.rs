//! Level-visit memory.
//!
//! Remembers, per level, the workspace that was focused when the user last
//! left that level. Re-entering the level restores that workspace instead of
//! landing on its first one.
//!
//! The store never fails from the caller's point of view. Reads that go wrong
//! (missing file, unreadable, corrupt) come back as [`StoredState::Absent`];
//! writes that go wrong are logged and dropped, since navigation has already
//! happened by the time memory is updated.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::levels::{Level, WorkspaceNumber, level_of};

/// Persisted mapping from level to the last workspace visited on it.
///
/// Every entry satisfies `level == level_of(workspace)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelVisitState {
    #[serde(rename = "LastWorkspaceVisitedByLevel", default)]
    last_visited_by_level: BTreeMap<Level, WorkspaceNumber>,
}

impl LevelVisitState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Returns the workspace last visited on `level`, if recorded.
    #[must_use]
    pub fn last_visited(&self, level: Level) -> Option<WorkspaceNumber> {
        self.last_visited_by_level.get(&level).copied()
    }

    /// Upserts the entry for `level`.
    ///
    /// Returns `false` and leaves the state untouched when `workspace` does not
    /// belong to `level`.
    pub fn insert(&mut self, level: Level, workspace: WorkspaceNumber) -> bool {
        if level_of(workspace) != level {
            return false;
        }
        self.last_visited_by_level.insert(level, workspace);
        true
    }

    /// Drops entries whose workspace is not on the level they are stored under.
    ///
    /// Returns the number of entries removed.
    pub fn retain_consistent(&mut self) -> usize {
        let before = self.last_visited_by_level.len();
        self.last_visited_by_level.retain(|&level, &mut workspace| level_of(workspace) == level);
        before - self.last_visited_by_level.len()
    }

    /// Iterates over `(level, workspace)` entries in ascending level order.
    pub fn entries(&self) -> impl Iterator<Item = (Level, WorkspaceNumber)> + '_ {
        self.last_visited_by_level.iter().map(|(&level, &workspace)| (level, workspace))
    }

    /// Returns the number of remembered levels.
    #[must_use]
    pub fn len(&self) -> usize { self.last_visited_by_level.len() }

    /// Returns `true` if no level is remembered.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.last_visited_by_level.is_empty() }
}

/// Outcome of loading the level-visit state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredState {
    /// State was read successfully.
    Present(LevelVisitState),
    /// Nothing usable was stored; the reason has already been logged.
    Absent,
}

impl StoredState {
    /// Returns the loaded state, or an empty one when absent.
    #[must_use]
    pub fn unwrap_or_default(self) -> LevelVisitState {
        match self {
            Self::Present(state) => state,
            Self::Absent => LevelVisitState::default(),
        }
    }

    /// Returns the workspace last visited on `level`, if any was loaded.
    #[must_use]
    pub fn last_visited(&self, level: Level) -> Option<WorkspaceNumber> {
        match self {
            Self::Present(state) => state.last_visited(level),
            Self::Absent => None,
        }
    }
}

/// Errors raised inside a store. They never cross the [`LevelVisitStore`] API.
#[derive(Debug, Error)]
pub enum StateError {
    /// Reading or writing the backing storage failed.
    #[error("State I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stored bytes are not valid state JSON.
    #[error("Invalid state JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The state could not be encoded for writing.
    #[error("Failed to encode state: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The temporary file could not be moved over the state file.
    #[error("Failed to replace state file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Load/record capability for level-visit memory.
pub trait LevelVisitStore {
    /// Loads the current state. Failures are logged and reported as [`StoredState::Absent`].
    fn load(&self) -> StoredState;

    /// Replaces the stored state.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be persisted.
    fn save(&self, state: &LevelVisitState) -> Result<(), StateError>;

    /// Remembers `workspace` as the last visited workspace of `level`.
    ///
    /// Read-modify-write of the whole state. Persist failures are logged, not
    /// returned.
    fn record(&self, level: Level, workspace: WorkspaceNumber) {
        let mut state = self.load().unwrap_or_default();
        if !state.insert(level, workspace) {
            tracing::warn!(level, workspace, "refusing to record workspace outside its level");
            return;
        }
        match self.save(&state) {
            Ok(()) => tracing::debug!(level, workspace, "recorded level visit"),
            Err(err) => tracing::warn!(error = %err, level, workspace, "failed to record level visit"),
        }
    }
}

/// JSON file backed store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by the file at `path`. Nothing is read yet.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self { Self { path } }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path { &self.path }

    /// Deletes the backing file.
    ///
    /// Returns `Ok(false)` if there was nothing to delete.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> io::Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }

    fn read(&self) -> Result<LevelVisitState, StateError> {
        let raw = fs::read_to_string(&self.path)?;
        let mut state: LevelVisitState = serde_json::from_str(&raw).map_err(StateError::Parse)?;
        let dropped = state.retain_consistent();
        if dropped > 0 {
            tracing::warn!(
                dropped,
                path = %self.path.display(),
                "ignoring level-visit entries stored under the wrong level"
            );
        }
        Ok(state)
    }
}

impl LevelVisitStore for FileStore {
    fn load(&self) -> StoredState {
        match self.read() {
            Ok(state) => StoredState::Present(state),
            Err(StateError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no level-visit state yet");
                StoredState::Absent
            }
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path.display(), "failed to load level-visit state");
                StoredState::Absent
            }
        }
    }

    fn save(&self, state: &LevelVisitState) -> Result<(), StateError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        // Write next to the target and rename over it so readers never see a
        // half-written file.
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer(&mut file, state).map_err(StateError::Serialize)?;
        file.flush()?;
        file.persist(&self.path)?;
        Ok(())
    }
}

/// In-memory store, used where no file should be touched.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RefCell<Option<LevelVisitState>>,
    saves: Cell<usize>,
}

impl MemoryStore {
    /// Creates an empty store; `load` reports [`StoredState::Absent`] until the first save.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Creates a store that already holds `state`.
    #[must_use]
    pub fn with_state(state: LevelVisitState) -> Self {
        Self {
            state: RefCell::new(Some(state)),
            saves: Cell::new(0),
        }
    }

    /// Returns a copy of the stored state, if any.
    #[must_use]
    pub fn current(&self) -> Option<LevelVisitState> { self.state.borrow().clone() }

    /// Returns how many times state was saved.
    #[must_use]
    pub fn save_count(&self) -> usize { self.saves.get() }
}

impl LevelVisitStore for MemoryStore {
    fn load(&self) -> StoredState {
        self.state.borrow().clone().map_or(StoredState::Absent, StoredState::Present)
    }

    fn save(&self, state: &LevelVisitState) -> Result<(), StateError> {
        *self.state.borrow_mut() = Some(state.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn state_of(entries: &[(i32, i32)]) -> LevelVisitState {
        let mut state = LevelVisitState::new();
        for &(level, workspace) in entries {
            assert!(state.insert(level, workspace));
        }
        state
    }

    #[test]
    fn test_insert_upserts() {
        let mut state = LevelVisitState::new();
        assert!(state.insert(1, 150));
        assert!(state.insert(1, 120));
        assert_eq!(state.last_visited(1), Some(120));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_insert_rejects_workspace_outside_level() {
        let mut state = LevelVisitState::new();
        assert!(!state.insert(2, 150));
        assert!(state.is_empty());
    }

    #[test]
    fn test_serialized_layout_has_single_field() {
        let state = state_of(&[(0, 3), (1, 150)]);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"LastWorkspaceVisitedByLevel":{"0":3,"1":150}}"#);
    }

    #[test]
    fn test_reads_existing_state_file_layout() {
        let state: LevelVisitState =
            serde_json::from_str(r#"{"LastWorkspaceVisitedByLevel":{"2":204,"0":7}}"#).unwrap();
        assert_eq!(state.last_visited(2), Some(204));
        assert_eq!(state.last_visited(0), Some(7));
        assert_eq!(state.entries().collect::<Vec<_>>(), vec![(0, 7), (2, 204)]);
    }

    #[test]
    fn test_missing_field_is_empty_state() {
        let state: LevelVisitState = serde_json::from_str("{}").unwrap();
        assert!(state.is_empty());
    }

    #[test]
    fn test_retain_consistent_drops_mismatched_entries() {
        let mut state: LevelVisitState =
            serde_json::from_str(r#"{"LastWorkspaceVisitedByLevel":{"1":150,"3":150}}"#).unwrap();
        assert_eq!(state.retain_consistent(), 1);
        assert_eq!(state.last_visited(1), Some(150));
        assert_eq!(state.last_visited(3), None);
    }

    #[test]
    fn test_stored_state_defaults() {
        assert!(StoredState::Absent.unwrap_or_default().is_empty());
        assert_eq!(StoredState::Absent.last_visited(1), None);
        let present = StoredState::Present(state_of(&[(1, 110)]));
        assert!(matches!(present, StoredState::Present(_)));
        assert_eq!(present.last_visited(1), Some(110));
    }

    #[test]
    fn test_file_store_missing_file_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("state.json"));
        assert_eq!(store.load(), StoredState::Absent);
    }

    #[test]
    fn test_file_store_corrupt_file_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        fs::write(&path, "{ definitely not json").unwrap();

        let store = FileStore::new(path);
        assert!(matches!(store.read(), Err(StateError::Parse(_))));
        assert_eq!(store.load(), StoredState::Absent);
    }

    #[test]
    fn test_file_store_missing_file_reads_as_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("state.json"));
        assert!(matches!(
            store.read(),
            Err(StateError::Io(err)) if err.kind() == io::ErrorKind::NotFound
        ));
    }

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("state.json"));
        let state = state_of(&[(0, 4), (1, 150), (7, 701)]);

        store.save(&state).unwrap();
        assert_eq!(store.load(), StoredState::Present(state));
    }

    #[test]
    fn test_file_store_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("state.json");
        let store = FileStore::new(path.clone());

        store.record(1, 150);
        assert!(path.exists());
        assert_eq!(store.load().last_visited(1), Some(150));
    }

    #[test]
    fn test_record_keeps_other_levels() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("state.json"));

        store.record(0, 3);
        store.record(1, 150);
        store.record(0, 5);

        let state = store.load().unwrap_or_default();
        assert_eq!(state.last_visited(0), Some(5));
        assert_eq!(state.last_visited(1), Some(150));
    }

    #[test]
    fn test_record_over_corrupt_file_starts_fresh() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        fs::write(&path, "garbage").unwrap();

        let store = FileStore::new(path);
        store.record(2, 201);
        assert_eq!(store.load().last_visited(2), Some(201));
    }

    #[test]
    fn test_record_failure_is_absorbed() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "a file, not a directory").unwrap();

        let store = FileStore::new(blocker.join("state.json"));
        store.record(1, 150);
        assert_eq!(store.load(), StoredState::Absent);
    }

    #[test]
    fn test_file_store_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("state.json"));

        assert!(!store.clear().unwrap());
        store.record(1, 101);
        assert!(store.clear().unwrap());
        assert_eq!(store.load(), StoredState::Absent);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.load(), StoredState::Absent);

        store.record(3, 302);
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.current().unwrap().last_visited(3), Some(302));

        store.record(3, 999);
        assert_eq!(store.save_count(), 1);
    }
}
