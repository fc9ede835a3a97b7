//! Path utilities for shell-like path expansion.

use std::path::PathBuf;

/// Expands a leading `~` to the user's home directory.
///
/// Absolute and relative paths are returned unchanged. Surrounding whitespace
/// is trimmed and a blank input yields an empty path.
#[must_use]
pub fn expand(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return PathBuf::new();
    }

    PathBuf::from(shellexpand::tilde(path).as_ref())
}
