//! Renumbering of contiguous workspace runs.

use crate::error::{LevelsError, LevelsResult};
use crate::levels::next_number;
use crate::wm::{WindowManager, Workspace};

/// Renames every workspace in `run` to its number plus one.
///
/// Renames go highest number first so the window manager never sees two
/// workspaces with the same number. The first failure stops the shift and is
/// returned; renames that already happened stay in place.
///
/// # Errors
///
/// Returns [`LevelsError::NumberOutOfRange`] without renaming anything if a
/// workspace is numbered `i32::MAX`, otherwise the error of the first rename
/// the window manager rejects.
pub fn shift_up<W>(wm: &W, run: &[Workspace]) -> LevelsResult<()>
where
    W: WindowManager + ?Sized,
{
    if let Some(full) = run.iter().find(|w| next_number(w.num).is_none()) {
        return Err(LevelsError::NumberOutOfRange(full.num));
    }

    for workspace in run.iter().rev() {
        let from = workspace.num;
        let to = next_number(from).ok_or(LevelsError::NumberOutOfRange(from))?;
        tracing::debug!(from, to, "shifting workspace");
        wm.rename_workspace(from, to)?;
    }
    Ok(())
}
