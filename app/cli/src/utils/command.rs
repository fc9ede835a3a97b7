use std::env;
use std::path::{Path, PathBuf};

use crate::constants::EXTRA_PATHS_ENV_VAR;

/// Resolve the absolute path to an executable binary.
///
/// Absolute paths are checked and returned as-is. Bare names are searched for in:
/// 1. Directories listed in `WSLEVELS_EXTRA_PATHS` (colon-separated).
/// 2. The current process `PATH`.
/// 3. Common install locations on Linux and BSD (`/usr/local/bin`, `/usr/bin`, `~/.local/bin`).
///
/// Keybinding daemons often start with a minimal `PATH`, hence the fallbacks.
///
/// # Errors
///
/// Returns a descriptive reason when the binary is empty, missing, or not executable.
pub fn resolve_binary(binary: &str) -> Result<PathBuf, String> {
    if binary.is_empty() {
        return Err("Binary name cannot be empty".to_string());
    }

    let candidate = Path::new(binary);
    if candidate.is_absolute() {
        return if is_executable(candidate) {
            Ok(candidate.to_path_buf())
        } else {
            Err(format!("Binary at {} is not executable", candidate.display()))
        };
    }

    search_paths()
        .into_iter()
        .filter(|directory| !directory.as_os_str().is_empty())
        .map(|directory| directory.join(binary))
        .find(|path| is_executable(path))
        .ok_or_else(|| format!("Unable to locate executable '{binary}' in known search paths"))
}

fn search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(extra) = env::var(EXTRA_PATHS_ENV_VAR) {
        paths.extend(extra.split(':').map(PathBuf::from));
    }

    if let Some(path_var) = env::var_os("PATH") {
        paths.extend(env::split_paths(&path_var));
    }

    paths.extend([
        PathBuf::from("/usr/local/bin"),
        PathBuf::from("/usr/bin"),
        PathBuf::from("/bin"),
    ]);

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".local/bin"));
        paths.push(home.join(".cargo/bin"));
    }

    paths
}

fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };

    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        true
    }
}
