//! Application-wide constants.

/// Name used for the configuration directory, log prefix, and default state directory.
pub const APP_NAME: &str = "wslevels";

/// Number of consecutive workspace numbers that make up one level.
pub const LEVEL_SIZE: i32 = 100;

/// Upper bound (exclusive) on the level index searched when creating a new level.
pub const MAX_LEVELS: i32 = 1000;

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "WSLEVELS_LOG";

/// Environment variable with extra colon-separated directories searched for the
/// window manager message binary.
pub const EXTRA_PATHS_ENV_VAR: &str = "WSLEVELS_EXTRA_PATHS";

/// Window manager message binary used when the configuration does not name one.
pub const DEFAULT_MSG_COMMAND: &str = "i3-msg";
