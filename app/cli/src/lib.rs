//! wslevels - level-based workspace navigation for i3 and sway.
//!
//! Workspaces are grouped into levels of 100 consecutive numbers. Directives
//! step between workspaces of a level, open new workspaces in between, and
//! jump between levels while remembering where the user left each one.
//!
//! The library exposes the navigation engine behind two seams,
//! [`wm::WindowManager`] and [`state::LevelVisitStore`], so it can be driven
//! by the bundled `i3-msg` client and state file or by in-memory fakes.

pub mod cli;
pub mod config;
pub mod constants;
pub mod directive;
pub mod error;
pub mod levels;
pub mod navigation;
pub mod schema;
pub mod state;
pub mod wm;

mod utils;

pub use directive::{Direction, Directive};
pub use error::{LevelsError, LevelsResult};
pub use navigation::Navigator;
