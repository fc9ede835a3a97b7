//! Navigation directives.
//!
//! A directive is one user-requested navigation action, usually bound to a
//! key. Names are case-sensitive and match the historical command names
//! (`newLevel` keeps its camel case).

use std::fmt;
use std::str::FromStr;

use crate::error::LevelsError;

/// Sideways step within a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the previous workspace in window manager order.
    Left,
    /// Towards the next workspace in window manager order.
    Right,
}

impl Direction {
    /// Returns the index offset for this direction.
    #[must_use]
    pub const fn offset(self) -> isize {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// A single navigation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// Focus the next workspace on the same level.
    Right,
    /// Focus the previous workspace on the same level.
    Left,
    /// Open a workspace right after the focused one, shifting later ones up.
    Insert,
    /// Open a workspace after the last one on the focused level.
    Endsert,
    /// Open the first workspace of the nearest empty level below this one.
    NewLevel,
    /// Go to the next populated level.
    Down,
    /// Go to the previous populated level.
    Up,
}

impl Directive {
    /// Every directive, in help order.
    pub const ALL: [Self; 7] = [
        Self::Right,
        Self::Left,
        Self::Insert,
        Self::Endsert,
        Self::NewLevel,
        Self::Down,
        Self::Up,
    ];

    /// Returns the command-line name of the directive.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Left => "left",
            Self::Insert => "insert",
            Self::Endsert => "endsert",
            Self::NewLevel => "newLevel",
            Self::Down => "down",
            Self::Up => "up",
        }
    }
}

impl FromStr for Directive {
    type Err = LevelsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|directive| directive.as_str() == s)
            .ok_or_else(|| LevelsError::UnrecognizedDirective(s.to_string()))
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}
