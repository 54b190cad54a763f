//! Logic mode for combining conditions.

use std::str::FromStr;

use crate::error::MatchError;

/// How the conditions of a set combine for a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogicMode {
    /// Every condition must hold. Stops at the first failing condition.
    #[default]
    And,
    /// At least one condition must hold. Stops at the first holding condition.
    Or,
}

impl LogicMode {
    /// Returns `true` if this is `And`.
    pub fn is_and(self) -> bool {
        matches!(self, LogicMode::And)
    }

    /// Returns `true` if this is `Or`.
    pub fn is_or(self) -> bool {
        matches!(self, LogicMode::Or)
    }

    /// Returns the display name of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            LogicMode::And => "and",
            LogicMode::Or => "or",
        }
    }
}

impl FromStr for LogicMode {
    type Err = MatchError;

    /// Parses `and` / `or` (case-insensitive, `&&` and `||` accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" | "&&" => Ok(LogicMode::And),
            "or" | "||" => Ok(LogicMode::Or),
            other => Err(MatchError::invalid_argument(format!(
                "unknown logic mode '{other}', expected 'and' or 'or'"
            ))),
        }
    }
}

impl std::fmt::Display for LogicMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
