//! Error types for the keymatch crate.

use thiserror::Error;

/// Errors that can occur when building conditions or parsing input.
///
/// Evaluation itself never fails: a missing field or an unknown operator
/// name is handled by the matching rules, not reported as an error.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Malformed condition, logic mode or input value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The pattern given to a `pattern-match` condition does not compile.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: PatternError,
    },
}

/// Why a pattern was rejected.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The expression is not valid `regex` syntax.
    #[error(transparent)]
    Regex(#[from] regex::Error),

    /// A delimited pattern carries a modifier with no `regex` equivalent.
    #[error("unsupported modifier '{0}'")]
    UnsupportedModifier(char),
}

impl MatchError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        MatchError::InvalidArgument(message.into())
    }
}

/// Result type for keymatch operations.
pub type Result<T> = std::result::Result<T, MatchError>;
