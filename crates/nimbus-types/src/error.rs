//! Error types for value parsing in nimbus-types.

use thiserror::Error;

/// Errors that can occur when parsing preference values.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The string is not a known theme name.
    #[error("Unknown theme '{0}' (expected \"light\" or \"dark\")")]
    UnknownTheme(String),

    /// The string is not a known temperature unit.
    #[error("Unknown temperature unit '{0}' (expected \"celsius\" or \"fahrenheit\")")]
    UnknownUnit(String),
}

/// Result type alias using nimbus-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
