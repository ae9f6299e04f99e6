//! Error types for matcher configuration.
//!
//! Formatting itself never fails: unrecognized messages pass through and
//! unrecognized literals become [`Kind::Unknown`](crate::value::Kind::Unknown).
//! Only building a matcher registry from user-supplied patterns can go wrong.

use thiserror::Error;

/// Errors that can occur while building matcher configuration.
#[derive(Error, Debug)]
pub enum DiffError {
    /// A matcher pattern is not a valid regular expression.
    #[error("invalid pattern for matcher `{name}`: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// A matcher pattern must capture exactly two operands.
    #[error("pattern for matcher `{name}` has {found} capture groups, expected 2")]
    CaptureCount { name: String, found: usize },

    /// The options document was not valid JSON for [`Options`](crate::Options).
    #[error("options parse error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Convenience alias used throughout expect-diff.
pub type Result<T> = std::result::Result<T, DiffError>;
