//! Error types for prpilot

use thiserror::Error;

/// Errors produced by policy evaluation, configuration loading and the
/// repository client.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration document could not be read or decoded
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration declares a schema version this build does not understand
    #[error("unsupported configuration version {0} (expected 1)")]
    UnsupportedVersion(u32),

    /// A branch pattern signal is not a valid regular expression
    #[error("invalid branch pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The offending pattern as written in the configuration
        pattern: String,
        /// Underlying regex compilation error
        #[source]
        source: regex::Error,
    },

    /// A signal could not be evaluated against a pull request
    #[error("failed to evaluate {signal} signal for {locator}: {source}")]
    SignalEvaluation {
        /// Name of the signal being evaluated (e.g. "comments")
        signal: &'static str,
        /// Locator of the pull request (owner/repo#number)
        locator: String,
        /// What went wrong while reading the context
        #[source]
        source: Box<Error>,
    },

    /// Remote API call failed
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Merging one ref into another produced a conflict
    #[error("merge conflict: {0}")]
    MergeConflict(String),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
