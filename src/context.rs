//! Read-only view of a single pull request
//!
//! Signals and the policy evaluators only ever see a pull request through
//! this trait, so tests can drive them with in-memory fakes.

use crate::error::Result;
use crate::types::{CommitSummary, Review};
use async_trait::async_trait;

/// Change context for one pull request
///
/// Identity accessors are infallible. Everything that may need a remote
/// lookup is async and fallible; callers propagate those errors instead of
/// treating them as "no match".
#[async_trait]
pub trait PullContext: Send + Sync {
    /// Repository owner (user or organization)
    fn owner(&self) -> &str;

    /// Repository name
    fn repo(&self) -> &str;

    /// PR number
    fn number(&self) -> u64;

    /// Stable human-readable identifier for logging
    fn locator(&self) -> String {
        format!("{}/{}#{}", self.owner(), self.repo(), self.number())
    }

    /// Target branch of the PR
    fn base_ref(&self) -> &str;

    /// Source branch of the PR
    fn head_ref(&self) -> &str;

    /// Whether the PR is in draft state
    async fn is_draft(&self) -> Result<bool>;

    /// PR title
    async fn title(&self) -> Result<String>;

    /// PR body (empty when unset)
    async fn body(&self) -> Result<String>;

    /// Label names on the PR
    async fn labels(&self) -> Result<Vec<String>>;

    /// Issue comment bodies on the PR
    async fn comments(&self) -> Result<Vec<String>>;

    /// Submitted reviews
    async fn reviews(&self) -> Result<Vec<Review>>;

    /// Number of changed files
    async fn changed_files(&self) -> Result<u64>;

    /// Commits on the head branch, oldest first
    async fn commits(&self) -> Result<Vec<CommitSummary>>;
}
