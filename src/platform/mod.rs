//! Repository platform access
//!
//! The update orchestrator and merge executor talk to the hosting platform
//! only through [`RepositoryClient`]. [`GitHubService`] is the production
//! implementation; [`GitHubPullContext`] is the matching change context.

mod context;
mod github;

pub use context::GitHubPullContext;
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{CommitMessage, Comparison, MergeMethod, MergeResult, PullRequestDetails};
use async_trait::async_trait;

/// Repository client trait for the remote operations the engine needs
///
/// Every call is a single attempt. Retries and rate limiting belong to the
/// caller.
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    /// Fetch the current state of a PR
    async fn get_pull_request(&self, owner: &str, repo: &str, number: u64)
    -> Result<PullRequestDetails>;

    /// Compare `head` against `base`
    async fn compare_refs(&self, owner: &str, repo: &str, base: &str, head: &str)
    -> Result<Comparison>;

    /// Merge `head` into the branch `base`
    ///
    /// Returns the merge commit SHA, or `None` when `base` already contains
    /// `head`. A conflict is reported as [`Error::MergeConflict`].
    ///
    /// [`Error::MergeConflict`]: crate::error::Error::MergeConflict
    async fn merge_ref(&self, owner: &str, repo: &str, base: &str, head: &str)
    -> Result<Option<String>>;

    /// Integrate a PR with the given method
    ///
    /// A `message` of `None`, or `None` fields inside it, leave the commit
    /// title/body to the platform. `ff-only` moves the base branch to the
    /// PR's `head_sha` and reports `merged: false` when that is not a
    /// fast-forward.
    async fn merge_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr: &PullRequestDetails,
        method: MergeMethod,
        message: Option<&CommitMessage>,
    ) -> Result<MergeResult>;

    /// Delete a branch
    async fn delete_ref(&self, owner: &str, repo: &str, branch: &str) -> Result<()>;
}
