//! Keeping a PR branch up to date with its base
//!
//! The eligibility decision is made upstream by
//! [`should_update_pr`](crate::policy::should_update_pr); this module only
//! applies the update and guards against the cases where it must not happen.

use crate::context::PullContext;
use crate::error::{Error, Result};
use crate::platform::RepositoryClient;
use tracing::{debug, error, info};

/// Why an update was not performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// PR is closed or merged
    Closed,
    /// Head branch lives in another repository
    Fork,
    /// Head already contains the base ref
    UpToDate,
    /// Merging the base into the head conflicted
    Conflict(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "pull request is closed"),
            Self::Fork => write!(f, "head branch lives in a fork"),
            Self::UpToDate => write!(f, "already up to date"),
            Self::Conflict(msg) => write!(f, "update conflicted: {msg}"),
        }
    }
}

/// Result of an update attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Base was merged into the head branch
    Updated {
        /// SHA of the resulting merge commit
        sha: String,
    },
    /// Nothing was written
    Skipped(SkipReason),
}

impl UpdateOutcome {
    /// Whether the head branch was changed
    pub const fn updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

impl std::fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Updated { sha } => write!(f, "updated as merge {sha}"),
            Self::Skipped(reason) => write!(f, "not updated: {reason}"),
        }
    }
}

/// Merge `base_ref` into the PR's head branch if it is behind.
///
/// Closed PRs, forks and heads that already contain `base_ref` are skipped
/// without touching the remote. A merge conflict is a skip, not an error.
/// Transport failures are returned as errors and never retried.
pub async fn update_pr(
    ctx: &dyn PullContext,
    client: &dyn RepositoryClient,
    base_ref: &str,
) -> Result<UpdateOutcome> {
    let locator = ctx.locator();
    let owner = ctx.owner();
    let repo = ctx.repo();

    let pr = client
        .get_pull_request(owner, repo, ctx.number())
        .await
        .inspect_err(|e| error!(pr = %locator, error = %e, "failed to retrieve pull request"))?;

    if pr.state.is_closed() {
        debug!(pr = %locator, state = %pr.state, "pull request already closed");
        return Ok(UpdateOutcome::Skipped(SkipReason::Closed));
    }

    if pr.head_is_fork {
        debug!(pr = %locator, "pull request is from a fork, cannot keep it up to date");
        return Ok(UpdateOutcome::Skipped(SkipReason::Fork));
    }

    let comparison = client
        .compare_refs(owner, repo, base_ref, &pr.head_sha)
        .await
        .inspect_err(|e| {
            error!(pr = %locator, base_ref, head = %pr.head_sha, error = %e, "cannot compare refs");
        })?;
    if comparison.behind_by == 0 {
        debug!(pr = %locator, "pull request is not out of date, not updating");
        return Ok(UpdateOutcome::Skipped(SkipReason::UpToDate));
    }

    debug!(pr = %locator, behind_by = comparison.behind_by, "pull request is not up to date, attempting an update");
    match client.merge_ref(owner, repo, &pr.head_ref, base_ref).await {
        Ok(Some(sha)) => {
            info!(pr = %locator, base_ref, %sha, "updated pull request from base ref");
            Ok(UpdateOutcome::Updated { sha })
        }
        Ok(None) => {
            debug!(pr = %locator, "nothing to merge");
            Ok(UpdateOutcome::Skipped(SkipReason::UpToDate))
        }
        Err(Error::MergeConflict(msg)) => {
            error!(pr = %locator, base_ref, error = %msg, "update merge conflicted");
            Ok(UpdateOutcome::Skipped(SkipReason::Conflict(msg)))
        }
        Err(e) => {
            error!(pr = %locator, error = %e, "update merge failed unexpectedly");
            Err(e)
        }
    }
}
