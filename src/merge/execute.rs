//! Merge execution - effectful operations
//!
//! Takes a `MergePlan` and performs it via the repository client.

use crate::context::PullContext;
use crate::error::Result;
use crate::merge::plan::MergePlan;
use crate::platform::RepositoryClient;
use tracing::{debug, info, warn};

/// Result of merge execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeExecutionResult {
    /// Whether the PR was merged
    pub merged: bool,
    /// SHA of the merge commit (if any)
    pub sha: Option<String>,
    /// Why the merge did not happen (if it did not)
    pub message: Option<String>,
    /// Whether the head branch was deleted afterwards
    pub branch_deleted: bool,
}

/// Execute a merge plan (EFFECTFUL)
///
/// The PR is re-fetched first so a PR closed in the meantime is not merged.
/// Branch deletion only happens for same-repository heads, and a failed
/// deletion is logged without failing the merge.
pub async fn execute_merge(
    plan: &MergePlan,
    ctx: &dyn PullContext,
    client: &dyn RepositoryClient,
) -> Result<MergeExecutionResult> {
    let locator = ctx.locator();
    let pr = client
        .get_pull_request(ctx.owner(), ctx.repo(), plan.pr_number)
        .await?;

    if pr.state.is_closed() {
        debug!(pr = %locator, state = %pr.state, "pull request already closed");
        return Ok(MergeExecutionResult {
            message: Some(format!("pull request is {}", pr.state)),
            ..MergeExecutionResult::default()
        });
    }

    let merge = client
        .merge_pull_request(
            ctx.owner(),
            ctx.repo(),
            &pr,
            plan.method,
            plan.message.as_ref(),
        )
        .await?;

    let mut result = MergeExecutionResult {
        merged: merge.merged,
        sha: merge.sha,
        message: merge.message,
        branch_deleted: false,
    };

    if !result.merged {
        warn!(pr = %locator, method = %plan.method, message = ?result.message, "merge not performed");
        return Ok(result);
    }

    let sha_display = result.sha.as_deref().unwrap_or("(no sha)");
    info!(pr = %locator, method = %plan.method, sha = sha_display, "merged pull request");

    if plan.delete_head_branch {
        if pr.head_is_fork {
            debug!(pr = %locator, "head branch is in a fork, not deleting");
        } else {
            match client.delete_ref(ctx.owner(), ctx.repo(), &pr.head_ref).await {
                Ok(()) => {
                    info!(pr = %locator, branch = %pr.head_ref, "deleted head branch");
                    result.branch_deleted = true;
                }
                Err(e) => {
                    warn!(pr = %locator, branch = %pr.head_ref, error = %e, "failed to delete head branch");
                }
            }
        }
    }

    Ok(result)
}
