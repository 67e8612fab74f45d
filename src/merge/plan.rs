//! Merge planning
//!
//! Decides how a PR will be merged without performing the merge: the method
//! from [`resolve_merge_method`] and, for squash merges, the commit message.
//! The only I/O is the reads done through the change context.

use crate::config::MergeConfig;
use crate::context::PullContext;
use crate::error::Result;
use crate::policy::resolve_merge_method;
use crate::types::{CommitMessage, MergeMethod};

/// How a PR will be merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePlan {
    /// PR number
    pub pr_number: u64,
    /// Merge method to use
    pub method: MergeMethod,
    /// Commit message override, `None` leaves it to the platform
    pub message: Option<CommitMessage>,
    /// Delete the head branch after a successful merge
    pub delete_head_branch: bool,
}

impl std::fmt::Display for MergePlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} PR #{}", self.method, self.pr_number)?;
        if let Some(title) = self.message.as_ref().and_then(|m| m.title.as_deref()) {
            write!(f, ": {title}")?;
        }
        if self.delete_head_branch {
            write!(f, " (then delete head branch)")?;
        }
        Ok(())
    }
}

/// Create a merge plan for a PR
///
/// A commit message is derived only for squash merges with squash options
/// configured. Commits are fetched only when the chosen strategies need them.
pub async fn create_merge_plan(ctx: &dyn PullContext, config: &MergeConfig) -> Result<MergePlan> {
    let method = resolve_merge_method(ctx, config).await?;

    let message = match (method, &config.options.squash) {
        (MergeMethod::Squash, Some(options)) => {
            let title = ctx.title().await?;
            let body = ctx.body().await?;
            let commits = if options.needs_commits() {
                ctx.commits().await?
            } else {
                Vec::new()
            };
            Some(options.commit_message(ctx.number(), &title, &body, &commits))
        }
        _ => None,
    };

    Ok(MergePlan {
        pr_number: ctx.number(),
        method,
        message,
        delete_head_branch: config.delete_after_merge,
    })
}
