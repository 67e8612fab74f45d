//! Policy evaluation
//!
//! Pure decision logic over a [`PullContext`](crate::context::PullContext):
//! - `eligibility` - trigger/ignore evaluation for update and merge
//! - `method` - merge method resolution
//! - `squash` - squash commit message derivation

mod eligibility;
mod method;
pub(crate) mod squash;

pub use eligibility::{Decision, decide};
pub use method::resolve_merge_method;
pub use squash::{MessageStrategy, SquashOptions, TitleStrategy};

use crate::config::{MergeConfig, UpdateConfig};
use crate::context::PullContext;
use crate::error::Result;

/// Decide whether a PR should be kept up to date with its base branch.
pub async fn should_update_pr(ctx: &dyn PullContext, config: &UpdateConfig) -> Result<Decision> {
    decide(ctx, config.policy()).await
}

/// Decide whether a PR passes the merge trigger/ignore policy.
///
/// This does not check reviews, CI or mergeability; those gates belong to
/// the platform.
pub async fn should_merge_pr(ctx: &dyn PullContext, config: &MergeConfig) -> Result<Decision> {
    decide(ctx, config.policy()).await
}
