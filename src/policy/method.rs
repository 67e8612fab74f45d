//! Merge method resolution

use crate::config::MergeConfig;
use crate::context::PullContext;
use crate::error::Result;
use crate::types::MergeMethod;
use tracing::debug;

/// Resolve the merge method for a PR.
///
/// Precedence, highest first:
/// 1. `branch_method` entry for the PR's target branch
/// 2. first `merge_method` entry whose trigger matches, in declared order
/// 3. the default `method`
///
/// Conditional triggers are evaluated lazily and only when no branch
/// override applies. Evaluation failures are propagated.
pub async fn resolve_merge_method(ctx: &dyn PullContext, config: &MergeConfig) -> Result<MergeMethod> {
    let locator = ctx.locator();
    let target = ctx.base_ref();

    if let Some(method) = config.branch_method.get(target) {
        debug!(pr = %locator, branch = target, %method, "using branch merge method");
        return Ok(*method);
    }

    for conditional in &config.merge_method {
        if let Some(reason) = conditional.trigger.matches(ctx).await? {
            debug!(pr = %locator, method = %conditional.method, %reason, "using conditional merge method");
            return Ok(conditional.method);
        }
    }

    debug!(pr = %locator, method = %config.method, "using default merge method");
    Ok(config.method)
}
