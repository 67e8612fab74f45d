//! Merge command - merge a PR according to the policy

use crate::cli::context::{CommandContext, Connection};
use crate::cli::style::{CHECK, Stylize};
use anstream::println;
use prpilot::context::PullContext;
use prpilot::error::Result;
use prpilot::merge::{create_merge_plan, execute_merge};
use prpilot::platform::GitHubPullContext;
use prpilot::policy::should_merge_pr;
use std::path::Path;

/// Run the merge command
pub async fn run_merge(
    connection: &Connection,
    repo: &str,
    number: u64,
    config: &Path,
    dry_run: bool,
) -> Result<()> {
    // =========================================================================
    // Phase 1: DECIDE
    // =========================================================================

    let ctx = CommandContext::new(connection, repo, number, config)?;
    let pull = GitHubPullContext::load(&ctx.service, &ctx.owner, &ctx.repo, ctx.number).await?;

    let decision = should_merge_pr(&pull, &ctx.config.merge).await?;
    if !decision.eligible {
        println!(
            "{} {}",
            format!("Not merging {}:", pull.locator()).muted(),
            decision.reason
        );
        return Ok(());
    }

    // =========================================================================
    // Phase 2: PLAN
    // =========================================================================

    let plan = create_merge_plan(&pull, &ctx.config.merge).await?;

    if dry_run {
        println!("{} {plan}", "Would".emphasis());
        println!("{}", "Dry run complete".muted());
        return Ok(());
    }

    // =========================================================================
    // Phase 3: EXECUTE
    // =========================================================================

    let result = execute_merge(&plan, &pull, &ctx.service).await?;
    if result.merged {
        let sha_display = result.sha.as_deref().unwrap_or("(no sha)");
        println!(
            "{} {} via {} ({})",
            format!("{CHECK} Merged").success(),
            pull.locator().accent(),
            plan.method.emphasis(),
            sha_display.muted()
        );
        if result.branch_deleted {
            println!("  {} {}", "deleted".muted(), pull.head_ref());
        }
    } else {
        println!(
            "{} {}",
            format!("Not merged {}:", pull.locator()).failure(),
            result.message.as_deref().unwrap_or("merge was rejected")
        );
    }

    Ok(())
}
