//! Check command - evaluate the policy without side effects

use crate::cli::context::{CommandContext, Connection};
use crate::cli::style::{Stylize, verdict};
use anstream::println;
use prpilot::context::PullContext;
use prpilot::error::Result;
use prpilot::merge::create_merge_plan;
use prpilot::platform::GitHubPullContext;
use prpilot::policy::{should_merge_pr, should_update_pr};
use std::path::Path;

/// Run the check command
pub async fn run_check(connection: &Connection, repo: &str, number: u64, config: &Path) -> Result<()> {
    let ctx = CommandContext::new(connection, repo, number, config)?;
    let pull = GitHubPullContext::load(&ctx.service, &ctx.owner, &ctx.repo, ctx.number).await?;

    println!(
        "{} {} {}",
        "Pull request".emphasis(),
        pull.locator().accent(),
        format!("({} -> {})", pull.head_ref(), pull.base_ref()).muted()
    );

    let update = should_update_pr(&pull, &ctx.config.update).await?;
    println!("  {} update: {}", verdict(update.eligible), update.reason);

    let merge = should_merge_pr(&pull, &ctx.config.merge).await?;
    println!("  {} merge: {}", verdict(merge.eligible), merge.reason);

    let plan = create_merge_plan(&pull, &ctx.config.merge).await?;
    println!("  {} {}", "method:".muted(), plan.method.accent());
    if let Some(message) = &plan.message {
        if let Some(title) = &message.title {
            println!("  {} {title}", "title:".muted());
        }
        if let Some(body) = &message.body {
            println!("  {}", "body:".muted());
            for line in body.lines() {
                println!("    {line}");
            }
        }
    }

    Ok(())
}
