//! Update command - bring a PR up to date with its base branch

use crate::cli::context::{CommandContext, Connection};
use crate::cli::style::{CHECK, Stylize};
use anstream::println;
use prpilot::context::PullContext;
use prpilot::error::Result;
use prpilot::platform::GitHubPullContext;
use prpilot::policy::should_update_pr;
use prpilot::update::{UpdateOutcome, update_pr};
use std::path::Path;

/// Run the update command
pub async fn run_update(connection: &Connection, repo: &str, number: u64, config: &Path) -> Result<()> {
    let ctx = CommandContext::new(connection, repo, number, config)?;
    let pull = GitHubPullContext::load(&ctx.service, &ctx.owner, &ctx.repo, ctx.number).await?;

    let decision = should_update_pr(&pull, &ctx.config.update).await?;
    if !decision.eligible {
        println!(
            "{} {}",
            format!("Not updating {}:", pull.locator()).muted(),
            decision.reason
        );
        return Ok(());
    }

    let base_ref = pull.base_ref().to_string();
    let outcome = update_pr(&pull, &ctx.service, &base_ref).await?;
    match &outcome {
        UpdateOutcome::Updated { sha } => println!(
            "{} {} from {} ({})",
            format!("{CHECK} Updated").success(),
            pull.locator().accent(),
            base_ref.emphasis(),
            sha.muted()
        ),
        UpdateOutcome::Skipped(reason) => println!(
            "{} {reason}",
            format!("Not updating {}:", pull.locator()).muted()
        ),
    }

    Ok(())
}
