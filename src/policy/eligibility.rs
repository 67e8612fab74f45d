//! Trigger/ignore evaluation shared by the update and merge policies

use crate::config::EligibilityPolicy;
use crate::context::PullContext;
use crate::error::Result;
use crate::signals::evaluation_error;
use tracing::debug;

/// Outcome of an eligibility check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Whether the action may proceed
    pub eligible: bool,
    /// One-line explanation suitable for logging
    pub reason: String,
}

impl Decision {
    fn eligible(reason: impl Into<String>) -> Self {
        Self {
            eligible: true,
            reason: reason.into(),
        }
    }

    fn ineligible(reason: impl Into<String>) -> Self {
        Self {
            eligible: false,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = if self.eligible { "eligible" } else { "not eligible" };
        write!(f, "{verdict}: {}", self.reason)
    }
}

/// Decide whether a PR is eligible under a trigger/ignore policy.
///
/// Precedence:
/// 1. Nothing configured: not eligible, automation is opt-in
/// 2. A matching ignore signal: not eligible, even if a trigger would match
/// 3. A configured trigger: its verdict is final
/// 4. Mode flags (draft handling)
/// 5. Otherwise eligible
pub async fn decide(ctx: &dyn PullContext, policy: EligibilityPolicy<'_>) -> Result<Decision> {
    let locator = ctx.locator();

    if !policy.ignore.enabled() && !policy.trigger.enabled() && !policy.has_mode_flags() {
        debug!(pr = %locator, "no policy configured");
        return Ok(Decision::ineligible("no policy configured"));
    }

    if let Some(reason) = policy.ignore.matches(ctx).await? {
        debug!(pr = %locator, %reason, "ignored");
        return Ok(Decision::ineligible(reason));
    }

    if policy.trigger.enabled() {
        return Ok(match policy.trigger.matches(ctx).await? {
            Some(reason) => {
                debug!(pr = %locator, %reason, "triggered");
                Decision::eligible(reason)
            }
            None => {
                debug!(pr = %locator, "trigger configured but no signal matched");
                Decision::ineligible("no trigger signal matched")
            }
        });
    }

    if policy.ignore_drafts == Some(true)
        && ctx
            .is_draft()
            .await
            .map_err(|e| evaluation_error("ignore_drafts", ctx, e))?
    {
        debug!(pr = %locator, "draft");
        return Ok(Decision::ineligible("draft"));
    }

    Ok(Decision::eligible("no blocking policy"))
}
