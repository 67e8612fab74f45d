//! Declarative signals evaluated against a pull request
//!
//! A [`Signals`] set groups independently optional predicates. The set is
//! enabled as soon as one predicate is configured, and it matches when any
//! configured predicate matches. Predicates are checked in declaration order
//! and evaluation stops at the first match, so only the context reads needed
//! to reach a verdict are performed.

use crate::context::PullContext;
use crate::error::{Error, Result};
use crate::types::{Review, ReviewState};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A set of trigger or ignore conditions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Signals {
    /// Label names (case-insensitive)
    pub labels: Vec<String>,
    /// Comments whose whole (trimmed) body equals one of these
    pub comments: Vec<String>,
    /// Substrings searched for in comments
    pub comment_substrings: Vec<String>,
    /// Substrings searched for in the PR body
    pub pr_body_substrings: Vec<String>,
    /// Exact target branch names
    pub branches: Vec<String>,
    /// Regular expressions that must match the whole target branch name
    pub branch_patterns: Vec<String>,
    /// Review verdicts, any review in one of these states matches
    pub review_states: Vec<ReviewState>,
    /// Upper bound on the number of changed files
    pub max_changed_files: Option<u64>,
}

impl Signals {
    /// Whether at least one predicate is configured
    pub fn enabled(&self) -> bool {
        !self.labels.is_empty()
            || !self.comments.is_empty()
            || !self.comment_substrings.is_empty()
            || !self.pr_body_substrings.is_empty()
            || !self.branches.is_empty()
            || !self.branch_patterns.is_empty()
            || !self.review_states.is_empty()
            || self.max_changed_files.is_some()
    }

    /// Check that every branch pattern compiles
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.branch_patterns {
            compile_branch_pattern(pattern)?;
        }
        Ok(())
    }

    /// Evaluate the set against a pull request.
    ///
    /// Returns the reason of the first matching predicate, or `None` when
    /// nothing matched. A disabled set never matches.
    pub async fn matches(&self, ctx: &dyn PullContext) -> Result<Option<String>> {
        if !self.enabled() {
            return Ok(None);
        }

        if !self.labels.is_empty() {
            let labels = ctx
                .labels()
                .await
                .map_err(|e| evaluation_error("labels", ctx, e))?;
            for wanted in &self.labels {
                if labels.iter().any(|l| l.eq_ignore_ascii_case(wanted)) {
                    return Ok(Some(format!("label {wanted} matched")));
                }
            }
        }

        // shared by the comment and review state checks
        let mut reviews: Option<Vec<Review>> = None;

        if !self.comments.is_empty() || !self.comment_substrings.is_empty() {
            let mut bodies = ctx
                .comments()
                .await
                .map_err(|e| evaluation_error("comments", ctx, e))?;
            let fetched = ctx
                .reviews()
                .await
                .map_err(|e| evaluation_error("comments", ctx, e))?;
            // review bodies count as comments
            bodies.extend(
                fetched
                    .iter()
                    .filter(|r| !r.body.is_empty())
                    .map(|r| r.body.clone()),
            );
            reviews = Some(fetched);

            for wanted in &self.comments {
                if bodies.iter().any(|b| b.trim() == wanted.trim()) {
                    return Ok(Some(format!("comment {wanted:?} matched")));
                }
            }
            for wanted in &self.comment_substrings {
                if bodies.iter().any(|b| b.contains(wanted.as_str())) {
                    return Ok(Some(format!("comment substring {wanted:?} matched")));
                }
            }
        }

        if !self.pr_body_substrings.is_empty() {
            let body = ctx
                .body()
                .await
                .map_err(|e| evaluation_error("pr_body_substrings", ctx, e))?;
            for wanted in &self.pr_body_substrings {
                if body.contains(wanted.as_str()) {
                    return Ok(Some(format!(
                        "pull request body substring {wanted:?} matched"
                    )));
                }
            }
        }

        let target = ctx.base_ref();
        if let Some(branch) = self.branches.iter().find(|b| *b == target) {
            return Ok(Some(format!("target branch {branch} matched")));
        }
        for pattern in &self.branch_patterns {
            if compile_branch_pattern(pattern)?.is_match(target) {
                return Ok(Some(format!(
                    "target branch {target} matched pattern {pattern}"
                )));
            }
        }

        if !self.review_states.is_empty() {
            let reviews = match reviews.take() {
                Some(reviews) => reviews,
                None => ctx
                    .reviews()
                    .await
                    .map_err(|e| evaluation_error("review_states", ctx, e))?,
            };
            for wanted in &self.review_states {
                if reviews.iter().any(|r| r.state == *wanted) {
                    return Ok(Some(format!("review state {wanted} matched")));
                }
            }
        }

        if let Some(max) = self.max_changed_files {
            let changed = ctx
                .changed_files()
                .await
                .map_err(|e| evaluation_error("max_changed_files", ctx, e))?;
            if changed <= max {
                return Ok(Some(format!(
                    "{changed} changed files within limit {max}"
                )));
            }
        }

        trace!(pr = %ctx.locator(), "no signal matched");
        Ok(None)
    }
}

fn compile_branch_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|source| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

pub(crate) fn evaluation_error(signal: &'static str, ctx: &dyn PullContext, source: Error) -> Error {
    Error::SignalEvaluation {
        signal,
        locator: ctx.locator(),
        source: Box::new(source),
    }
}
