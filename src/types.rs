//! Core types for prpilot

use serde::{Deserialize, Serialize};

/// PR state (open, closed, merged)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    /// PR is open
    Open,
    /// PR was closed without merging
    Closed,
    /// PR was merged
    Merged,
}

impl PrState {
    /// Whether the PR is closed for any reason (merged or not)
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed | Self::Merged)
    }
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Merged => write!(f, "merged"),
        }
    }
}

/// PR details as returned by the repository client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestDetails {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// PR body/description
    pub body: Option<String>,
    /// Current state of the PR
    pub state: PrState,
    /// Whether PR is a draft
    pub is_draft: bool,
    /// Head branch name
    pub head_ref: String,
    /// Commit SHA at the tip of the head branch
    pub head_sha: String,
    /// Whether the head branch lives in a different repository than the base
    ///
    /// This is not the head repository's own `fork` flag: a PR between two
    /// branches of a forked repository is not a fork PR. A deleted head
    /// repository counts as a fork.
    pub head_is_fork: bool,
    /// Base (target) branch name
    pub base_ref: String,
    /// Labels applied to the PR
    pub labels: Vec<String>,
    /// Number of files changed by the PR
    pub changed_files: u64,
    /// Web URL for the PR
    pub html_url: String,
}

/// Result of comparing two refs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Comparison {
    /// Commits on base that head does not have
    pub behind_by: u64,
    /// Commits on head that base does not have
    pub ahead_by: u64,
}

/// State of a pull request review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewState {
    /// Reviewer approved the change
    Approved,
    /// Reviewer asked for changes
    ChangesRequested,
    /// Reviewer left a comment without a verdict
    Commented,
}

impl std::fmt::Display for ReviewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approved => write!(f, "approved"),
            Self::ChangesRequested => write!(f, "changes_requested"),
            Self::Commented => write!(f, "commented"),
        }
    }
}

/// A submitted review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Login of the reviewer
    pub author: String,
    /// Review verdict
    pub state: ReviewState,
    /// Review body text
    pub body: String,
}

/// A commit on the PR head branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    /// Commit SHA
    pub sha: String,
    /// Full commit message
    pub message: String,
}

/// Commit title/body used when integrating a PR
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitMessage {
    /// Commit title, `None` to let the platform choose
    pub title: Option<String>,
    /// Commit body, `None` to let the platform choose
    pub body: Option<String>,
}

/// Result of a merge operation
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Whether the merge was successful
    pub merged: bool,
    /// The SHA of the merge commit (if successful)
    pub sha: Option<String>,
    /// Message from the merge operation (especially on failure)
    pub message: Option<String>,
}

/// Merge strategy/method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MergeMethod {
    /// Create a merge commit
    #[default]
    #[serde(rename = "merge")]
    Merge,
    /// Squash all commits into one
    #[serde(rename = "squash")]
    Squash,
    /// Rebase commits onto base branch
    #[serde(rename = "rebase")]
    Rebase,
    /// Move the base branch to the head commit, refusing to create a merge commit
    #[serde(rename = "ff-only")]
    FastForwardOnly,
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merge => write!(f, "merge"),
            Self::Squash => write!(f, "squash"),
            Self::Rebase => write!(f, "rebase"),
            Self::FastForwardOnly => write!(f, "ff-only"),
        }
    }
}
