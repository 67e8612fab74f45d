//! Commit title/body derivation for squash merges
//!
//! Pure functions of PR metadata: no I/O happens here, the caller fetches
//! the title, body and commits beforehand.

use crate::types::{CommitMessage, CommitSummary};
use serde::Deserialize;

/// How the squash commit title is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleStrategy {
    /// PR title followed by the PR number
    PullRequestTitle,
    /// First line of the first commit followed by the PR number
    FirstCommitTitle,
    /// Leave the title to the platform
    #[default]
    GithubDefault,
}

/// How the squash commit body is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStrategy {
    /// PR description, optionally narrowed by the message delimiter
    PullRequestBody,
    /// Bullet list of the commit messages
    #[default]
    SummarizeCommits,
    /// No body at all
    EmptyBody,
}

/// Squash commit message options
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SquashOptions {
    /// Title strategy
    pub title: TitleStrategy,
    /// Body strategy
    pub body: MessageStrategy,
    /// Marker fencing the part of the PR body to use as commit body
    pub message_delimiter: Option<String>,
}

impl SquashOptions {
    /// Whether deriving the message needs the PR's commits
    pub fn needs_commits(&self) -> bool {
        self.title == TitleStrategy::FirstCommitTitle || self.body == MessageStrategy::SummarizeCommits
    }

    /// Derive the squash commit message for a PR.
    ///
    /// `commits` must be oldest first. A `first_commit_title` strategy on a
    /// PR without commits falls back to the platform default title.
    pub fn commit_message(
        &self,
        number: u64,
        title: &str,
        body: &str,
        commits: &[CommitSummary],
    ) -> CommitMessage {
        let title = match self.title {
            TitleStrategy::PullRequestTitle => Some(format!("{title} (#{number})")),
            TitleStrategy::FirstCommitTitle => commits
                .first()
                .and_then(|c| c.message.lines().next())
                .map(|line| format!("{} (#{number})", line.trim())),
            TitleStrategy::GithubDefault => None,
        };

        let body = match self.body {
            MessageStrategy::PullRequestBody => Some(
                self.message_delimiter
                    .as_deref()
                    .and_then(|delim| delimited_section(body, delim))
                    .unwrap_or(body)
                    .trim()
                    .to_string(),
            ),
            MessageStrategy::SummarizeCommits => Some(summarize_commits(commits)),
            MessageStrategy::EmptyBody => Some(String::new()),
        };

        CommitMessage { title, body }
    }
}

/// Text between the first two occurrences of `delimiter`, if there are two.
fn delimited_section<'a>(body: &'a str, delimiter: &str) -> Option<&'a str> {
    if delimiter.is_empty() {
        return None;
    }
    let (_, rest) = body.split_once(delimiter)?;
    let (section, _) = rest.split_once(delimiter)?;
    Some(section)
}

fn summarize_commits(commits: &[CommitSummary]) -> String {
    commits
        .iter()
        .map(|c| format!("* {}", c.message.trim()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(message: &str) -> CommitSummary {
        CommitSummary {
            sha: "abc123".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_delimited_section_between_markers() {
        let body = "intro\n==MSG==\nkeep this\n==MSG==\nfooter";
        assert_eq!(delimited_section(body, "==MSG=="), Some("\nkeep this\n"));
    }

    #[test]
    fn test_delimited_section_requires_two_markers() {
        assert_eq!(delimited_section("only ==MSG== once", "==MSG=="), None);
        assert_eq!(delimited_section("anything", ""), None);
    }

    #[test]
    fn test_first_commit_title_uses_first_line() {
        let options = SquashOptions {
            title: TitleStrategy::FirstCommitTitle,
            body: MessageStrategy::EmptyBody,
            message_delimiter: None,
        };
        let message = options.commit_message(
            7,
            "PR title",
            "",
            &[commit("Fix parser\n\nlong text"), commit("Second")],
        );
        assert_eq!(message.title.as_deref(), Some("Fix parser (#7)"));
        assert_eq!(message.body.as_deref(), Some(""));
    }

    #[test]
    fn test_first_commit_title_without_commits_is_default() {
        let options = SquashOptions {
            title: TitleStrategy::FirstCommitTitle,
            ..SquashOptions::default()
        };
        assert!(options.commit_message(7, "PR title", "", &[]).title.is_none());
    }
}
