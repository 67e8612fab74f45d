//! Shared command context for CLI commands
//!
//! Extracts common setup code shared by check, update, and merge commands.

use prpilot::config::{Config, load_config};
use prpilot::error::{Error, Result};
use prpilot::platform::GitHubService;
use std::path::Path;

/// Connection settings from global flags
#[derive(Debug, Clone, Default)]
pub struct Connection {
    /// GitHub token
    pub token: Option<String>,
    /// GitHub Enterprise host
    pub host: Option<String>,
}

/// Shared context for CLI commands that interact with GitHub
///
/// This performs the common setup:
/// - Loading and validating the policy file
/// - Parsing the owner/name repository argument
/// - Creating the GitHub service
pub struct CommandContext {
    /// Loaded policy
    pub config: Config,
    /// GitHub service
    pub service: GitHubService,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// PR number
    pub number: u64,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// The policy is loaded before anything touches the network so a broken
    /// policy file fails fast.
    pub fn new(connection: &Connection, repo: &str, number: u64, config_path: &Path) -> Result<Self> {
        let config = load_config(config_path)?;
        let (owner, repo) = parse_repo(repo)?;

        let token = connection.token.as_deref().ok_or_else(|| {
            Error::Config("no GitHub token: pass --token or set GITHUB_TOKEN".to_string())
        })?;
        let service = GitHubService::new(token, connection.host.as_deref())?;

        Ok(Self {
            config,
            service,
            owner,
            repo,
            number,
        })
    }
}

fn parse_repo(value: &str) -> Result<(String, String)> {
    match value.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(Error::Config(format!(
            "invalid repository {value:?}, expected owner/name"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo() {
        assert_eq!(
            parse_repo("acme/widgets").unwrap(),
            ("acme".to_string(), "widgets".to_string())
        );
        assert!(parse_repo("widgets").is_err());
        assert!(parse_repo("acme/").is_err());
        assert!(parse_repo("a/b/c").is_err());
    }
}
