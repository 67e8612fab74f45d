//! prpilot - policy driven pull request updates and merges
//!
//! Given a repository policy ([`config::Config`]) and a pull request seen
//! through a [`context::PullContext`], prpilot decides:
//! - whether the PR should be kept up to date with its base branch
//!   ([`policy::should_update_pr`], applied by [`update::update_pr`])
//! - whether it passes the merge trigger/ignore policy
//!   ([`policy::should_merge_pr`])
//! - which merge method and commit message to use
//!   ([`policy::resolve_merge_method`], [`merge::create_merge_plan`])
//!
//! Remote access goes through [`platform::RepositoryClient`];
//! [`platform::GitHubService`] implements it on top of the GitHub API.

pub mod config;
pub mod context;
pub mod error;
pub mod merge;
pub mod platform;
pub mod policy;
pub mod signals;
pub mod types;
pub mod update;
