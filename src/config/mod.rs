//! Policy configuration
//!
//! These are the canonical, already-resolved structures the evaluators work
//! on. Legacy `whitelist`/`blacklist` names only exist in the document
//! layer in [`loader`] and are folded into `trigger`/`ignore` before a
//! [`Config`] is handed out.

mod loader;

pub use loader::{ConfigFormat, DEFAULT_CONFIG_FILE, load_config, parse_config};

use crate::signals::Signals;
use crate::types::MergeMethod;
use serde::Deserialize;
use std::collections::HashMap;

pub use crate::policy::{MessageStrategy, SquashOptions, TitleStrategy};

/// Supported configuration schema version
pub const CONFIG_VERSION: u32 = 1;

/// Complete policy configuration for one repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Schema version the document was written against
    pub version: u32,
    /// When and how PRs are merged
    pub merge: MergeConfig,
    /// When PRs are kept up to date with their base branch
    pub update: UpdateConfig,
}

/// Merge policy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeConfig {
    /// Signals that make a PR eligible for merging
    pub trigger: Signals,
    /// Signals that block merging
    pub ignore: Signals,
    /// Delete the head branch once merged
    pub delete_after_merge: bool,
    /// Fallback merge method
    pub method: MergeMethod,
    /// Conditional methods, first matching trigger wins
    pub merge_method: Vec<ConditionalMergeMethod>,
    /// Per target branch method overrides
    pub branch_method: HashMap<String, MergeMethod>,
    /// Method specific options
    pub options: MergeOptions,
}

impl MergeConfig {
    /// Trigger/ignore view used by the eligibility evaluator
    pub const fn policy(&self) -> EligibilityPolicy<'_> {
        EligibilityPolicy {
            trigger: &self.trigger,
            ignore: &self.ignore,
            ignore_drafts: None,
        }
    }
}

/// A merge method applied when its trigger matches
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConditionalMergeMethod {
    /// Method to use
    pub method: MergeMethod,
    /// Signals selecting this method
    pub trigger: Signals,
}

/// Method specific merge options
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Commit message strategy for squash merges
    pub squash: Option<SquashOptions>,
}

/// Update policy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateConfig {
    /// Signals that make a PR eligible for updates
    pub trigger: Signals,
    /// Signals that block updates
    pub ignore: Signals,
    /// Skip draft PRs when no trigger is configured
    pub ignore_drafts: Option<bool>,
}

impl UpdateConfig {
    /// Trigger/ignore view used by the eligibility evaluator
    pub const fn policy(&self) -> EligibilityPolicy<'_> {
        EligibilityPolicy {
            trigger: &self.trigger,
            ignore: &self.ignore,
            ignore_drafts: self.ignore_drafts,
        }
    }
}

/// The parts of a policy the eligibility evaluator looks at
#[derive(Debug, Clone, Copy)]
pub struct EligibilityPolicy<'a> {
    /// Signals that make the PR eligible
    pub trigger: &'a Signals,
    /// Signals that make the PR ineligible, checked first
    pub ignore: &'a Signals,
    /// Draft handling; `None` means the flag is not set at all
    pub ignore_drafts: Option<bool>,
}

impl EligibilityPolicy<'_> {
    /// Whether any mode specific flag is set
    pub const fn has_mode_flags(&self) -> bool {
        self.ignore_drafts.is_some()
    }
}
