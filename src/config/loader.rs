//! Loading policy documents from disk.
//!
//! Documents are YAML by default and TOML when the file ends in `.toml`.
//! Unknown keys are ignored so older builds can read newer documents.

use super::{CONFIG_VERSION, Config, ConditionalMergeMethod, MergeConfig, MergeOptions, UpdateConfig};
use crate::error::{Error, Result};
use crate::signals::Signals;
use crate::types::MergeMethod;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".prpilot.yml";

/// Serialization format of a policy document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML document
    Yaml,
    /// TOML document
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigDocument {
    version: Option<u32>,
    merge: MergeDocument,
    update: UpdateDocument,
}

// Status-check gating keys (`required_statuses`, `allow_merge_with_no_checks`)
// are accepted and dropped; the platform enforces them.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MergeDocument {
    trigger: Signals,
    ignore: Signals,
    // legacy aliases of ignore/trigger
    blacklist: Signals,
    whitelist: Signals,
    delete_after_merge: bool,
    method: MergeMethod,
    merge_method: Vec<ConditionalMergeMethod>,
    branch_method: HashMap<String, MergeMethod>,
    options: MergeOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UpdateDocument {
    trigger: Signals,
    ignore: Signals,
    ignore_drafts: Option<bool>,
    // legacy aliases of ignore/trigger
    blacklist: Signals,
    whitelist: Signals,
}

/// Load configuration from a file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    parse_config(&content, ConfigFormat::from_path(path))
        .map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
}

/// Parse, validate and canonicalize a policy document.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<Config> {
    let document: ConfigDocument = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| Error::Config(format!("failed to parse YAML: {e}")))?,
        ConfigFormat::Toml => toml::from_str(content)
            .map_err(|e| Error::Config(format!("failed to parse TOML: {e}")))?,
    };

    let version = document
        .version
        .ok_or_else(|| Error::Config("missing required field `version`".to_string()))?;
    if version != CONFIG_VERSION {
        return Err(Error::UnsupportedVersion(version));
    }

    let config = Config {
        version,
        merge: document.merge.into_canonical(),
        update: document.update.into_canonical(),
    };
    validate(&config)?;
    Ok(config)
}

impl MergeDocument {
    fn into_canonical(self) -> MergeConfig {
        MergeConfig {
            trigger: prefer_modern("merge.trigger", self.trigger, "merge.whitelist", self.whitelist),
            ignore: prefer_modern("merge.ignore", self.ignore, "merge.blacklist", self.blacklist),
            delete_after_merge: self.delete_after_merge,
            method: self.method,
            merge_method: self.merge_method,
            branch_method: self.branch_method,
            options: self.options,
        }
    }
}

impl UpdateDocument {
    fn into_canonical(self) -> UpdateConfig {
        UpdateConfig {
            trigger: prefer_modern("update.trigger", self.trigger, "update.whitelist", self.whitelist),
            ignore: prefer_modern("update.ignore", self.ignore, "update.blacklist", self.blacklist),
            ignore_drafts: self.ignore_drafts,
        }
    }
}

/// Fold a legacy alias into its modern field. The modern field wins when both
/// are set.
fn prefer_modern(field: &str, modern: Signals, legacy_field: &str, legacy: Signals) -> Signals {
    match (modern.enabled(), legacy.enabled()) {
        (true, true) => {
            debug!(field, legacy_field, "both set, ignoring legacy field");
            modern
        }
        (false, true) => legacy,
        _ => modern,
    }
}

fn validate(config: &Config) -> Result<()> {
    config.merge.trigger.validate()?;
    config.merge.ignore.validate()?;
    for conditional in &config.merge.merge_method {
        conditional.trigger.validate()?;
    }
    config.update.trigger.validate()?;
    config.update.ignore.validate()?;
    Ok(())
}
