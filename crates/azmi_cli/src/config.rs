//! CLI configuration file.
//!
//! Looked up from `--config`, then `AZMI_CONFIG`, then `./azmi.toml`.
//! Command line flags always win over file values.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;
use tracing::debug;

use azmi_identity::IdentityBlock;

use crate::error::CliError;

pub const DEFAULT_CONFIG_FILE: &str = "azmi.toml";

/// Identity capability set selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    SystemAssigned,
    UserAssigned,
    #[default]
    SystemAssignedUserAssigned,
}

impl Variant {
    pub fn block(self) -> IdentityBlock {
        match self {
            Variant::SystemAssigned => IdentityBlock::system_assigned(),
            Variant::UserAssigned => IdentityBlock::user_assigned(),
            Variant::SystemAssignedUserAssigned => IdentityBlock::system_assigned_user_assigned(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::SystemAssigned => "system-assigned",
            Variant::UserAssigned => "user-assigned",
            Variant::SystemAssignedUserAssigned => "system-assigned-user-assigned",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Contents of `azmi.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub default_variant: Option<Variant>,
    pub output: Option<OutputFormat>,
    pub log_level: Option<String>,
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load the explicit file if given, else `./azmi.toml` when present.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, CliError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            debug!("Using config file {}", fallback.display());
            Self::load(&fallback)
        } else {
            Ok(Self::default())
        }
    }
}

/// Effective settings after merging flags over the config file.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub output: OutputFormat,
    pub default_variant: Variant,
}

impl Settings {
    pub fn new(output: Option<OutputFormat>, config: &CliConfig) -> Self {
        Self {
            output: output.or(config.output).unwrap_or_default(),
            default_variant: config.default_variant.unwrap_or_default(),
        }
    }

    pub fn variant(&self, requested: Option<Variant>) -> Variant {
        requested.unwrap_or(self.default_variant)
    }
}
