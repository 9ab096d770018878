//! Configuration Management Module
//!
//! This module handles loading the configuration used by the `tokenscript-trust`
//! command line tool: which TokenScript document to load, which owner addresses to
//! derive trust and revoke addresses for, and how results are printed.

use serde::{Deserialize, Serialize};

use crate::address::Address;

/// Environment variable holding a custom config path.
pub const CONFIG_PATH_ENV: &str = "TOKENSCRIPT_TRUST_CONFIG_PATH";

/// Config path used when no override is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/tokenscript-trust.toml";

// ============================================================================
// CONFIGURATION STRUCTURES
// ============================================================================

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Signed TokenScript document to load
    pub document: DocumentConfig,
    /// Owner (contract) addresses to derive addresses for
    pub owners: OwnersConfig,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Path of the signed TokenScript file (e.g. `EntryToken.tsml`)
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnersConfig {
    /// Owner addresses, `0x` prefix optional
    pub addresses: Vec<String>,
}

/// Output configuration for derived addresses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// How reports are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per owner: owner, trust address, revoke address
    #[default]
    Text,
    /// JSON array of reports
    Json,
}

// ============================================================================
// CONFIGURATION LOADING AND MANAGEMENT
// ============================================================================

impl Config {
    /// Validates the configuration.
    ///
    /// This function ensures that:
    /// - The document path is not empty
    /// - At least one owner address is configured
    /// - Every owner address is 20 bytes of hex
    ///
    /// # Returns
    ///
    /// - `Ok(())` - Configuration is valid
    /// - `Err(anyhow::Error)` - First problem found
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.document.path.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "Configuration error: document.path must not be empty"
            ));
        }

        if self.owners.addresses.is_empty() {
            return Err(anyhow::anyhow!(
                "Configuration error: owners.addresses must contain at least one address"
            ));
        }

        for owner in &self.owners.addresses {
            Address::parse(owner).map_err(|e| {
                anyhow::anyhow!("Configuration error: owner address '{}' is invalid: {}", owner, e)
            })?;
        }

        Ok(())
    }

    /// Loads configuration from `TOKENSCRIPT_TRUST_CONFIG_PATH` or the default path.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from_path(None)
    }

    /// Loads configuration from the TOML file.
    ///
    /// Priority: `path` argument > `TOKENSCRIPT_TRUST_CONFIG_PATH` > default path.
    ///
    /// # Returns
    ///
    /// - `Ok(Config)` - Successfully loaded and validated configuration
    /// - `Err(anyhow::Error)` - File missing, unparseable, or invalid
    pub fn load_from_path(path: Option<&str>) -> anyhow::Result<Self> {
        let config_path = match path {
            Some(path) => path.to_string(),
            None => std::env::var(CONFIG_PATH_ENV)
                .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string()),
        };

        if !std::path::Path::new(&config_path).exists() {
            return Err(anyhow::anyhow!(
                "Configuration file '{}' not found. Please copy the template:\n\
                cp config/tokenscript-trust.template.toml config/tokenscript-trust.toml\n\
                Then edit config/tokenscript-trust.toml with your actual values.",
                config_path
            ));
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}
