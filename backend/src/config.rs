//! Configuration management for the Branch Restock Portal
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with RESTOCK_ prefix
//!
//! When no configuration can be loaded at all, the server falls back to a
//! demo setup (one branch "Demo Branch" with PIN "0000") instead of failing
//! to start.

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Branch name used by the demo fallback configuration.
pub const DEMO_BRANCH: &str = "Demo Branch";

/// PIN of the demo fallback branch.
pub const DEMO_PIN: &str = "0000";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Display name of the portal
    pub app_name: String,

    /// Static admin password (exact string comparison)
    pub admin_password: String,

    /// Currency label shown alongside prices (display only)
    pub currency: String,

    /// Store locations
    pub storage: StorageConfig,

    /// Branch credential table: branch name -> PIN. Read-only at runtime.
    #[serde(default)]
    pub branches: HashMap<String, String>,

    /// True when the credential table is the built-in demo fallback rather
    /// than configured branches. Never read from config sources; a real
    /// deployment may legitimately name a branch "Demo Branch".
    #[serde(skip)]
    pub demo_fallback: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Path of the persisted stock catalog
    pub stock_file: PathBuf,

    /// Path of the persisted order log
    pub orders_file: PathBuf,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("RESTOCK_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("app_name", "Branch Restock Portal")?
            .set_default("admin_password", "admin")?
            .set_default("currency", "AED")?
            .set_default("storage.stock_file", "stock.csv")?
            .set_default("storage.orders_file", "orders.csv")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (RESTOCK_ prefix)
            .add_source(
                Environment::with_prefix("RESTOCK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Config = config.try_deserialize()?;
        if config.branches.is_empty() {
            config
                .branches
                .insert(DEMO_BRANCH.to_string(), DEMO_PIN.to_string());
            config.demo_fallback = true;
        }
        Ok(config)
    }

    /// Load configuration, recovering from a missing or corrupt setup with
    /// the demo defaults. Configuration trouble is never fatal.
    pub fn load_or_demo() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load configuration ({e}); using demo defaults");
                Self::demo()
            }
        }
    }

    /// The built-in demo configuration.
    pub fn demo() -> Self {
        let mut branches = HashMap::new();
        branches.insert(DEMO_BRANCH.to_string(), DEMO_PIN.to_string());
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            app_name: "Branch Restock Portal".to_string(),
            admin_password: "admin".to_string(),
            currency: "AED".to_string(),
            storage: StorageConfig {
                stock_file: PathBuf::from("stock.csv"),
                orders_file: PathBuf::from("orders.csv"),
            },
            branches,
            demo_fallback: true,
        }
    }

    /// True when the credential table is the demo fallback.
    pub fn is_demo_mode(&self) -> bool {
        self.demo_fallback
    }

    /// Look up the PIN configured for a branch.
    pub fn branch_pin(&self, branch: &str) -> Option<&str> {
        self.branches.get(branch).map(String::as_str)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_defaults_report_demo_mode() {
        let config = Config::demo();
        assert!(config.is_demo_mode());
        assert_eq!(config.branch_pin(DEMO_BRANCH), Some(DEMO_PIN));
    }

    #[test]
    fn a_configured_branch_named_demo_branch_is_not_demo_mode() {
        let mut config = Config::demo();
        config.demo_fallback = false;
        config.branches.clear();
        config
            .branches
            .insert(DEMO_BRANCH.to_string(), "4321".to_string());

        assert!(!config.is_demo_mode());
        assert_eq!(config.branch_pin(DEMO_BRANCH), Some("4321"));
    }
}
