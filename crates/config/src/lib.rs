//! Configuration for SmartChip: merchant records, overrides, and the
//! application settings file.
//!
//! Settings are loaded from `~/.smartchip/config.toml` with environment
//! variable overrides.  Merchant records come from a [`MerchantStore`]; the
//! built-in demo merchants and an optional TOML catalog feed the default
//! [`StaticMerchantStore`].

mod merchant;
mod overrides;
mod store;

pub use merchant::{
    BudgetSettings, CartSettings, FacetSettings, MERCHANT_CONFIG_VERSION, MerchantConfigV1,
    MerchantModules, MerchantStoreInfo, OrderSettings, PolicySettings, SortSettings,
    to_engine_config, validate_merchant_config,
};
pub use overrides::{
    EngineConfigOverride, ModuleTogglesOverride, ThresholdsOverride, apply_engine_config_override,
    check_store_fields, merge_store_config, validate_override,
};
pub use store::{MerchantStore, StaticMerchantStore, resolve_merchant_config};

use serde::{Deserialize, Serialize};
use smartchip_core::{Channel, Issues};
use std::path::{Path, PathBuf};

/// The root settings structure.
///
/// Maps directly to `~/.smartchip/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Merchant catalog (TOML) merged over the built-in demo merchants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchants_path: Option<PathBuf>,

    /// Whether the built-in demo merchants are available
    #[serde(default = "default_true")]
    pub include_demo_merchants: bool,

    /// Channel used when a preset is run without one
    #[serde(default)]
    pub default_channel: Channel,
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            merchants_path: None,
            include_demo_merchants: true,
            default_channel: Channel::default(),
        }
    }
}

impl AppConfig {
    /// Load settings from the default path (~/.smartchip/config.toml).
    ///
    /// Environment overrides (highest priority):
    /// - `SMARTCHIP_MERCHANTS`: merchant catalog path
    /// - `SMARTCHIP_CHANNEL`: default channel
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(path) = std::env::var("SMARTCHIP_MERCHANTS") {
            config.merchants_path = Some(PathBuf::from(path));
        }

        if let Ok(channel) = std::env::var("SMARTCHIP_CHANNEL") {
            config.default_channel = channel
                .parse()
                .map_err(|e: String| ConfigError::ValidationError(e))?;
        }

        Ok(config)
    }

    /// Load settings from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".smartchip")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.include_demo_merchants && self.merchants_path.is_none() {
            return Err(ConfigError::ValidationError(
                "no merchants available: set merchants_path or include_demo_merchants = true"
                    .into(),
            ));
        }
        Ok(())
    }

    /// Build the merchant store these settings describe.
    ///
    /// Catalog records replace demo merchants with the same id.
    pub fn merchant_store(&self) -> Result<StaticMerchantStore, ConfigError> {
        let mut store = if self.include_demo_merchants {
            StaticMerchantStore::demo()
        } else {
            StaticMerchantStore::new()
        };
        if let Some(path) = &self.merchants_path {
            store.extend(StaticMerchantStore::load_from(path)?);
        }
        Ok(store)
    }

    /// Generate a default settings TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid merchant config '{id}': {issues}")]
    InvalidMerchant { id: String, issues: Issues },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.include_demo_merchants);
        assert_eq!(config.default_channel, Channel::Web);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig {
            merchants_path: Some(PathBuf::from("/srv/merchants.toml")),
            include_demo_merchants: false,
            default_channel: Channel::Whatsapp,
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.merchants_path, config.merchants_path);
        assert_eq!(parsed.default_channel, Channel::Whatsapp);
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert!(config.merchants_path.is_none());
    }

    #[test]
    fn no_merchant_source_rejected() {
        let config = AppConfig {
            include_demo_merchants: false,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn settings_file_with_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("merchants.toml");
        std::fs::write(
            &catalog,
            r#"
[merchants.tiny]
config_version = 1
[merchants.tiny.modules]
budget = { enabled = false, variance_threshold = 2.0 }
facet = { enabled = false, facet_share_threshold = 0.2 }
sort = { enabled = true, rating_coverage_threshold = 0.5 }
order = { enabled = false }
cart = { enabled = false }
policy = { enabled = false }
"#,
        )
        .unwrap();
        let settings = dir.path().join("config.toml");
        std::fs::write(
            &settings,
            format!(
                "merchants_path = {:?}\ndefault_channel = \"whatsapp\"\n",
                catalog.display().to_string()
            ),
        )
        .unwrap();

        let config = AppConfig::load_from(&settings).unwrap();
        assert_eq!(config.default_channel, Channel::Whatsapp);
        let store = config.merchant_store().unwrap();
        assert!(store.resolve("tiny").is_some());
        assert!(store.resolve("demo-electronics").is_some());
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("include_demo_merchants = true"));
        assert!(toml_str.contains("default_channel = \"web\""));
    }
}
