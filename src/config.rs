use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub marketplace: MarketplaceConfig,
    #[serde(default)]
    pub wizard: WizardConfig,
    #[serde(default)]
    pub features: FeaturesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote marketplace catalog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceConfig {
    /// Base URL of the marketplace API
    #[serde(default = "default_marketplace_api_url")]
    pub api_url: String,
    /// Page size requested from the catalog listing endpoint
    #[serde(default = "default_pagination")]
    pub pagination: usize,
}

fn default_marketplace_api_url() -> String {
    "https://marketplace.example.com/api".to_string()
}

fn default_pagination() -> usize {
    100
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            api_url: default_marketplace_api_url(),
            pagination: default_pagination(),
        }
    }
}

/// Wizard data endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Base URL of the internal connectivity API serving wizard data
    #[serde(default = "default_wizard_api_url")]
    pub api_url: String,
}

fn default_wizard_api_url() -> String {
    "http://localhost:8080/rest/apps".to_string()
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            api_url: default_wizard_api_url(),
        }
    }
}

/// Feature flag settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeaturesConfig {
    /// Flags enabled for this installation (e.g., "connect_app_with_permissions")
    #[serde(default)]
    pub enabled: Vec<String>,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Whether to write logs to a file instead of stderr
    #[serde(default)]
    pub to_file: bool,
    /// Directory for log files when to_file is enabled
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: false,
            dir: default_log_dir(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so the crate works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        // Explicit config file (caller override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with APPCONNECT_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("APPCONNECT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Save the configuration to a TOML file
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        std::fs::write(path, toml_str).context("Failed to write config file")?;
        Ok(())
    }

    /// Directory for log files
    pub fn logs_path(&self) -> PathBuf {
        PathBuf::from(&self.logging.dir)
    }
}
