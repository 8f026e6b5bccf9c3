//! Configuration file support for MicroCoach.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/microcoach/config.toml`.
//! `PORT` and `BOT_USERNAME` in the environment override the file.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub integrations: IntegrationsConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Routine generation parameters
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Whole workout length, cooldown included
    #[serde(default = "default_total_seconds")]
    pub total_seconds: u32,

    /// Seconds reserved for a cooldown block (0 disables cooldown)
    #[serde(default)]
    pub cooldown_seconds: u32,

    /// Shortest timed step the allocator will produce
    #[serde(default = "default_min_step_seconds")]
    pub min_step_seconds: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            total_seconds: default_total_seconds(),
            cooldown_seconds: 0,
            min_step_seconds: default_min_step_seconds(),
        }
    }
}

/// HTTP server configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Third-party integration settings
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct IntegrationsConfig {
    /// Chat bot handle used for share and donation links
    #[serde(default)]
    pub bot_username: String,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("microcoach")
}

fn default_total_seconds() -> u32 {
    300
}

fn default_min_step_seconds() -> u32 {
    6
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    10000
}

impl Config {
    /// Load configuration from the standard config path, then apply env overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("microcoach")
            .join("config.toml")
    }

    /// Apply `PORT` and `BOT_USERNAME` overrides from a variable lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("Invalid PORT '{}': {}", port, e)))?;
        }
        if let Some(bot) = lookup("BOT_USERNAME") {
            self.integrations.bot_username = bot.trim().to_string();
        }
        Ok(())
    }

    /// Reject generator settings that cannot produce a routine
    pub fn validate(&self) -> Result<()> {
        let generator = &self.generator;
        if generator.total_seconds == 0 {
            return Err(Error::Config("generator.total_seconds must be positive".into()));
        }
        if generator.min_step_seconds == 0 {
            return Err(Error::Config(
                "generator.min_step_seconds must be positive".into(),
            ));
        }
        if generator.cooldown_seconds > 0
            && generator.cooldown_seconds < generator.min_step_seconds
        {
            return Err(Error::Config(format!(
                "generator.cooldown_seconds ({}) must be 0 or at least min_step_seconds ({})",
                generator.cooldown_seconds, generator.min_step_seconds
            )));
        }
        if generator.cooldown_seconds >= generator.total_seconds {
            return Err(Error::Config(format!(
                "generator.cooldown_seconds ({}) must be less than total_seconds ({})",
                generator.cooldown_seconds, generator.total_seconds
            )));
        }
        Ok(())
    }
}
