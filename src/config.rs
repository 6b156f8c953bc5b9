//! Configuration handling for emoji-mosaic.
//!
//! Settings come from three places, merged once at startup into an
//! immutable [`Settings`] value:
//! - `~/.config/emoji-mosaic/config.toml` (or a custom path via `--config`)
//! - environment variables (`BOT_TOKEN`, `WEBHOOK_PATH`)
//! - command-line flags

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bot::TransformMode;
use crate::cli::Args;
use crate::mosaic::MosaicSettings;
use crate::telegram::{BOT_TOKEN_ENV, TELEGRAM_API_BASE_URL};
use crate::thumbnail::ThumbnailSettings;

/// Environment variable overriding the webhook path.
pub const WEBHOOK_PATH_ENV: &str = "WEBHOOK_PATH";

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub mosaic: MosaicSettings,
    #[serde(default)]
    pub thumbnail: ThumbnailSettings,
}

#[derive(Debug, Deserialize, Default)]
pub struct BotConfig {
    #[serde(default)]
    pub mode: Option<TransformMode>,
    #[serde(default)]
    pub webhook_path: Option<String>,
    #[serde(default)]
    pub api_base_url: Option<String>,
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.clone(),
                source: e,
            })?;
            log::info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            log::debug!("No config file at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }
}

/// Fully resolved runtime settings, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub token: String,
    /// Webhook path without a leading slash
    pub webhook_path: String,
    pub api_base_url: String,
    pub port: u16,
    pub mode: TransformMode,
    pub mosaic: MosaicSettings,
    pub thumbnail: ThumbnailSettings,
}

impl Settings {
    /// Merge file config, command-line flags and environment.
    ///
    /// Precedence is flags over environment over file. `env` looks up an
    /// environment variable by name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingToken` if `BOT_TOKEN` is unset or blank,
    /// and `ConfigError::Invalid` for zero-sized grids or thumbnails.
    pub fn resolve<F>(config: Config, args: &Args, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = env(BOT_TOKEN_ENV)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let webhook_path = env(WEBHOOK_PATH_ENV)
            .or(config.bot.webhook_path)
            .map(|p| p.trim().trim_start_matches('/').to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| token.clone());

        let mut mosaic = config.mosaic;
        if let Some(palette) = args.palette {
            mosaic.palette = palette;
        }

        let settings = Self {
            webhook_path,
            api_base_url: config
                .bot
                .api_base_url
                .unwrap_or_else(|| TELEGRAM_API_BASE_URL.to_string()),
            port: args.port,
            mode: args.mode.or(config.bot.mode).unwrap_or_default(),
            mosaic,
            thumbnail: config.thumbnail,
            token,
        };
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.mosaic.width == 0 || self.mosaic.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "mosaic grid must be non-zero, got {}x{}",
                self.mosaic.width, self.mosaic.height
            )));
        }
        if self.thumbnail.width == 0 || self.thumbnail.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "thumbnail size must be non-zero, got {}x{}",
                self.thumbnail.width, self.thumbnail.height
            )));
        }
        Ok(())
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Missing {} environment variable", BOT_TOKEN_ENV)]
    MissingToken,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("emoji-mosaic").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("emoji-mosaic.toml"))
}
