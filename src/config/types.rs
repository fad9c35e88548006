//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::defaults::{
    default_console_channel, default_console_user, default_locale, default_locales_path,
    default_log_filter, default_prefix,
};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Bot identity and command settings.
    pub bot: BotConfig,
    /// Localization catalog location.
    #[serde(default)]
    pub locales: LocalesConfig,
    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Bot identity and command settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// The bot's own user id, used for bot capability checks.
    pub user_id: String,
    /// Prefix that marks a text message as a command (default: "!").
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Locale used when an invocation carries none (default: "en_US").
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// User ids allowed to run admin-only commands.
    #[serde(default)]
    pub admins: Vec<String>,
    /// Author id for plain lines typed on the console gateway.
    #[serde(default = "default_console_user")]
    pub console_user: String,
    /// Channel id for plain lines typed on the console gateway.
    #[serde(default = "default_console_channel")]
    pub console_channel: String,
}

/// Localization catalog location.
///
/// The directory holds one subdirectory per locale with one JSON file per
/// namespace, e.g. `locales/en_US/common.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalesConfig {
    #[serde(default = "default_locales_path")]
    pub path: String,
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            path: default_locales_path(),
        }
    }
}

/// Log output.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply() {
        let config: Config = toml::from_str(
            r#"
[bot]
user_id = "100"
"#,
        )
        .unwrap();
        assert_eq!(config.bot.prefix, "!");
        assert_eq!(config.bot.default_locale, "en_US");
        assert!(config.bot.admins.is_empty());
        assert_eq!(config.locales.path, "locales");
        assert_eq!(config.logging.filter, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_missing_bot_section_fails() {
        assert!(toml::from_str::<Config>("[logging]\njson = true\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[bot]\nuser_id = \"7\"\nprefix = \"?\"\nadmins = [\"1\"]\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.bot.prefix, "?");
        assert_eq!(config.bot.admins, vec!["1".to_string()]);
        assert!(matches!(
            Config::load(dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
