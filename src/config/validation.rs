//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use std::path::Path;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("bot.user_id is required")]
    MissingUserId,
    #[error("bot.prefix must not be empty")]
    EmptyPrefix,
    #[error("bot.prefix must not contain whitespace, got '{0}'")]
    WhitespaceInPrefix(String),
    #[error("bot.default_locale is required")]
    MissingDefaultLocale,
    #[error("locales.path does not exist: {0}")]
    LocalesPathNotFound(String),
    #[error("logging.filter is not a valid filter: {0}")]
    InvalidLogFilter(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.bot.user_id.is_empty() {
        errors.push(ValidationError::MissingUserId);
    }

    let prefix = &config.bot.prefix;
    if prefix.is_empty() {
        errors.push(ValidationError::EmptyPrefix);
    } else if prefix.chars().any(char::is_whitespace) {
        errors.push(ValidationError::WhitespaceInPrefix(prefix.clone()));
    }

    if config.bot.default_locale.is_empty() {
        errors.push(ValidationError::MissingDefaultLocale);
    }

    if !Path::new(&config.locales.path).is_dir() {
        errors.push(ValidationError::LocalesPathNotFound(
            config.locales.path.clone(),
        ));
    }

    if let Err(e) = EnvFilter::try_new(&config.logging.filter) {
        errors.push(ValidationError::InvalidLogFilter(e.to_string()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
