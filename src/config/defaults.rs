//! Default value functions for configuration.

// =============================================================================
// Bot Defaults
// =============================================================================

pub fn default_prefix() -> String {
    "!".to_string()
}

pub fn default_locale() -> String {
    "en_US".to_string()
}

pub fn default_console_user() -> String {
    "console".to_string()
}

pub fn default_console_channel() -> String {
    "console".to_string()
}

// =============================================================================
// Locale Defaults
// =============================================================================

pub fn default_locales_path() -> String {
    "locales".to_string()
}

// =============================================================================
// Logging Defaults
// =============================================================================

pub fn default_log_filter() -> String {
    "info".to_string()
}
