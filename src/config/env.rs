// src/config/env.rs
// Environment-based configuration - single source of truth for all env vars

use std::str::FromStr;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::chat::gemini::DEFAULT_MODEL;
use crate::chat::limiter::LimiterConfig;

/// API keys loaded from environment variables
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    /// Gemini/Google API key (GEMINI_API_KEY or GOOGLE_API_KEY)
    pub gemini: Option<String>,
}

impl ApiKeys {
    /// Load API keys from environment variables
    pub fn from_env() -> Self {
        let gemini = Self::read_key("GEMINI_API_KEY").or_else(|| Self::read_key("GOOGLE_API_KEY"));
        let keys = Self { gemini };
        keys.log_status();
        keys
    }

    /// Read a single API key from environment, filtering empty values
    fn read_key(name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|k| !k.trim().is_empty())
    }

    pub fn has_gemini(&self) -> bool {
        self.gemini.is_some()
    }

    /// Log which API keys are available (without exposing values)
    fn log_status(&self) {
        if self.gemini.is_some() {
            debug!("Gemini API key loaded");
        } else {
            warn!("No API key configured - the chat assistant will be unavailable");
        }
    }
}

/// Chat tunables from environment variables
#[derive(Debug, Clone)]
pub struct ChatSettings {
    /// Model name (FOLIO_CHAT_MODEL)
    pub model: String,
    /// Spacing between outbound calls in milliseconds (FOLIO_CHAT_MIN_INTERVAL_MS)
    pub min_interval_ms: u64,
    /// Burst cap per accounting window (FOLIO_CHAT_MAX_PER_MINUTE)
    pub max_calls_per_minute: u32,
    /// Typing delay before a reply settles, in milliseconds (FOLIO_CHAT_REPLY_DELAY_MS)
    pub reply_delay_ms: u64,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            min_interval_ms: 2000,
            max_calls_per_minute: 20,
            reply_delay_ms: 500,
        }
    }
}

impl ChatSettings {
    /// Load chat settings from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            model: std::env::var("FOLIO_CHAT_MODEL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.model),
            min_interval_ms: parse_env_or("FOLIO_CHAT_MIN_INTERVAL_MS", defaults.min_interval_ms),
            max_calls_per_minute: parse_env_or(
                "FOLIO_CHAT_MAX_PER_MINUTE",
                defaults.max_calls_per_minute,
            ),
            reply_delay_ms: parse_env_or("FOLIO_CHAT_REPLY_DELAY_MS", defaults.reply_delay_ms),
        }
    }

    /// Limiter tunables derived from these settings.
    pub fn limiter_config(&self) -> LimiterConfig {
        LimiterConfig {
            min_interval: Duration::from_millis(self.min_interval_ms),
            max_calls_per_minute: self.max_calls_per_minute,
            ..LimiterConfig::default()
        }
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

/// Configuration validation result
#[derive(Debug, Default)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ConfigValidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Format as a human-readable report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        if !self.errors.is_empty() {
            lines.push("Errors:".to_string());
            for err in &self.errors {
                lines.push(format!("  - {}", err));
            }
        }

        if !self.warnings.is_empty() {
            lines.push("Warnings:".to_string());
            for warn in &self.warnings {
                lines.push(format!("  - {}", warn));
            }
        }

        if lines.is_empty() {
            "Configuration OK".to_string()
        } else {
            lines.join("\n")
        }
    }
}

/// Environment configuration - all env vars in one place
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub api_keys: ApiKeys,
    pub chat: ChatSettings,
}

impl EnvConfig {
    /// Load all environment configuration (call once at startup)
    pub fn load() -> Self {
        info!("Loading environment configuration");
        Self {
            api_keys: ApiKeys::from_env(),
            chat: ChatSettings::from_env(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();

        if !self.api_keys.has_gemini() {
            validation
                .add_warning("No Gemini API key configured. Set GEMINI_API_KEY or GOOGLE_API_KEY.");
        }

        if self.chat.max_calls_per_minute == 0 {
            validation.add_error("FOLIO_CHAT_MAX_PER_MINUTE must be at least 1");
        }
        if self.chat.min_interval_ms == 0 {
            validation.add_warning("FOLIO_CHAT_MIN_INTERVAL_MS is 0; spacing limit is disabled");
        }

        validation
    }
}

fn parse_env_or<T: FromStr>(name: &str, default: T) -> T {
    parse_or(std::env::var(name).ok().as_deref(), name, default)
}

/// Parse an already-read value, falling back to the default on garbage.
/// Split from the env read so tests never have to mutate process env.
fn parse_or<T: FromStr>(raw: Option<&str>, name: &str, default: T) -> T {
    match raw {
        None => default,
        Some(value) => match value.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(var = name, value, "Unparseable env var, using default");
                default
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_keys_default_is_absent() {
        let keys = ApiKeys::default();
        assert!(!keys.has_gemini());
    }

    #[test]
    fn test_api_keys_with_value() {
        let keys = ApiKeys {
            gemini: Some("test-key".to_string()),
        };
        assert!(keys.has_gemini());
    }

    #[test]
    fn test_chat_settings_defaults() {
        let settings = ChatSettings::default();
        assert_eq!(settings.model, "gemini-pro");
        assert_eq!(settings.min_interval_ms, 2000);
        assert_eq!(settings.max_calls_per_minute, 20);
        assert_eq!(settings.reply_delay_ms, 500);
    }

    #[test]
    fn test_limiter_config_mapping() {
        let settings = ChatSettings {
            min_interval_ms: 1000,
            max_calls_per_minute: 5,
            ..ChatSettings::default()
        };
        let config = settings.limiter_config();
        assert_eq!(config.min_interval, Duration::from_millis(1000));
        assert_eq!(config.max_calls_per_minute, 5);
        assert_eq!(config.window, Duration::from_secs(60));
    }

    #[test]
    fn test_parse_or_accepts_valid_values() {
        assert_eq!(parse_or(Some("3000"), "X", 2000u64), 3000);
        assert_eq!(parse_or(Some(" 15 "), "X", 20u32), 15);
    }

    #[test]
    fn test_parse_or_falls_back_on_garbage() {
        assert_eq!(parse_or(Some("fast"), "X", 2000u64), 2000);
        assert_eq!(parse_or(Some(""), "X", 20u32), 20);
        assert_eq!(parse_or(None, "X", 500u64), 500);
    }

    #[test]
    fn test_validation_without_key_warns() {
        let config = EnvConfig::default();
        let validation = config.validate();
        assert!(validation.is_valid()); // Warnings don't make it invalid
        assert!(!validation.warnings.is_empty());
    }

    #[test]
    fn test_validation_rejects_zero_burst_cap() {
        let config = EnvConfig {
            chat: ChatSettings {
                max_calls_per_minute: 0,
                ..ChatSettings::default()
            },
            ..EnvConfig::default()
        };
        let validation = config.validate();
        assert!(!validation.is_valid());
        assert!(validation.report().contains("FOLIO_CHAT_MAX_PER_MINUTE"));
    }

    #[test]
    fn test_validation_report_ok() {
        let config = EnvConfig {
            api_keys: ApiKeys {
                gemini: Some("k".to_string()),
            },
            chat: ChatSettings::default(),
        };
        assert_eq!(config.validate().report(), "Configuration OK");
    }
}
