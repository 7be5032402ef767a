use std::time::Duration;

use thiserror::Error;

use crate::constants;

/// Environment configuration that cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingEnvVar(String),
    #[error("{name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("{name}={value:?} is not a whole number: {source}")]
    ParseInt {
        name: String,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("{name}={value:?} is not a boolean")]
    ParseBool { name: String, value: String },
}

/// Settings for rendering one post page, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    // Feed
    pub feed_url: String,
    pub fetch_timeout: Duration,

    // Page
    pub page_url: String,
    pub page_slug: Option<String>,

    // Player
    pub player: PlayerSettings,
}

/// The part of the configuration the in-page player needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSettings {
    pub placeholder_stream_url: String,
    pub adaptive_library_url: String,
    pub ready_timeout: Duration,
    pub volume_indicator_duration: Duration,
    pub prefer_highest_quality: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            placeholder_stream_url: constants::PLACEHOLDER_STREAM_URL.to_string(),
            adaptive_library_url: constants::ADAPTIVE_LIBRARY_URL.to_string(),
            ready_timeout: constants::READY_TIMEOUT,
            volume_indicator_duration: constants::VOLUME_INDICATOR_DURATION,
            prefer_highest_quality: false,
        }
    }
}

impl Config {
    /// Read every setting, falling back to defaults for all but `PAGE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error when `PAGE_URL` is unset or a number or flag does not
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Feed
            feed_url: env_or_default("FEED_URL", constants::DEFAULT_FEED_URL),
            fetch_timeout: Duration::from_secs(parse_env_u64("FETCH_TIMEOUT_SECS", 30)?),

            // Page
            page_url: required_env("PAGE_URL")?,
            page_slug: optional_env("PAGE_SLUG"),

            // Player
            player: PlayerSettings {
                placeholder_stream_url: env_or_default(
                    "PLACEHOLDER_STREAM_URL",
                    constants::PLACEHOLDER_STREAM_URL,
                ),
                adaptive_library_url: env_or_default(
                    "ADAPTIVE_LIBRARY_URL",
                    constants::ADAPTIVE_LIBRARY_URL,
                ),
                ready_timeout: Duration::from_millis(parse_env_u64(
                    "READY_TIMEOUT_MS",
                    duration_millis(constants::READY_TIMEOUT),
                )?),
                volume_indicator_duration: Duration::from_millis(parse_env_u64(
                    "VOLUME_INDICATOR_MS",
                    duration_millis(constants::VOLUME_INDICATOR_DURATION),
                )?),
                prefer_highest_quality: parse_env_bool("PREFER_HIGHEST_QUALITY", false)?,
            },
        })
    }

    /// Configuration suitable for tests: local feed, default player settings.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            feed_url: constants::DEFAULT_FEED_URL.to_string(),
            fetch_timeout: Duration::from_secs(5),
            page_url: "http://localhost:8080/post/sample.html".to_string(),
            page_slug: None,
            player: PlayerSettings::default(),
        }
    }

    /// Check cross-field constraints `from_env` cannot.
    ///
    /// # Errors
    ///
    /// Returns an error for non-absolute URLs, a zero readiness wait, or a
    /// volume indicator shown for a second or longer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "FEED_URL".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        for (name, value) in [("FEED_URL", &self.feed_url), ("PAGE_URL", &self.page_url)] {
            if url::Url::parse(value).is_err() {
                return Err(ConfigError::InvalidValue {
                    name: name.to_string(),
                    message: format!("not an absolute URL: '{value}'"),
                });
            }
        }
        if self.player.ready_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "READY_TIMEOUT_MS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.player.volume_indicator_duration >= Duration::from_secs(1) {
            return Err(ConfigError::InvalidValue {
                name: "VOLUME_INDICATOR_MS".to_string(),
                message: "must be under 1000".to_string(),
            });
        }
        Ok(())
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Value of `name`, treating an empty string as unset.
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    env_value(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_env(name: &str) -> Option<String> {
    env_value(name)
}

fn env_or_default(name: &str, default: &str) -> String {
    env_value(name).unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    env_value(name).map_or(Ok(default), |value| {
        value.trim().parse().map_err(|source| ConfigError::ParseInt {
            name: name.to_string(),
            value,
            source,
        })
    })
}

fn parse_env_bool(name: &str, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = env_value(name) else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::ParseBool {
            name: name.to_string(),
            value,
        }),
    }
}
