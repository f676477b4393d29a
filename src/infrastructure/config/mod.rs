use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::domain::narration::{default_voices, parse_voice_catalogue, PollPolicy, VoiceOption};
use crate::infrastructure::repositories::MurfSettings;

const DEFAULT_MURF_BASE_URL: &str = "https://api.murf.ai";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub response_mode: ResponseMode,
    // Murf
    pub murf_api_key: String,
    pub murf_base_url: String,
    pub provider_mode: ProviderMode,
    pub audio_format: String,
    pub provider_timeout_secs: u64,
    // Export polling
    pub poll_interval_secs: u64,
    pub poll_max_attempts: u32,
    // Landing page
    pub voices: Vec<VoiceOption>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// How a successful narration is returned to the browser
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    Json,
    Page,
}

/// Which Murf interaction the synthesis step uses
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderMode {
    /// Create a project, export it and poll the export
    Export,
    /// Generate audio in a single call
    Inline,
}

impl std::fmt::Display for ProviderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderMode::Export => write!(f, "export"),
            ProviderMode::Inline => write!(f, "inline"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value '{value}' for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default =
            |name: &str, default: &str| var(name).unwrap_or_else(|| default.to_string());

        // The key is never defaulted; a blank value counts as missing
        let murf_api_key = var("MURF_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::Missing("MURF_API_KEY"))?;

        let poll_max_attempts: u32 = parse(
            "EXPORT_POLL_MAX_ATTEMPTS",
            or_default("EXPORT_POLL_MAX_ATTEMPTS", "30"),
        )?;
        if poll_max_attempts == 0 {
            return Err(ConfigError::Invalid {
                name: "EXPORT_POLL_MAX_ATTEMPTS",
                value: "0".to_string(),
                reason: "at least one poll is required".to_string(),
            });
        }

        let voices = match var("VOICES") {
            Some(raw) => parse_voice_catalogue(&raw).map_err(|reason| ConfigError::Invalid {
                name: "VOICES",
                value: raw.clone(),
                reason,
            })?,
            None => default_voices(),
        };

        let config = Config {
            host: or_default("HOST", "0.0.0.0"),
            port: parse("PORT", or_default("PORT", "8080"))?,
            environment: match or_default("ENVIRONMENT", "development").as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match or_default("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            response_mode: match or_default("RESPONSE_MODE", "json").to_lowercase().as_str() {
                "json" => ResponseMode::Json,
                "page" => ResponseMode::Page,
                other => {
                    return Err(ConfigError::Invalid {
                        name: "RESPONSE_MODE",
                        value: other.to_string(),
                        reason: "expected 'json' or 'page'".to_string(),
                    })
                }
            },
            murf_api_key,
            murf_base_url: or_default("MURF_BASE_URL", DEFAULT_MURF_BASE_URL),
            provider_mode: match or_default("MURF_MODE", "export").to_lowercase().as_str() {
                "export" => ProviderMode::Export,
                "inline" => ProviderMode::Inline,
                other => {
                    return Err(ConfigError::Invalid {
                        name: "MURF_MODE",
                        value: other.to_string(),
                        reason: "expected 'export' or 'inline'".to_string(),
                    })
                }
            },
            audio_format: or_default("MURF_AUDIO_FORMAT", "MP3"),
            provider_timeout_secs: parse(
                "PROVIDER_TIMEOUT_SECS",
                or_default("PROVIDER_TIMEOUT_SECS", "30"),
            )?,
            poll_interval_secs: parse(
                "EXPORT_POLL_INTERVAL_SECS",
                or_default("EXPORT_POLL_INTERVAL_SECS", "2"),
            )?,
            poll_max_attempts,
            voices,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new(
            Duration::from_secs(self.poll_interval_secs),
            self.poll_max_attempts,
        )
    }

    pub fn murf_settings(&self) -> MurfSettings {
        MurfSettings {
            api_key: self.murf_api_key.clone(),
            base_url: self.murf_base_url.clone(),
            mode: self.provider_mode,
            audio_format: self.audio_format.clone(),
            timeout: Duration::from_secs(self.provider_timeout_secs),
        }
    }
}

fn parse<T>(name: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
        value,
    })
}
