use serde::Deserialize;
use std::env;
use std::time::Duration;

const MAX_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Azure Speech
    pub azure_speech_key: String,
    pub azure_speech_region: String,
    pub azure_speech_endpoint: Option<String>,
    pub tts_timeout_secs: u64,
    // Spaces (S3-compatible storage)
    pub spaces_key: String,
    pub spaces_secret: String,
    pub spaces_region: String,
    pub spaces_bucket: String,
    pub spaces_endpoint: Option<String>,
    pub spaces_public_base_url: Option<String>,
    pub spaces_force_path_style: bool,
    pub storage_timeout_secs: u64,
    // Conversion
    pub default_text: String,
    pub default_voice: String,
    pub audio_key_prefix: String,
    pub status_key: String,
    pub status_conditional_writes: bool,
    pub status_max_retries: u32,
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

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };

        let config = Config {
            host: vars.or("HOST", "0.0.0.0"),
            port: vars.parsed("PORT", 8080)?,
            environment: match vars.or("ENVIRONMENT", "development").as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match vars.or("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            azure_speech_key: vars.required("AZURE_SPEECH_KEY")?,
            azure_speech_region: vars.required("AZURE_SPEECH_REGION")?,
            azure_speech_endpoint: vars.optional("AZURE_SPEECH_ENDPOINT"),
            tts_timeout_secs: vars.timeout("TTS_TIMEOUT_SECS", 30)?,
            spaces_key: vars.required("SPACES_KEY")?,
            spaces_secret: vars.required("SPACES_SECRET")?,
            spaces_region: vars.required("SPACES_REGION")?,
            spaces_bucket: vars.required("SPACES_BUCKET")?,
            spaces_endpoint: vars.optional("SPACES_ENDPOINT"),
            spaces_public_base_url: vars.optional("SPACES_PUBLIC_BASE_URL"),
            spaces_force_path_style: vars.flag("SPACES_FORCE_PATH_STYLE", false),
            storage_timeout_secs: vars.timeout("STORAGE_TIMEOUT_SECS", 30)?,
            default_text: vars.or("DEFAULT_TEXT", "Hello World"),
            default_voice: vars.or("DEFAULT_VOICE", "en-US-JennyNeural"),
            audio_key_prefix: vars.or("AUDIO_KEY_PREFIX", "daily_audio"),
            status_key: vars.or("STATUS_KEY", "status.json"),
            status_conditional_writes: vars.flag("STATUS_CONDITIONAL_WRITES", true),
            status_max_retries: vars.parsed("STATUS_MAX_RETRIES", 3)?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Endpoint used by the S3 client.
    pub fn spaces_endpoint_url(&self) -> String {
        self.spaces_endpoint
            .clone()
            .unwrap_or_else(|| format!("https://{}.digitaloceanspaces.com", self.spaces_region))
    }

    /// Base URL under which uploaded objects are publicly reachable.
    pub fn public_base_url(&self) -> String {
        self.spaces_public_base_url.clone().unwrap_or_else(|| {
            format!(
                "https://{}.{}.digitaloceanspaces.com",
                self.spaces_bucket, self.spaces_region
            )
        })
    }

    pub fn tts_timeout(&self) -> Duration {
        Duration::from_secs(self.tts_timeout_secs)
    }

    pub fn storage_timeout(&self) -> Duration {
        Duration::from_secs(self.storage_timeout_secs)
    }
}

struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Unset and blank values are both treated as absent
    fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, name: &'static str) -> Result<String, ConfigError> {
        self.optional(name).ok_or(ConfigError::Missing(name))
    }

    fn or(&self, name: &str, default: &str) -> String {
        self.optional(name).unwrap_or_else(|| default.to_string())
    }

    fn flag(&self, name: &str, default: bool) -> bool {
        self.optional(name)
            .map(|s| s.to_lowercase() == "true")
            .unwrap_or(default)
    }

    fn parsed<T>(&self, name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(name) {
            Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
                name,
                reason: e.to_string(),
            }),
            None => Ok(default),
        }
    }

    fn timeout(&self, name: &'static str, default: u64) -> Result<u64, ConfigError> {
        let secs: u64 = self.parsed(name, default)?;
        if secs == 0 || secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::Invalid {
                name,
                reason: format!("must be between 1 and {} seconds", MAX_TIMEOUT_SECS),
            });
        }
        Ok(secs)
    }
}
