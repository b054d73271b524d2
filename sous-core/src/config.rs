//! Configuration from environment variables.
//!
//! Every loader has a `from_lookup` form taking a variable lookup function, so
//! callers (and tests) can resolve settings from somewhere other than the
//! process environment.

use std::env;
use std::fmt;
use thiserror::Error;

/// Default Hugging Face inference base URL. The model name is appended as a path.
pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Default text-generation model.
pub const DEFAULT_MODEL: &str = "HuggingFaceH4/zephyr-7b-beta";

/// Default PostgreSQL port when assembling a URL from `DB_HOST`/`DB_NAME`.
pub const DEFAULT_DB_PORT: u16 = 5432;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

fn env_lookup(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Settings for the text-generation endpoint.
#[derive(Clone)]
pub struct GeneratorConfig {
    /// Bearer token for the inference API.
    pub api_key: String,
    /// Model path, e.g. "HuggingFaceH4/zephyr-7b-beta".
    pub model: String,
    /// Base URL the model path is appended to.
    pub base_url: String,
}

impl fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeneratorConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `API_KEY`: bearer token for the inference API
    ///
    /// Optional:
    /// - `SOUS_AI_MODEL`: model path (default: "HuggingFaceH4/zephyr-7b-beta")
    /// - `SOUS_AI_BASE_URL`: base URL (default: "https://api-inference.huggingface.co/models")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key =
            lookup("API_KEY").ok_or_else(|| ConfigError::MissingEnvVar("API_KEY".to_string()))?;

        let model = lookup("SOUS_AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = lookup("SOUS_AI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            model,
            base_url,
        })
    }
}

/// Location of the recipe database.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut shown = url::Url::parse(&self.url).ok();
        if let Some(u) = shown.as_mut() {
            if u.password().is_some() {
                let _ = u.set_password(Some("redacted"));
            }
        }
        f.debug_struct("DatabaseConfig")
            .field(
                "url",
                &shown.map(String::from).unwrap_or_else(|| "<unparseable>".to_string()),
            )
            .finish()
    }
}

impl DatabaseConfig {
    /// Load configuration from environment variables.
    ///
    /// `DATABASE_URL` wins when set. Otherwise the URL is assembled from
    /// `DB_HOST` and `DB_NAME` (both required) plus optional `DB_PORT`,
    /// `DB_USER` and `DB_PASSWORD`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            return Ok(Self { url });
        }

        let host =
            lookup("DB_HOST").ok_or_else(|| ConfigError::MissingEnvVar("DB_HOST".to_string()))?;
        let name =
            lookup("DB_NAME").ok_or_else(|| ConfigError::MissingEnvVar("DB_NAME".to_string()))?;

        let port = match lookup("DB_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: "DB_PORT".to_string(),
                value: raw.clone(),
            })?,
            None => DEFAULT_DB_PORT,
        };

        let invalid_host = || ConfigError::InvalidValue {
            name: "DB_HOST".to_string(),
            value: host.clone(),
        };

        let mut url =
            url::Url::parse(&format!("postgres://{}", host)).map_err(|_| invalid_host())?;
        if url.host_str().is_none() || url.path() != "/" && !url.path().is_empty() {
            return Err(invalid_host());
        }
        url.set_port(Some(port)).map_err(|_| invalid_host())?;
        url.set_path(&name);

        if let Some(user) = lookup("DB_USER") {
            url.set_username(&user).map_err(|_| ConfigError::InvalidValue {
                name: "DB_USER".to_string(),
                value: user.clone(),
            })?;
        }
        if let Some(password) = lookup("DB_PASSWORD") {
            url.set_password(Some(password.as_str()))
                .map_err(|_| ConfigError::InvalidValue {
                    name: "DB_PASSWORD".to_string(),
                    value: "<redacted>".to_string(),
                })?;
        }

        Ok(Self { url: url.into() })
    }
}
