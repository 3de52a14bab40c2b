//! Configuration management for Chatline
//!
//! Configuration is loaded from environment variables, falling back to a
//! properties file and then to built-in defaults. The API key is the only
//! required setting.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// API key value that stands for "no real credential configured"
pub const PLACEHOLDER_API_KEY: &str = "sk-your-api-key-here";

/// Default chat completions endpoint
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Model used when the caller does not name one
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Properties file consulted when no path is configured
pub const DEFAULT_CONFIG_FILE: &str = "config.properties";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const WRITE_TIMEOUT: Duration = Duration::from_secs(30);
const READ_TIMEOUT: Duration = Duration::from_secs(60);

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Provider API key
    pub api_key: String,
    /// Chat completions endpoint
    pub api_url: String,

    /// Model used when none is given per call
    pub default_model: String,
    /// Sampling temperature (0.0 to 2.0)
    pub temperature: f64,
    /// Maximum tokens to generate
    pub max_tokens: u32,

    pub connect_timeout: Duration,
    pub write_timeout: Duration,
    pub read_timeout: Duration,
}

/// Read-only credential resolved once per session
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub api_key: String,
    pub endpoint_url: String,
}

impl Credential {
    pub fn new(api_key: impl Into<String>, endpoint_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint_url: endpoint_url.into(),
        }
    }

    /// True when the key is the placeholder sentinel
    pub fn is_placeholder(&self) -> bool {
        self.api_key == PLACEHOLDER_API_KEY
    }
}

// Keep the key out of logs and panics.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &"<redacted>")
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment and properties file
    ///
    /// The properties file is `CHATLINE_CONFIG_FILE` if set, otherwise
    /// `config.properties` in the working directory. A missing file is not
    /// an error.
    pub fn from_env() -> Result<Self> {
        let path = env::var("CHATLINE_CONFIG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        Self::from_sources(|key| env::var(key).ok(), Some(&path))
    }

    /// Load configuration from an environment lookup and an optional properties file
    pub fn from_sources<F>(lookup: F, properties_path: Option<&Path>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let properties = match properties_path {
            Some(path) if path.exists() => load_properties(path)?,
            _ => HashMap::new(),
        };

        let setting = |env_key: &str, prop_key: &str| -> Option<String> {
            lookup(env_key)
                .filter(|v| !v.is_empty())
                .or_else(|| properties.get(prop_key).filter(|v| !v.is_empty()).cloned())
        };

        let Some(api_key) = setting("OPENAI_API_KEY", "openai.api.key") else {
            bail!(
                "API key not found. Please set it in environment variable OPENAI_API_KEY \
                 or as openai.api.key in properties file {}",
                properties_path
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string())
            );
        };

        let temperature: f64 = setting("CHATLINE_TEMPERATURE", "openai.temperature")
            .unwrap_or_else(|| "0.7".to_string())
            .parse()
            .context("Invalid CHATLINE_TEMPERATURE")?;
        if !(0.0..=2.0).contains(&temperature) {
            bail!("CHATLINE_TEMPERATURE must be between 0.0 and 2.0, got {}", temperature);
        }

        Ok(Self {
            api_key,
            api_url: setting("OPENAI_API_URL", "openai.api.url")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),

            default_model: setting("CHATLINE_MODEL", "openai.model")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature,
            max_tokens: setting("CHATLINE_MAX_TOKENS", "openai.max_tokens")
                .unwrap_or_else(|| "1000".to_string())
                .parse()
                .context("Invalid CHATLINE_MAX_TOKENS")?,

            connect_timeout: CONNECT_TIMEOUT,
            write_timeout: WRITE_TIMEOUT,
            read_timeout: READ_TIMEOUT,
        })
    }

    /// Credential for provider exchanges
    pub fn credential(&self) -> Credential {
        Credential::new(self.api_key.clone(), self.api_url.clone())
    }
}

/// Parse a Java-style properties file
///
/// Accepts `=`, `:` and whitespace separators and `#`/`!` comments. Values
/// are taken literally apart from the format's backslash escapes.
fn load_properties(path: &Path) -> Result<HashMap<String, String>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to read properties file {}", path.display()))?;

    java_properties::read(BufReader::new(file))
        .with_context(|| format!("Failed to parse properties file {}", path.display()))
}
