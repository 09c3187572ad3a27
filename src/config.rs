use std::{path::PathBuf, str::FromStr, time::Duration};

pub const DEFAULT_SETTINGS_PATH: &str = "instagram_module_config.yaml";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: String, value: String },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub settings_path: PathBuf,
    pub http: HttpConfig,
}

#[derive(Clone, Debug)]
pub struct HttpConfig {
    pub metadata_timeout_secs: u64,
    pub media_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub proxy: Option<String>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            metadata_timeout_secs: 30,
            media_timeout_secs: 120,
            connect_timeout_secs: 10,
            proxy: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpConfig {
    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_secs(self.metadata_timeout_secs)
    }

    pub fn media_timeout(&self) -> Duration {
        Duration::from_secs(self.media_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from(DEFAULT_SETTINGS_PATH),
            http: HttpConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        build_config(|key| std::env::var(key).ok())
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key: key.to_string(), value }),
        None => Ok(default),
    }
}

/// Builds the config from `INSTABRIDGE_*` keys, falling back to defaults for absent ones.
pub fn build_config(lookup: impl Fn(&str) -> Option<String>) -> Result<AppConfig, ConfigError> {
    info!("Building AppConfig...");
    let defaults = HttpConfig::default();

    let config = AppConfig {
        settings_path: lookup("INSTABRIDGE_SETTINGS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH)),
        http: HttpConfig {
            metadata_timeout_secs: parse_or(&lookup, "INSTABRIDGE_METADATA_TIMEOUT_SECS", defaults.metadata_timeout_secs)?,
            media_timeout_secs: parse_or(&lookup, "INSTABRIDGE_MEDIA_TIMEOUT_SECS", defaults.media_timeout_secs)?,
            connect_timeout_secs: parse_or(&lookup, "INSTABRIDGE_CONNECT_TIMEOUT_SECS", defaults.connect_timeout_secs)?,
            proxy: lookup("INSTABRIDGE_PROXY").filter(|proxy| !proxy.trim().is_empty()),
            user_agent: lookup("INSTABRIDGE_USER_AGENT").unwrap_or(defaults.user_agent),
        },
    };
    info!("AppConfig built");

    Ok(config)
}
