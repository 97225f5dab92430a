use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub vision: VisionSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub cors: CorsSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

/// Image analysis API settings
///
/// The client is only built when both `endpoint` and `key` are set.
#[derive(Debug, Clone, Deserialize)]
pub struct VisionSettings {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub key: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_vision_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_min_tag_confidence")]
    pub min_tag_confidence: f64,
}

impl VisionSettings {
    pub fn is_configured(&self) -> bool {
        !self.endpoint.trim().is_empty() && !self.key.trim().is_empty()
    }
}

impl Default for VisionSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            key: String::new(),
            api_version: default_api_version(),
            timeout_secs: default_vision_timeout(),
            min_tag_confidence: default_min_tag_confidence(),
        }
    }
}

fn default_api_version() -> String { "2023-10-01".to_string() }
fn default_vision_timeout() -> u64 { 30 }
fn default_min_tag_confidence() -> f64 { 0.6 }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
        }
    }
}

fn default_radius_km() -> f64 { crate::core::DEFAULT_RADIUS_KM }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsSettings {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

/// Name of the active configuration profile
pub fn active_profile() -> String {
    std::env::var("ECOTRACK_PROFILE").unwrap_or_else(|_| "dev".to_string())
}

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Sources in order (later overrides earlier):
    /// 1. config/default.toml
    /// 2. config/{profile}.toml, profile from ECOTRACK_PROFILE (default `dev`)
    /// 3. config/local.toml
    /// 4. Environment variables prefixed with ECOTRACK__
    /// 5. DATABASE_URL, VISION_ENDPOINT and VISION_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let profile = active_profile();

        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", profile)).required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., ECOTRACK__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("ECOTRACK")
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("cors.allowed_origins")
        .try_parsing(true)
}

/// Apply the conventional unprefixed variables on top of the layered config
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let overrides = [
        ("database.url", env::var("DATABASE_URL").ok()),
        ("vision.endpoint", env::var("VISION_ENDPOINT").ok()),
        ("vision.key", env::var("VISION_KEY").ok()),
    ];

    let mut builder = Config::builder().add_source(settings);
    for (key, value) in overrides {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}
