use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// `.toml` or `.json` matrix file; the embedded matrix is used when unset
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_skin_tone_weight")]
    pub skin_tone: f64,
    #[serde(default = "default_contrast_weight")]
    pub contrast: f64,
    #[serde(default = "default_body_type_weight")]
    pub body_type: f64,
    #[serde(default = "default_quick_uniform_weight")]
    pub quick_uniform: f64,
    #[serde(default = "default_lifestyle_weight")]
    pub lifestyle: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            skin_tone: default_skin_tone_weight(),
            contrast: default_contrast_weight(),
            body_type: default_body_type_weight(),
            quick_uniform: default_quick_uniform_weight(),
            lifestyle: default_lifestyle_weight(),
        }
    }
}

fn default_skin_tone_weight() -> f64 { 0.35 }
fn default_contrast_weight() -> f64 { 0.25 }
fn default_body_type_weight() -> f64 { 0.30 }
fn default_quick_uniform_weight() -> f64 { 0.20 }
fn default_lifestyle_weight() -> f64 { 0.10 }

impl WeightsConfig {
    /// Convert into engine weights, rejecting values that would make scores
    /// meaningless (negative, NaN or infinite)
    pub fn to_weights(&self) -> Result<ScoringWeights, ConfigError> {
        let weights = ScoringWeights {
            skin_tone: self.skin_tone,
            contrast: self.contrast,
            body_type: self.body_type,
            quick_uniform: self.quick_uniform,
            lifestyle: self.lifestyle,
        };

        weights
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(weights)
    }
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

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PRAXIS_)
    /// 5. Conventional variables (CATALOG_PATH, PORT)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PRAXIS__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("PRAXIS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_conventional_env(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PRAXIS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Honour the unprefixed variables most deploy targets set
fn apply_conventional_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(path) = env::var("CATALOG_PATH") {
        builder = builder.set_override("catalog.path", path)?;
    }
    if let Ok(port) = env::var("PORT") {
        let port: u16 = port
            .parse()
            .map_err(|_| ConfigError::Message(format!("PORT is not a valid port: {}", port)))?;
        builder = builder.set_override("server.port", i64::from(port))?;
    }

    builder.build()
}
