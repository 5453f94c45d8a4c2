use crate::error::{KultureError, Result};
use crate::models::Coordinate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Geographic centroid of India, used when nothing else centres the map
pub const INDIA_CENTROID: Coordinate = Coordinate::new_unchecked(20.5937, 78.9629);

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Which backing store serves cultural records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process immutable dataset
    #[default]
    Static,
    /// PostgreSQL database
    Postgres,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Static => f.write_str("static"),
            BackendKind::Postgres => f.write_str("postgres"),
        }
    }
}

/// Layered configuration for Kulture
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub backend: ConfigValue<BackendKind>,
    pub default_anchor: ConfigValue<Coordinate>,
    /// Fixture file for the static backend (built-in dataset when unset)
    pub fixture: ConfigValue<Option<PathBuf>>,
    pub database_url: ConfigValue<Option<String>>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            backend: ConfigValue::new(BackendKind::Static, ConfigSource::Default),
            default_anchor: ConfigValue::new(INDIA_CENTROID, ConfigSource::Default),
            fixture: ConfigValue::new(None, ConfigSource::Default),
            database_url: ConfigValue::new(None, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| KultureError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| KultureError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(backend) = file_config.backend {
            self.backend.update(backend, ConfigSource::File);
        }

        if let Some(anchor) = file_config.default_anchor {
            self.default_anchor.update(anchor, ConfigSource::File);
        }

        if let Some(fixture) = file_config.fixture {
            self.fixture.update(Some(fixture), ConfigSource::File);
        }

        if let Some(database_url) = file_config.database_url {
            self.database_url.update(Some(database_url), ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // KULTURE_BACKEND
        if let Ok(backend_str) = env::var("KULTURE_BACKEND") {
            match parse_backend(&backend_str) {
                Ok(backend) => self.backend.update(backend, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid KULTURE_BACKEND value '{}': expected static or postgres",
                    backend_str
                ),
            }
        }

        // KULTURE_DEFAULT_ANCHOR
        if let Ok(anchor_str) = env::var("KULTURE_DEFAULT_ANCHOR") {
            match anchor_str.parse::<Coordinate>() {
                Ok(anchor) => self.default_anchor.update(anchor, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid KULTURE_DEFAULT_ANCHOR value '{}': expected 'lat,lon'",
                    anchor_str
                ),
            }
        }

        // KULTURE_FIXTURE
        if let Ok(fixture) = env::var("KULTURE_FIXTURE") {
            self.fixture.update(Some(PathBuf::from(fixture)), ConfigSource::Environment);
        }

        // DATABASE_URL
        if let Ok(database_url) = env::var("DATABASE_URL") {
            if !database_url.trim().is_empty() {
                self.database_url.update(Some(database_url), ConfigSource::Environment);
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(backend) = overrides.backend {
            self.backend.update(backend, ConfigSource::Cli);
        }

        if let Some(anchor) = overrides.default_anchor {
            self.default_anchor.update(anchor, ConfigSource::Cli);
        }

        if let Some(fixture) = overrides.fixture {
            self.fixture.update(Some(fixture), ConfigSource::Cli);
        }

        if let Some(database_url) = overrides.database_url {
            self.database_url.update(Some(database_url), ConfigSource::Cli);
        }
    }

    /// Database URL, required when the postgres backend is selected
    pub fn require_database_url(&self) -> Result<&str> {
        self.database_url.value.as_deref().ok_or_else(|| KultureError::ConfigMissing {
            key: "database_url".to_string(),
        })
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("backend".to_string(), (self.backend.value.to_string(), self.backend.source));

        map.insert(
            "default_anchor".to_string(),
            (self.default_anchor.value.to_string(), self.default_anchor.source),
        );

        map.insert(
            "fixture".to_string(),
            (
                self.fixture
                    .value
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(built-in)".to_string()),
                self.fixture.source,
            ),
        );

        map.insert(
            "database_url".to_string(),
            (
                self.database_url
                    .value
                    .as_deref()
                    .map(redact_database_url)
                    .unwrap_or_else(|| "(unset)".to_string()),
                self.database_url.source,
            ),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    backend: Option<BackendKind>,
    default_anchor: Option<Coordinate>,
    fixture: Option<PathBuf>,
    database_url: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub backend: Option<BackendKind>,
    pub default_anchor: Option<Coordinate>,
    pub fixture: Option<PathBuf>,
    pub database_url: Option<String>,
}

/// Parse backend kind from string
pub fn parse_backend(s: &str) -> Result<BackendKind> {
    match s.trim().to_lowercase().as_str() {
        "static" | "memory" => Ok(BackendKind::Static),
        "postgres" | "postgresql" | "pg" => Ok(BackendKind::Postgres),
        _ => Err(KultureError::ConfigInvalid {
            key: "backend".to_string(),
            reason: format!("Invalid backend: {}. Use static or postgres", s),
        }),
    }
}

/// Hide the password portion of a database URL
pub fn redact_database_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let credentials = &url[scheme_end + 3..at];
            let user = credentials.split(':').next().unwrap_or("");
            format!("{}{}:***{}", &url[..scheme_end + 3], user, &url[at..])
        }
        _ => url.to_string(),
    }
}
