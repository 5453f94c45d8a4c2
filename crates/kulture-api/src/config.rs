use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Bounds on the in-memory session registry
#[derive(Debug, Clone, Copy)]
pub struct SessionLimits {
    /// Sessions untouched for longer than this are dropped
    pub idle_timeout: Duration,
    pub max_sessions: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(30 * 60),
            max_sessions: 10_000,
        }
    }
}

/// API server configuration loaded from environment variables.
///
/// Backend selection is not part of this struct; it comes from the shared
/// layered configuration so the server and the CLI agree.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    /// Layered config file; `kulture.toml` in the working directory when unset
    pub config_file: Option<PathBuf>,
    pub sessions: SessionLimits,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            cors_origin: "http://localhost:3000".to_string(),
            config_file: None,
            sessions: SessionLimits::default(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = env::var("KULTURE_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let cors_origin = env::var("KULTURE_CORS_ORIGIN").unwrap_or(defaults.cors_origin);

        let config_file = env::var("KULTURE_CONFIG").ok().map(PathBuf::from);

        let sessions = SessionLimits {
            idle_timeout: env::var("KULTURE_SESSION_IDLE_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.sessions.idle_timeout),
            max_sessions: env::var("KULTURE_MAX_SESSIONS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(defaults.sessions.max_sessions),
        };

        Self {
            port,
            cors_origin,
            config_file,
            sessions,
        }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
