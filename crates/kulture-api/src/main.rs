use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use kulture_core::config::{BackendKind, LayeredConfig};
use kulture_core::RegionAggregator;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kulture_api::{create_router, ApiConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kulture_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_config = ApiConfig::from_env();
    let config = load_config(&api_config)?;

    tracing::info!(
        port = api_config.port,
        backend = %config.backend.value,
        "Starting Kulture API server"
    );

    let store = match kulture_store::open_backend(&config).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open {} backend: {}", config.backend.value, e);
            if config.backend.value == BackendKind::Postgres {
                tracing::error!(
                    "Remediation:\n\
                    1. Ensure PostgreSQL is running\n\
                    2. Verify DATABASE_URL is correct\n\
                    3. Run `kulture db migrate` and `kulture db seed`"
                );
            }
            return Err(e).context("Backend initialisation failed");
        }
    };

    let aggregator = Arc::new(RegionAggregator::new(store, config.default_anchor.value));
    let state = Arc::new(AppState::with_limits(aggregator, api_config.sessions));

    let origin = api_config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid KULTURE_CORS_ORIGIN: {}", api_config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let app = create_router(state).layer(cors);

    let addr = api_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", api_config.cors_origin);
    tracing::info!(
        idle_secs = api_config.sessions.idle_timeout.as_secs(),
        max_sessions = api_config.sessions.max_sessions,
        "Session limits"
    );

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

/// Defaults, then the config file, then the environment
fn load_config(api_config: &ApiConfig) -> anyhow::Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    let file = api_config.config_file.clone().or_else(|| {
        let default = PathBuf::from("kulture.toml");
        default.is_file().then_some(default)
    });

    if let Some(path) = file {
        config = config
            .load_from_file(&path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
    }

    Ok(config.load_from_env())
}
