//! Parcel Desk - MCP customer-support tool server.
//!
//! Serves the order and support-information tools over stdio (for desktop
//! MCP clients that spawn the process) or HTTP (for remote clients).
//!
//! # Configuration
//!
//! Environment variables (a `.env` file is loaded if present):
//!
//! - `PARCEL_DESK_TRANSPORT` - `http` (default) or `stdio`
//! - `PARCEL_DESK_HOST` / `PARCEL_DESK_PORT` - HTTP bind address
//! - `PARCEL_DESK_AUTH_TOKEN` - bearer token required on `/mcp`
//! - `PARCEL_DESK_CONTENT_PATH` - support content override
//! - `PARCEL_DESK_LOG_FORMAT` - `text` (default) or `json`
//! - `SENTRY_DSN` - error tracking

#![cfg_attr(not(test), forbid(unsafe_code))]

use parcel_desk_server::AppError;
use parcel_desk_server::config::{LogFormat, ServerConfig, Transport};
use parcel_desk_server::mcp::stdio;
use parcel_desk_server::routes;
use parcel_desk_server::state::AppState;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ServerConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            // Tool arguments carry customer ids
            send_default_pii: false,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Install the tracing subscriber.
///
/// Logs always go to stderr: in stdio mode stdout belongs to the protocol.
fn init_tracing(config: &ServerConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "parcel_desk_server=info,parcel_desk_core=info,tower_http=debug".into());

    let is_json = config.log_format == LogFormat::Json;
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!is_json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(config.transport == Transport::Http)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = ServerConfig::from_env()?;

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing(&config);
    tracing::info!(?config, "Configuration loaded");

    let state = AppState::from_config(config.clone())
        .inspect_err(|e| tracing::error!(error = %e, "Failed to load support content"))?;

    match config.transport {
        Transport::Stdio => stdio::serve(state.mcp()).await?,
        Transport::Http => serve_http(state, &config).await?,
    }
    Ok(())
}

async fn serve_http(state: AppState, config: &ServerConfig) -> Result<(), AppError> {
    let app = routes::app(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .inspect_err(|e| tracing::error!(error = %e, %addr, "Failed to bind"))?;
    tracing::info!("parcel-desk listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
