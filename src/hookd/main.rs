//! Hook server.
//!
//! Lets a host invoke the address hooks over HTTP. A hook that aborts is
//! answered with 417 and the user-facing message, like a validation error.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use clap::Parser;
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use addrgeo::diagnostics::DiagnosticEntry;
use addrgeo::{
    build_hooks, AddressRecord, Config, ErrorLog, HookError, HookName, NominatimHooks,
};

#[derive(Parser, Debug)]
#[command(name = "hookd")]
#[command(about = "Address geolocation hook server")]
struct Args {
    /// Config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides the config file
    #[arg(short, long)]
    listen: Option<String>,

    /// Lookup endpoint, overrides the config file
    #[arg(long)]
    endpoint: Option<String>,
}

/// Application state shared across handlers
struct AppState {
    hooks: NominatimHooks,
    log: Arc<ErrorLog>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }
    if let Some(endpoint) = args.endpoint {
        config.lookup.endpoint = endpoint;
    }

    info!("addrgeo hook server");
    info!("Lookup endpoint: {}", config.lookup.endpoint);

    let (hooks, log) = build_hooks(&config)?;
    let app = router(Arc::new(AppState { hooks, log }));

    info!("Starting server on {}", config.server.listen);

    let listener = tokio::net::TcpListener::bind(&config.server.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.listen))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/events/{event}", post(event_handler))
        .route("/v1/hooks/{hook}", post(hook_handler))
        .route("/v1/error-log", get(error_log_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Serialize)]
struct ErrorResponse {
    exc_type: &'static str,
    message: String,
}

/// Error returned to the host
enum ApiError {
    Hook(HookError),
    UnknownHook(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, exc_type, message) = match self {
            ApiError::Hook(e) => (
                StatusCode::EXPECTATION_FAILED,
                "ValidationError",
                e.to_string(),
            ),
            ApiError::UnknownHook(name) => (
                StatusCode::NOT_FOUND,
                "DoesNotExistError",
                format!("Unknown hook: {}", name),
            ),
        };
        (status, Json(ErrorResponse { exc_type, message })).into_response()
    }
}

impl From<HookError> for ApiError {
    fn from(e: HookError) -> Self {
        warn!("Hook aborted: {}", e);
        ApiError::Hook(e)
    }
}

/// Run every hook bound to an event
async fn event_handler(
    State(state): State<Arc<AppState>>,
    Path(event): Path<String>,
    Json(record): Json<AddressRecord>,
) -> Result<Json<AddressRecord>, ApiError> {
    let record = state.hooks.run(&event, record).await?;
    Ok(Json(record))
}

/// Run a single hook by name
async fn hook_handler(
    State(state): State<Arc<AppState>>,
    Path(hook): Path<String>,
    Json(record): Json<AddressRecord>,
) -> Result<Json<AddressRecord>, ApiError> {
    let name = HookName::parse(&hook).ok_or(ApiError::UnknownHook(hook))?;
    let record = state.hooks.call(name, record, "manual").await?;
    Ok(Json(record))
}

async fn error_log_handler(State(state): State<Arc<AppState>>) -> Json<Vec<DiagnosticEntry>> {
    Json(state.log.entries())
}
