//! HTTP endpoints for recording matches, reading standings and monitoring
//!
//! Served with Axum. Reads always recompute the season from the match log.

use crate::error::LadderError;
use crate::service::app::{AppState, RecordMatchRequest};
use crate::service::health::{HealthCheck, HealthStatus};
use anyhow::{Context, Result};
use axum::{
    extract::{FromRequest, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use prometheus::{Encoder, TextEncoder};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host to bind to (typically "0.0.0.0" for all interfaces)
    pub host: String,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

/// HTTP server exposing the ladder
pub struct HttpServer {
    config: HttpServerConfig,
    state: Arc<AppState>,
    shutdown_tx: broadcast::Sender<()>,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: HttpServerConfig, state: Arc<AppState>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config,
            state,
            shutdown_tx,
        }
    }

    /// Serve until [`HttpServer::stop`] is called
    pub async fn start(&self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .context("Invalid HTTP server address")?;

        let app = router(self.state.clone());
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        info!("HTTP server listening on http://{}", addr);

        let mut shutdown_rx = self.shutdown_tx.subscribe();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("HTTP server shutdown signal received");
            })
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Stop the HTTP server
    pub fn stop(&self) {
        info!("Stopping HTTP server...");

        if let Err(e) = self.shutdown_tx.send(()) {
            warn!("Failed to send shutdown signal to HTTP server: {}", e);
        }
    }
}

/// Create the Axum router with all endpoints
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/alive", get(alive_handler))
        .route("/match", post(record_match_handler))
        .route("/standings", get(standings_handler))
        .route("/weeks", get(weeks_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Match payload accepted either as a form or as JSON
pub struct MatchPayload(pub RecordMatchRequest);

impl<S> FromRequest<S> for MatchPayload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("application/json"))
            .unwrap_or(false);

        if is_json {
            let Json(payload) = Json::<RecordMatchRequest>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(payload))
        } else {
            let Form(payload) = Form::<RecordMatchRequest>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(payload))
        }
    }
}

fn error_response(status: StatusCode, message: impl std::fmt::Display) -> Response {
    (status, Json(json!({ "error": message.to_string() }))).into_response()
}

fn internal_error(context: &str, e: anyhow::Error) -> Response {
    error!("{}: {:#}", context, e);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, context)
}

/// Root endpoint handler - shows service information
async fn root_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "service": state.config().service.name,
        "version": env!("CARGO_PKG_VERSION"),
        "season_start": state.calendar().start(),
        "endpoints": [
            "/health",
            "/alive",
            "/match",
            "/standings",
            "/weeks",
            "/metrics"
        ]
    }))
}

/// Full health check endpoint handler
async fn health_handler(State(state): State<Arc<AppState>>) -> Response {
    debug!("Health check requested");

    match HealthCheck::check(state).await {
        Ok(health) => {
            let code = match health.status {
                HealthStatus::Healthy => StatusCode::OK,
                HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
            };
            (code, Json(health)).into_response()
        }
        Err(e) => internal_error("Health check failed", e),
    }
}

/// Liveness check endpoint handler
async fn alive_handler() -> impl IntoResponse {
    match HealthCheck::liveness_check() {
        HealthStatus::Healthy => (StatusCode::OK, "Alive"),
        HealthStatus::Unhealthy => (StatusCode::SERVICE_UNAVAILABLE, "Not alive"),
    }
}

/// Record a match played today
async fn record_match_handler(
    State(state): State<Arc<AppState>>,
    MatchPayload(request): MatchPayload,
) -> Response {
    match state.record_match(request).await {
        Ok(game) => (StatusCode::CREATED, Json(game)).into_response(),
        Err(e) => match e.downcast_ref::<LadderError>() {
            Some(
                err @ (LadderError::InvalidMatch { .. } | LadderError::DateBeforeSeason { .. }),
            ) => error_response(StatusCode::BAD_REQUEST, err),
            _ => internal_error("Failed to record match", e),
        },
    }
}

/// Ranking as of the latest week
async fn standings_handler(State(state): State<Arc<AppState>>) -> Response {
    let report = match state.compute_season().await {
        Ok(report) => report,
        Err(e) => return internal_error("Failed to compute season", e),
    };

    match report.latest_ranking() {
        Ok(ranking) => Json(json!({
            "week": report.latest().map(|s| s.week),
            "matches": report.matches,
            "ranking": ranking,
        }))
        .into_response(),
        Err(e) => internal_error("Failed to rank players", e),
    }
}

/// Every weekly snapshot
async fn weeks_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.compute_season().await {
        Ok(report) => Json(report.snapshots).into_response(),
        Err(e) => internal_error("Failed to compute season", e),
    }
}

/// Prometheus metrics endpoint handler
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let metric_families = state.metrics().registry().gather();
    let encoder = TextEncoder::new();

    match encoder.encode_to_string(&metric_families) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, encoder.format_type().to_string())],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode metrics")
        }
    }
}
