//! Axum routes for the graph registry service.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Json, Path as UrlPath, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::pathfind::{PathStrategy, SearchControl};
use crate::store::{GraphSummary, RegistryError};
use crate::types::{GraphDescription, GraphHandle, VertexId};

use super::middleware::{record_path_metrics, record_submit_metrics};
use super::state::ServiceState;

/// Type alias for the shared handler state.
pub type AppState = ServiceState;

type ApiError = (StatusCode, Json<ErrorResponse>);

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response to a successful submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// Handle the graph is stored under.
    pub handle: GraphHandle,
}

/// Request for a shortest path within a stored graph.
///
/// Queries always run the priority-queue search; unknown fields such as a
/// strategy selector are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShortestPathRequest {
    /// Start vertex.
    pub source: VertexId,
    /// End vertex.
    pub target: VertexId,
}

/// Shortest path response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortestPathResponse {
    /// Graph that was queried.
    pub handle: GraphHandle,
    /// Vertices from source to target inclusive.
    pub path: Vec<VertexId>,
    /// Number of edges on the path.
    pub hops: usize,
}

/// Response to a successful deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Deleted handle.
    pub handle: GraphHandle,
    /// Always "deleted".
    pub result: String,
}

/// Service health response (detailed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub live_graphs: usize,
    pub deleted_graphs: usize,
    pub next_handle: Option<GraphHandle>,
    pub uptime_secs: i64,
}

/// Simple liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
}

/// Readiness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub details: Option<String>,
}

/// Structured error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Machine-readable error code.
    pub code: String,
    /// Additional error details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response with code and message.
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            details: None,
        }
    }

    /// Add details to the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Map a registry error to a status code and error body.
fn registry_error(e: RegistryError) -> ApiError {
    let (status, code) = match &e {
        RegistryError::InvalidEdgeEndpoint { .. } => (StatusCode::BAD_REQUEST, "INVALID_EDGE_ENDPOINT"),
        RegistryError::DuplicateVertex(_) => (StatusCode::BAD_REQUEST, "DUPLICATE_VERTEX"),
        RegistryError::TooLarge { .. } => (StatusCode::BAD_REQUEST, "GRAPH_TOO_LARGE"),
        RegistryError::UnknownGraph(_) => (StatusCode::NOT_FOUND, "GRAPH_NOT_FOUND"),
        RegistryError::GraphDeleted(_) => (StatusCode::GONE, "GRAPH_DELETED"),
        RegistryError::UnknownVertex { .. } => (StatusCode::NOT_FOUND, "VERTEX_NOT_FOUND"),
        RegistryError::Unreachable { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "UNREACHABLE"),
        RegistryError::Cancelled(_) => (StatusCode::GATEWAY_TIMEOUT, "QUERY_TIMEOUT"),
        RegistryError::HandlesExhausted => (StatusCode::SERVICE_UNAVAILABLE, "HANDLES_EXHAUSTED"),
    };
    tracing::warn!(code = code, error = %e, kind = ?e.kind(), "Request error");
    (status, Json(ErrorResponse::new(code, e.to_string())))
}

fn internal_error(e: impl std::fmt::Display) -> ApiError {
    tracing::error!(error = %e, "Worker task failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("INTERNAL", "Internal error").with_details(e.to_string())),
    )
}

fn parse_handle(raw: &str) -> Result<GraphHandle, ApiError> {
    GraphHandle::parse(raw).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(
                ErrorResponse::new("INVALID_HANDLE", "Graph handle must be a positive integer")
                    .with_details(raw.to_string()),
            ),
        )
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Store a new graph.
async fn submit_handler(
    State(state): State<Arc<AppState>>,
    Json(description): Json<GraphDescription>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let registry = Arc::clone(&state.registry);
    let vertex_count = description.vertices.len();
    let edge_count = description.declared_edge_count();

    let handle = tokio::task::spawn_blocking(move || registry.submit(&description))
        .await
        .map_err(internal_error)?
        .map_err(registry_error)?;

    record_submit_metrics(vertex_count, edge_count);
    Ok((StatusCode::CREATED, Json(SubmitResponse { handle })))
}

/// Describe a stored graph.
async fn summary_handler(
    State(state): State<Arc<AppState>>,
    UrlPath(raw_handle): UrlPath<String>,
) -> Result<Json<GraphSummary>, ApiError> {
    let handle = parse_handle(&raw_handle)?;
    let summary = state.registry.summary(handle).map_err(registry_error)?;
    Ok(Json(summary))
}

/// Find a shortest path between two vertices of a stored graph.
///
/// The search runs on a blocking thread and is abandoned once the configured
/// query timeout elapses.
async fn shortest_path_handler(
    State(state): State<Arc<AppState>>,
    UrlPath(raw_handle): UrlPath<String>,
    Json(request): Json<ShortestPathRequest>,
) -> Result<Json<ShortestPathResponse>, ApiError> {
    let handle = parse_handle(&raw_handle)?;
    let timeout = state.config.query_timeout;
    let start = Instant::now();

    let control = SearchControl::with_timeout(timeout);
    let task_control = control.clone();
    let registry = Arc::clone(&state.registry);
    let strategy = PathStrategy::PriorityQueue;

    let task = tokio::task::spawn_blocking(move || {
        registry.shortest_path_with(handle, request.source, request.target, strategy, &task_control)
    });

    let path = match tokio::time::timeout(timeout, task).await {
        Ok(joined) => joined.map_err(internal_error)?.map_err(registry_error)?,
        Err(_) => {
            control.cancel();
            return Err(registry_error(RegistryError::Cancelled(handle)));
        }
    };

    record_path_metrics(path.hops(), strategy, start.elapsed().as_millis() as u64);
    Ok(Json(ShortestPathResponse {
        handle,
        hops: path.hops(),
        path: path.into_vertices(),
    }))
}

/// Delete a stored graph.
async fn delete_handler(
    State(state): State<Arc<AppState>>,
    UrlPath(raw_handle): UrlPath<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let handle = parse_handle(&raw_handle)?;
    let registry = Arc::clone(&state.registry);

    // Waits for in-flight queries on the graph, so keep it off the runtime.
    tokio::task::spawn_blocking(move || registry.delete(handle))
        .await
        .map_err(internal_error)?
        .map_err(registry_error)?;

    Ok(Json(DeleteResponse {
        handle,
        result: "deleted".to_string(),
    }))
}

/// Health check endpoint (detailed).
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let stats = state.registry.stats();
    Json(HealthResponse {
        status: if stats.next_handle.is_some() { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        live_graphs: stats.live_graphs,
        deleted_graphs: stats.deleted_graphs,
        next_handle: stats.next_handle,
        uptime_secs: state.uptime_secs(),
    })
}

/// Liveness probe endpoint.
///
/// Returns 200 if the process is alive.
async fn liveness_handler() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "alive".to_string(),
    })
}

/// Readiness probe endpoint.
///
/// Returns 503 once the registry can no longer issue handles.
async fn readiness_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReadinessResponse>, (StatusCode, Json<ReadinessResponse>)> {
    if state.registry.stats().next_handle.is_some() {
        Ok(Json(ReadinessResponse {
            ready: true,
            details: None,
        }))
    } else {
        Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse {
                ready: false,
                details: Some("Handle space exhausted".to_string()),
            }),
        ))
    }
}

// ============================================================================
// Router Construction
// ============================================================================

/// Create the Axum router for the graph registry service.
pub fn create_router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        // Graph lifecycle
        .route("/api/graphs", post(submit_handler))
        .route("/api/graphs/:handle", get(summary_handler).delete(delete_handler))
        // Queries
        .route("/api/graphs/:handle/shortest_path", post(shortest_path_handler))
        // Health checks
        .route("/health", get(health_handler))
        .route("/health/live", get(liveness_handler))
        .route("/health/ready", get(readiness_handler))
        .with_state(state)
}
