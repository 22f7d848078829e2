//! Graph Registry REST Service
//!
//! Exposes the registry over HTTP/JSON.
//!
//! ## Endpoints
//!
//! - `POST /api/graphs` - Store a graph, returns its handle
//! - `GET /api/graphs/:handle` - Summary of a stored graph
//! - `POST /api/graphs/:handle/shortest_path` - Shortest path between two vertices
//! - `DELETE /api/graphs/:handle` - Delete a stored graph
//! - `GET /health` - Detailed service health check
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe

pub mod middleware;
pub mod routes;
pub mod state;

pub use middleware::{metrics_middleware, record_path_metrics, record_submit_metrics};
pub use routes::{create_router, AppState, ErrorResponse};
pub use state::ServiceState;
