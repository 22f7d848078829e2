//! Service middleware for request metrics.
//!
//! ## Metrics Exposed
//!
//! - `request` - path, method, status and latency of every request
//! - `shortest_path` - hops, strategy and latency of each answered query
//! - `submit` - vertex and edge counts of each stored graph

use std::sync::OnceLock;
use std::time::Instant;

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use regex_lite::Regex;
use tracing::info;

use crate::pathfind::PathStrategy;

/// Metrics middleware that records request counts and latency.
///
/// Uses tracing events; aggregate them from the log stream.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = normalize_path(request.uri().path());

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status().as_u16();

    info!(
        target: "graph_registry::metrics",
        metric_type = "request",
        path = %path,
        method = %method,
        status = status,
        latency_ms = latency.as_millis() as u64,
        "request_metric"
    );

    response
}

/// Normalize path for metrics to avoid high cardinality.
///
/// Replaces numeric graph handles with a `:handle` placeholder.
fn normalize_path(path: &str) -> String {
    static HANDLE_SEGMENT: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = HANDLE_SEGMENT.get_or_init(|| Regex::new(r"/[0-9]+(?P<rest>/|$)").ok());

    match regex {
        Some(re) => re.replace_all(path, "/:handle$rest").to_string(),
        None => path.to_string(),
    }
}

/// Record shortest-path query metrics.
pub fn record_path_metrics(hops: usize, strategy: PathStrategy, latency_ms: u64) {
    info!(
        target: "graph_registry::metrics",
        metric_type = "shortest_path",
        hops = hops,
        strategy = %strategy,
        latency_ms = latency_ms,
        "shortest_path_metric"
    );
}

/// Record graph submission metrics.
pub fn record_submit_metrics(vertex_count: usize, edge_count: usize) {
    info!(
        target: "graph_registry::metrics",
        metric_type = "submit",
        vertex_count = vertex_count,
        edge_count = edge_count,
        "submit_metric"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_replaces_handle() {
        assert_eq!(normalize_path("/api/graphs/42"), "/api/graphs/:handle");
        assert_eq!(
            normalize_path("/api/graphs/7/shortest_path"),
            "/api/graphs/:handle/shortest_path"
        );
    }

    #[test]
    fn test_normalize_path_preserves_regular_path() {
        assert_eq!(normalize_path("/health/ready"), "/health/ready");
        assert_eq!(normalize_path("/api/graphs"), "/api/graphs");
    }
}
