//! Service state management.
//!
//! Holds the graph registry and the configuration shared by every handler.

use std::sync::Arc;
use chrono::{DateTime, Utc};

use crate::config::ServiceConfig;
use crate::store::GraphRegistry;

/// Shared service state.
///
/// Cloning is cheap; all clones refer to the same registry.
#[derive(Debug, Clone)]
pub struct ServiceState {
    /// The graph registry.
    pub registry: Arc<GraphRegistry>,
    /// Service configuration.
    pub config: Arc<ServiceConfig>,
    started_at: DateTime<Utc>,
}

impl ServiceState {
    /// Create service state with a fresh registry sized by `config`.
    pub fn new(config: ServiceConfig) -> Self {
        let registry = GraphRegistry::with_config(config.registry);
        Self::with_registry(registry, config)
    }

    /// Create service state around an existing registry.
    pub fn with_registry(registry: GraphRegistry, config: ServiceConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            config: Arc::new(config),
            started_at: Utc::now(),
        }
    }

    /// Seconds since this state was created.
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

impl Default for ServiceState {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;
    use crate::types::GraphDescription;

    #[test]
    fn test_clones_share_registry() {
        let state = ServiceState::default();
        let other = state.clone();

        let desc = GraphDescription::from_edge_list(&[1, 2], &[(1, 2)]);
        state.registry.submit(&desc).unwrap();

        assert_eq!(other.registry.len(), 1);
    }

    #[test]
    fn test_registry_uses_configured_limits() {
        let config = ServiceConfig {
            registry: RegistryConfig {
                max_vertices: 2,
                max_edges: 2,
            },
            ..ServiceConfig::default()
        };
        let state = ServiceState::new(config);
        assert_eq!(state.registry.config().max_vertices, 2);
        assert!(state.uptime_secs() >= 0);
    }
}
