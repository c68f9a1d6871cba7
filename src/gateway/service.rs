//! Gateway Assembly
//!
//! Wires configuration, registry, transport, heartbeat and dispatch into one
//! object that the binary (and the integration tests) can start and serve.

use super::facade::QueryFacade;
use super::handlers::router;
use crate::config::{ConfigError, GatewayConfig};
use crate::dispatch::{FallbackCoordinator, RegionDispatcher, RetryingClient};
use crate::health::{HealthMonitor, MonitorHandle};
use crate::registry::WorkerRegistry;
use crate::transport::WorkerTransport;

use axum::Router;
use std::sync::Arc;

pub struct GatewayService {
    pub registry: Arc<WorkerRegistry>,
    pub monitor: Arc<HealthMonitor>,
    pub facade: Arc<QueryFacade>,
}

impl GatewayService {
    pub fn new(
        config: &GatewayConfig,
        transport: Arc<dyn WorkerTransport>,
    ) -> Result<Self, ConfigError> {
        let registry = Arc::new(WorkerRegistry::new(config.topology()?));

        let monitor = HealthMonitor::new(
            registry.clone(),
            transport.clone(),
            config.heartbeat_interval(),
            config.request_timeout(),
        );

        let client = Arc::new(RetryingClient::new(
            transport,
            registry.clone(),
            config.request_timeout(),
            config.max_retries,
        ));
        let dispatcher = Arc::new(
            RegionDispatcher::new(registry.clone(), client).with_deadline(config.region_deadline()),
        );
        let coordinator = Arc::new(FallbackCoordinator::new(registry.clone(), dispatcher));
        let facade = Arc::new(QueryFacade::new(registry.clone(), coordinator));

        Ok(Self {
            registry,
            monitor,
            facade,
        })
    }

    pub fn start_monitor(&self) -> MonitorHandle {
        self.monitor.clone().start()
    }

    pub fn router(&self) -> Router {
        router(self.facade.clone(), self.registry.clone())
    }

    pub fn log_topology(&self) {
        for (region, topo) in self.registry.topology().regions() {
            let fallbacks: Vec<&str> = topo.fallbacks.iter().map(|f| f.as_str()).collect();
            tracing::info!(
                "Region {}: {} workers, fallbacks {:?}",
                region,
                topo.endpoints.len(),
                fallbacks
            );
            for endpoint in &topo.endpoints {
                tracing::info!("  - {}", endpoint);
            }
        }
    }
}
