//! Shared handler state

use std::sync::Arc;

use quip_common::{AppConfig, JwtService};
use quip_service::ServiceContext;

/// Cloned into every request; both halves sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    services: Arc<ServiceContext>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(services: ServiceContext, config: AppConfig) -> Self {
        Self {
            services: Arc::new(services),
            config: Arc::new(config),
        }
    }

    /// Repositories, id generator and token service for the services layer
    pub fn service_context(&self) -> &ServiceContext {
        &self.services
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Token verifier used by the auth extractors
    pub fn jwt_service(&self) -> &JwtService {
        self.services.jwt_service()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("services", &self.services)
            .field("env", &self.config.app.env)
            .finish_non_exhaustive()
    }
}
