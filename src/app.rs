use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::{AppConfig, ConfigError};
use crate::handlers::sys;
use crate::middleware::options_middleware;
use crate::services::{ProvisioningService, TeardownPolicy};
use crate::upstream::{build_http_client, HttpTenantManager, HttpUserManager};

/// Dependencies shared by every request, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub provisioning: Arc<ProvisioningService>,
    pub service_name: Arc<str>,
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl AppState {
    pub fn new(provisioning: ProvisioningService, service_name: impl Into<Arc<str>>) -> Self {
        Self {
            provisioning: Arc::new(provisioning),
            service_name: service_name.into(),
        }
    }

    /// Wire the reqwest-backed downstream clients from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let client = build_http_client(config.upstream_timeout())?;
        let users = HttpUserManager::new(client.clone(), config.user_service_url()?);
        let tenants = HttpTenantManager::new(client, config.tenant_service_url()?);

        let teardown = TeardownPolicy {
            delete_tables: config.teardown.delete_tables,
            strict: config.teardown.strict,
        };

        let provisioning = ProvisioningService::new(Arc::new(users), Arc::new(tenants), teardown);
        Ok(Self::new(provisioning, config.server.service_name.as_str()))
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route(
            "/sys/admin",
            post(sys::sys_admin_create).delete(sys::sys_admin_destroy),
        )
        .route("/sys/health", get(sys::sys_health))
        .with_state(state)
        // Global middleware
        .layer(middleware::from_fn(options_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
