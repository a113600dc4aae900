// upstream/mod.rs - Clients for the user and tenant management services
//
// The provisioning workflow only sees the traits below; the reqwest
// implementations live next to them and share a single HTTP client.

use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::types::{PoolUser, ProvisionedTenant, SystemRegistration, TenantRegistration};

pub mod tenant_manager;
pub mod user_manager;

pub use tenant_manager::HttpTenantManager;
pub use user_manager::HttpUserManager;

/// Errors from a downstream service call
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Downstream returned {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

#[async_trait]
pub trait UserManagement: Send + Sync {
    /// GET {base}/pool/{userName}
    async fn lookup_pool_user(&self, user_name: &str) -> Result<PoolUser, ClientError>;

    /// POST {base}/system
    async fn register_system(&self, tenant: &TenantRegistration) -> Result<SystemRegistration, ClientError>;

    /// DELETE {base}/tenants
    async fn delete_tenants(&self) -> Result<(), ClientError>;

    /// DELETE {base}/tables
    async fn delete_tables(&self) -> Result<(), ClientError>;
}

#[async_trait]
pub trait TenantManagement: Send + Sync {
    /// POST {base}
    async fn save_tenant(&self, tenant: &ProvisionedTenant) -> Result<(), ClientError>;
}

/// Shared outbound client with a bounded per-request timeout and no retries
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
}

/// Append path segments to a base URL, percent-encoding each one
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidEndpoint(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Decode a 2xx JSON body or classify the failure
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let response = check_status(response).await?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Decode(format!("{}: {}", e, body)))
}

/// Ensure a 2xx status, discarding the body
pub(crate) async fn read_empty(response: Response) -> Result<(), ClientError> {
    check_status(response).await.map(|_| ())
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Remote {
        status: status.as_u16(),
        body,
    })
}

/// Error message the user management service sends for an unknown pool user
pub(crate) const USER_NOT_FOUND: &str = "User not found";

/// Promote a lookup failure to `NotFound` only when the body's `error` field
/// is exactly the user management "User not found" message
pub(crate) fn user_not_found(err: ClientError) -> ClientError {
    match err {
        ClientError::Remote { status, body } => {
            let matches = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(|e| e == USER_NOT_FOUND))
                .unwrap_or(false);
            if matches {
                ClientError::NotFound(body)
            } else {
                ClientError::Remote { status, body }
            }
        }
        other => other,
    }
}
