use std::sync::Arc;
use tracing::{error, info, warn};

use crate::types::{generate_tenant_id, ProvisionedTenant, TenantRegistration};
use crate::upstream::{ClientError, TenantManagement, UserManagement};

#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("Invalid request: {message}")]
    InvalidRequest { field: &'static str, message: String },
    #[error("{0}")]
    Conflict(String),
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("Upstream error ({status}): {body}")]
    UpstreamError { status: u16, body: String },
    #[error("Registration failed: {0}")]
    RegistrationFailed(String),
    #[error("Persistence failed: {0}")]
    PersistenceFailed(String),
    #[error("Teardown failed: {0}")]
    TeardownFailed(String),
}

/// How `destroy_system` treats the optional table step and downstream failures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeardownPolicy {
    pub delete_tables: bool,
    pub strict: bool,
}

/// Orchestrates system admin registration across the user and tenant services
pub struct ProvisioningService {
    users: Arc<dyn UserManagement>,
    tenants: Arc<dyn TenantManagement>,
    teardown: TeardownPolicy,
}

impl ProvisioningService {
    pub fn new(
        users: Arc<dyn UserManagement>,
        tenants: Arc<dyn TenantManagement>,
        teardown: TeardownPolicy,
    ) -> Self {
        Self {
            users,
            tenants,
            teardown,
        }
    }

    /// Register a system admin tenant and return its generated id.
    ///
    /// Stages run strictly in order: existence check, remote registration,
    /// persistence. A failed stage stops the workflow; nothing is rolled back.
    pub async fn create_system_admin(&self, mut request: TenantRegistration) -> Result<String, ProvisionError> {
        let user_name = request.user_name.trim().to_string();
        if user_name.is_empty() {
            return Err(ProvisionError::InvalidRequest {
                field: "userName",
                message: "userName is required".to_string(),
            });
        }
        // The checked name is the one registered and persisted
        request.user_name = user_name.clone();

        let tenant_id = generate_tenant_id();
        request.id = Some(tenant_id.clone());
        info!(tenant_id = %tenant_id, user_name = %user_name, "registering system admin");

        self.ensure_admin_absent(&user_name).await?;

        let infra = self.users.register_system(&request).await.map_err(|e| {
            error!(tenant_id = %tenant_id, "system registration failed: {}", e);
            match e {
                transport @ ClientError::Transport(_) => ProvisionError::UpstreamUnavailable(transport.to_string()),
                other => ProvisionError::RegistrationFailed(other.to_string()),
            }
        })?;
        info!(tenant_id = %tenant_id, "system admin identity infrastructure created");

        let tenant = ProvisionedTenant::new(request, infra);
        self.tenants.save_tenant(&tenant).await.map_err(|e| {
            error!(tenant_id = %tenant_id, "saving tenant failed after registration: {}", e);
            match e {
                transport @ ClientError::Transport(_) => ProvisionError::UpstreamUnavailable(transport.to_string()),
                other => ProvisionError::PersistenceFailed(other.to_string()),
            }
        })?;

        info!(tenant_id = %tenant_id, "system admin tenant registered");
        Ok(tenant_id)
    }

    /// Existence check: a pool entry with the same user name is a conflict
    async fn ensure_admin_absent(&self, user_name: &str) -> Result<(), ProvisionError> {
        match self.users.lookup_pool_user(user_name).await {
            Ok(existing) if existing.user_name == user_name => {
                warn!(user_name = %user_name, "system admin user already exists");
                Err(ProvisionError::Conflict("admin user already exists".to_string()))
            }
            Ok(existing) => {
                warn!(
                    user_name = %user_name,
                    returned = %existing.user_name,
                    "user lookup returned a different user, treating as absent"
                );
                Ok(())
            }
            Err(ClientError::NotFound(_)) => Ok(()),
            Err(e) => {
                error!(user_name = %user_name, "admin existence check failed: {}", e);
                Err(match e {
                    ClientError::Remote { status, body } => ProvisionError::UpstreamError { status, body },
                    ClientError::Decode(body) => ProvisionError::UpstreamError { status: 200, body },
                    other => ProvisionError::UpstreamUnavailable(other.to_string()),
                })
            }
        }
    }

    /// Remove all tenant infrastructure.
    ///
    /// Downstream failures are logged. They only reach the caller when the
    /// teardown policy is strict.
    pub async fn destroy_system(&self) -> Result<(), ProvisionError> {
        info!("removing all tenant infrastructure");

        if let Err(e) = self.users.delete_tenants().await {
            error!("error removing tenants: {}", e);
            if self.teardown.strict {
                return Err(ProvisionError::TeardownFailed(e.to_string()));
            }
        }

        if self.teardown.delete_tables {
            if let Err(e) = self.users.delete_tables().await {
                error!("error removing tables: {}", e);
                if self.teardown.strict {
                    return Err(ProvisionError::TeardownFailed(e.to_string()));
                }
            }
        }

        info!("tenant infrastructure removal finished");
        Ok(())
    }
}
