/// Tenant records exchanged with the caller and the downstream services

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix carried by every system admin tenant identifier
pub const TENANT_ID_PREFIX: &str = "SYSADMIN";

/// Generate a tenant identifier: prefix followed by a random v4 UUID without hyphens
pub fn generate_tenant_id() -> String {
    format!("{}{}", TENANT_ID_PREFIX, Uuid::new_v4().simple())
}

/// Incoming registration payload. All fields are opaque to this service;
/// `id` is assigned by the workflow and ignored if supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TenantRegistration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub company_name: String,
    pub account_name: String,
    pub owner_name: String,
    pub tier: String,
    pub email: String,
    pub user_name: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TenantStatus {
    Active,
}

/// Tenant record handed to the tenant management service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvisionedTenant {
    #[serde(flatten)]
    pub registration: TenantRegistration,
    #[serde(rename = "UserPoolId")]
    pub user_pool_id: String,
    #[serde(rename = "IdentityPoolId")]
    pub identity_pool_id: String,
    #[serde(rename = "systemAdminRole")]
    pub system_admin_role: String,
    #[serde(rename = "systemSupportRole", skip_serializing_if = "Option::is_none")]
    pub system_support_role: Option<String>,
    #[serde(rename = "trustRole", skip_serializing_if = "Option::is_none")]
    pub trust_role: Option<String>,
    #[serde(rename = "systemAdminPolicy")]
    pub system_admin_policy: String,
    #[serde(rename = "systemSupportPolicy", skip_serializing_if = "Option::is_none")]
    pub system_support_policy: Option<String>,
    pub status: TenantStatus,
}

impl ProvisionedTenant {
    /// Attach the identity infrastructure returned by system registration
    pub fn new(registration: TenantRegistration, infra: SystemRegistration) -> Self {
        Self {
            registration,
            user_pool_id: infra.pool.user_pool.id,
            identity_pool_id: infra.identity_pool.identity_pool_id,
            system_admin_role: infra.role.system_admin_role,
            system_support_role: infra.role.system_support_role,
            trust_role: infra.role.trust_role,
            system_admin_policy: infra.policy.system_admin_policy,
            system_support_policy: infra.policy.system_support_policy,
            status: TenantStatus::Active,
        }
    }
}

/// User pool entry returned by the existence check
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolUser {
    pub user_name: String,
}

/// Response of the user management system registration endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemRegistration {
    pub pool: UserPoolEnvelope,
    pub identity_pool: IdentityPool,
    pub role: RoleSet,
    pub policy: PolicySet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserPoolEnvelope {
    #[serde(rename = "UserPool")]
    pub user_pool: UserPool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserPool {
    #[serde(rename = "Id")]
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityPool {
    #[serde(rename = "IdentityPoolId")]
    pub identity_pool_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSet {
    pub system_admin_role: String,
    #[serde(default)]
    pub system_support_role: Option<String>,
    #[serde(default)]
    pub trust_role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySet {
    pub system_admin_policy: String,
    #[serde(default)]
    pub system_support_policy: Option<String>,
}
