// handlers/sys/admin.rs - POST and DELETE /sys/admin handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::types::TenantRegistration;

/**
 * POST /sys/admin - Register the system admin tenant
 *
 * Expected Input:
 * ```json
 * {
 *   "companyName": "string",
 *   "accountName": "string",
 *   "ownerName": "string",
 *   "tier": "string",
 *   "email": "string",
 *   "userName": "string",   // Required: admin user to create
 *   "role": "string",
 *   "firstName": "string",
 *   "lastName": "string"
 * }
 * ```
 *
 * @returns 200 text naming the registered tenant id, 400 `{error}` when the
 * admin already exists or the body is not valid JSON, 500 for any downstream failure
 */
pub async fn sys_admin_create(
    State(state): State<AppState>,
    payload: Result<Json<TenantRegistration>, JsonRejection>,
) -> Result<String, ApiError> {
    let Json(request) = payload?;
    let tenant_id = state.provisioning.create_system_admin(request).await?;
    Ok(format!("Registered system admin tenant {}", tenant_id))
}

/// DELETE /sys/admin - remove all tenant infrastructure
pub async fn sys_admin_destroy(State(state): State<AppState>) -> impl IntoResponse {
    match state.provisioning.destroy_system().await {
        Ok(()) => (StatusCode::OK, "Removed all tenant infrastructure"),
        Err(e) => {
            tracing::error!("Tenant infrastructure removal failed: {}", e);
            (StatusCode::BAD_REQUEST, "Error removing tenant infrastructure")
        }
    }
}
