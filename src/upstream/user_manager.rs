use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::{endpoint, read_empty, read_json, user_not_found, ClientError, UserManagement};
use crate::types::{PoolUser, SystemRegistration, TenantRegistration};

/// reqwest client for the user management service
#[derive(Debug, Clone)]
pub struct HttpUserManager {
    client: reqwest::Client,
    base: Url,
}

impl HttpUserManager {
    pub fn new(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }
}

#[async_trait]
impl UserManagement for HttpUserManager {
    async fn lookup_pool_user(&self, user_name: &str) -> Result<PoolUser, ClientError> {
        let url = endpoint(&self.base, &["pool", user_name])?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        read_json(response).await.map_err(user_not_found)
    }

    async fn register_system(&self, tenant: &TenantRegistration) -> Result<SystemRegistration, ClientError> {
        let url = endpoint(&self.base, &["system"])?;
        debug!("POST {}", url);
        let response = self.client.post(url).json(tenant).send().await?;
        read_json(response).await
    }

    async fn delete_tenants(&self) -> Result<(), ClientError> {
        let url = endpoint(&self.base, &["tenants"])?;
        debug!("DELETE {}", url);
        let response = self.client.delete(url).send().await?;
        read_empty(response).await
    }

    async fn delete_tables(&self) -> Result<(), ClientError> {
        let url = endpoint(&self.base, &["tables"])?;
        debug!("DELETE {}", url);
        let response = self.client.delete(url).send().await?;
        read_empty(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::build_http_client;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;

    fn manager(server: &MockServer) -> HttpUserManager {
        let client = build_http_client(Duration::from_secs(2)).expect("client");
        let base = Url::parse(&server.url("/user")).expect("base url");
        HttpUserManager::new(client, base)
    }

    #[tokio::test]
    async fn test_lookup_pool_user_found() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/user/pool/admin");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "userName": "admin" }));
        });

        let user = manager(&server).lookup_pool_user("admin").await.unwrap();
        assert_eq!(user.user_name, "admin");
        mock.assert();
    }

    #[tokio::test]
    async fn test_lookup_pool_user_not_found_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/user/pool/admin");
            then.status(400).json_body(json!({ "error": "User not found" }));
        });

        let err = manager(&server).lookup_pool_user("admin").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)), "got {:?}", err);
        mock.assert();
    }

    #[tokio::test]
    async fn test_lookup_pool_user_routing_404_is_remote() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/user/pool/admin");
            then.status(404).body("Cannot GET /user/pool/admin");
        });

        let err = manager(&server).lookup_pool_user("admin").await.unwrap_err();
        assert!(matches!(err, ClientError::Remote { status: 404, .. }), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_lookup_pool_user_remote_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/user/pool/admin");
            then.status(500).body("Error fetching user");
        });

        let err = manager(&server).lookup_pool_user("admin").await.unwrap_err();
        match err {
            ClientError::Remote { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "Error fetching user");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_system_decodes_infrastructure() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/user/system")
                .json_body_includes(r#"{ "id": "SYSADMIN1", "userName": "admin" }"#);
            then.status(200).json_body(json!({
                "pool": { "UserPool": { "Id": "P1" } },
                "identityPool": { "IdentityPoolId": "I1" },
                "role": { "systemAdminRole": "R1", "systemSupportRole": "R2", "trustRole": "T1" },
                "policy": { "systemAdminPolicy": "PO1", "systemSupportPolicy": "PO2" }
            }));
        });

        let tenant = TenantRegistration {
            id: Some("SYSADMIN1".to_string()),
            user_name: "admin".to_string(),
            ..Default::default()
        };
        let infra = manager(&server).register_system(&tenant).await.unwrap();
        assert_eq!(infra.pool.user_pool.id, "P1");
        assert_eq!(infra.identity_pool.identity_pool_id, "I1");
        assert_eq!(infra.role.system_support_role.as_deref(), Some("R2"));
        assert_eq!(infra.policy.system_support_policy.as_deref(), Some("PO2"));
        mock.assert();
    }

    #[tokio::test]
    async fn test_register_system_malformed_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/user/system");
            then.status(200).json_body(json!({ "pool": {} }));
        });

        let err = manager(&server)
            .register_system(&TenantRegistration::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_delete_endpoints() {
        let server = MockServer::start();
        let tenants = server.mock(|when, then| {
            when.method(DELETE).path("/user/tenants");
            then.status(200).body("Success");
        });
        let tables = server.mock(|when, then| {
            when.method(DELETE).path("/user/tables");
            then.status(503).body("unavailable");
        });

        let manager = manager(&server);
        manager.delete_tenants().await.unwrap();
        let err = manager.delete_tables().await.unwrap_err();
        assert!(matches!(err, ClientError::Remote { status: 503, .. }));

        tenants.assert();
        tables.assert();
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let port = portpicker::pick_unused_port().expect("free port");
        let client = build_http_client(Duration::from_millis(500)).unwrap();
        let base = Url::parse(&format!("http://127.0.0.1:{}/user", port)).unwrap();

        let err = HttpUserManager::new(client, base)
            .lookup_pool_user("admin")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)), "got {:?}", err);
    }
}
