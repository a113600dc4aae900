use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::{read_empty, ClientError, TenantManagement};
use crate::types::ProvisionedTenant;

/// reqwest client for the tenant management service
#[derive(Debug, Clone)]
pub struct HttpTenantManager {
    client: reqwest::Client,
    base: Url,
}

impl HttpTenantManager {
    pub fn new(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }
}

#[async_trait]
impl TenantManagement for HttpTenantManager {
    async fn save_tenant(&self, tenant: &ProvisionedTenant) -> Result<(), ClientError> {
        debug!("POST {}", self.base);
        let response = self.client.post(self.base.clone()).json(tenant).send().await?;
        read_empty(response).await
    }
}
