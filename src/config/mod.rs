use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub teardown: TeardownConfig,
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub service_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub user_service_url: String,
    pub tenant_service_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeardownConfig {
    /// Run the table deletion step after tenant infrastructure is removed
    pub delete_tables: bool,
    /// Report downstream teardown failures to the caller instead of only logging them
    pub strict: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid URL for {name}: {value} ({reason})")]
    InvalidUrl {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Upstream timeout must be greater than zero")]
    ZeroTimeout,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (process env in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let config = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(&lookup);

        config.validate()?;
        Ok(config)
    }

    fn with_overrides<F>(mut self, lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(v) = lookup("SYSREG_PORT").or_else(|| lookup("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Some(v) = lookup("SERVICE_NAME") {
            self.server.service_name = v;
        }

        // Upstream overrides
        if let Some(v) = lookup("USER_SERVICE_URL") {
            self.upstream.user_service_url = v.trim().to_string();
        }
        if let Some(v) = lookup("TENANT_SERVICE_URL") {
            self.upstream.tenant_service_url = v.trim().to_string();
        }
        if let Some(v) = lookup("UPSTREAM_TIMEOUT_SECS") {
            self.upstream.timeout_secs = v.parse().unwrap_or(self.upstream.timeout_secs);
        }

        // Teardown overrides
        if let Some(v) = lookup("TEARDOWN_DELETE_TABLES") {
            self.teardown.delete_tables = v.parse().unwrap_or(self.teardown.delete_tables);
        }
        if let Some(v) = lookup("TEARDOWN_STRICT") {
            self.teardown.strict = v.parse().unwrap_or(self.teardown.strict);
        }

        if let Some(v) = lookup("LOG_LEVEL") {
            self.log_level = v;
        }

        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        parse_base_url("USER_SERVICE_URL", &self.upstream.user_service_url)?;
        parse_base_url("TENANT_SERVICE_URL", &self.upstream.tenant_service_url)?;
        if self.upstream.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    pub fn user_service_url(&self) -> Result<Url, ConfigError> {
        parse_base_url("USER_SERVICE_URL", &self.upstream.user_service_url)
    }

    pub fn tenant_service_url(&self) -> Result<Url, ConfigError> {
        parse_base_url("TENANT_SERVICE_URL", &self.upstream.tenant_service_url)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.timeout_secs)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3011,
                service_name: "System Registration".to_string(),
            },
            upstream: UpstreamConfig {
                user_service_url: "http://localhost:3001/user".to_string(),
                tenant_service_url: "http://localhost:3003/tenant".to_string(),
                timeout_secs: 10,
            },
            teardown: TeardownConfig {
                delete_tables: false,
                strict: false,
            },
            log_level: "debug".to_string(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            upstream: UpstreamConfig {
                timeout_secs: 5,
                ..Self::development().upstream
            },
            log_level: "info".to_string(),
            ..Self::development()
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            upstream: UpstreamConfig {
                timeout_secs: 5,
                ..Self::development().upstream
            },
            log_level: "info".to_string(),
            ..Self::development()
        }
    }
}

fn parse_base_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
            reason: "expected an http(s) base URL".to_string(),
        });
    }

    Ok(url)
}
