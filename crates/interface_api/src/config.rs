//! API configuration

use std::time::Duration;

use serde::Deserialize;

use core_kernel::CoreError;
use domain_claims::document::{DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_MAX_DOCUMENT_BYTES};
use domain_claims::DocumentPolicy;
use infra_db::DatabaseConfig;

/// Storage backend for claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process memory; contents are lost on restart
    Memory,
    /// PostgreSQL via `database_url`
    Postgres,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Where claims are stored
    pub store_backend: StoreBackend,
    /// Database URL, used by the postgres backend
    pub database_url: String,
    /// Upper bound on pooled database connections
    pub db_max_connections: u32,
    /// Connections kept open while idle
    pub db_min_connections: u32,
    /// Seconds a request waits for a pooled connection
    pub db_acquire_timeout_secs: u64,
    /// Largest accepted supporting document, in bytes
    pub max_document_bytes: u64,
    /// Comma-separated list of accepted document extensions
    pub allowed_extensions: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            store_backend: StoreBackend::Memory,
            database_url: "postgres://localhost/claims".to_string(),
            db_max_connections: 10,
            db_min_connections: 1,
            db_acquire_timeout_secs: 30,
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS.join(","),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    ///
    /// Unset variables keep their default value.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Builds the document policy from the configured limits
    pub fn document_policy(&self) -> Result<DocumentPolicy, CoreError> {
        DocumentPolicy::new(self.allowed_extensions.split(','), self.max_document_bytes)
    }

    /// Pool settings for the postgres backend
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(&self.database_url)
            .max_connections(self.db_max_connections)
            .min_connections(self.db_min_connections)
            .acquire_timeout(Duration::from_secs(self.db_acquire_timeout_secs))
    }

    /// Upper bound on a whole request body
    ///
    /// Leaves room above the document limit so that oversized documents
    /// still reach validation and get a field error instead of a bare 413.
    pub fn request_body_limit(&self) -> usize {
        let limit = self
            .max_document_bytes
            .saturating_mul(2)
            .max(1024 * 1024);
        usize::try_from(limit).unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_matches_domain_default() {
        let policy = ApiConfig::default().document_policy().unwrap();
        assert_eq!(policy, DocumentPolicy::default());
    }

    #[test]
    fn test_extension_list_is_parsed() {
        let config = ApiConfig {
            allowed_extensions: "pdf, .ODT".to_string(),
            ..ApiConfig::default()
        };
        let policy = config.document_policy().unwrap();
        assert_eq!(policy.allowed_extensions(), &[".pdf".to_string(), ".odt".to_string()]);
    }

    #[test]
    fn test_body_limit_leaves_headroom() {
        let config = ApiConfig {
            max_document_bytes: 10,
            ..ApiConfig::default()
        };
        assert_eq!(config.request_body_limit(), 1024 * 1024);
        assert_eq!(
            ApiConfig::default().request_body_limit(),
            (DEFAULT_MAX_DOCUMENT_BYTES * 2) as usize
        );
    }

    #[test]
    fn test_database_config_uses_pool_settings() {
        let config = ApiConfig {
            database_url: "postgres://db/claims".to_string(),
            db_max_connections: 4,
            db_min_connections: 2,
            db_acquire_timeout_secs: 5,
            ..ApiConfig::default()
        };

        let db = config.database_config();

        assert_eq!(db.url, "postgres://db/claims");
        assert_eq!(db.max_connections, 4);
        assert_eq!(db.min_connections, 2);
        assert_eq!(db.acquire_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_server_addr() {
        assert_eq!(ApiConfig::default().server_addr(), "0.0.0.0:8080");
    }
}
