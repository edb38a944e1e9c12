//! Server configuration for the REST API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TESSERA_PORT` | 8080 | Server port |
//! | `TESSERA_HOST` | 127.0.0.1 | Host to bind |
//! | `TESSERA_LOG_LEVEL` | info | Log level |
//! | `TESSERA_APP_DOMAIN` | (none) | Application domain for subdomain tenants |
//! | `TESSERA_DEFAULT_SCOPE` | enforced | Default read-scope mode (enforced, disabled) |
//! | `TESSERA_ACCOUNTS_FILE` | (none) | JSON file of tenant accounts to seed |
//! | `TESSERA_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `TESSERA_ENABLE_CORS` | true | Enable CORS |
//! | `TESSERA_CORS_ORIGINS` | * | Allowed origins |
//! | `TESSERA_CORS_METHODS` | GET,POST,PUT,PATCH,DELETE,OPTIONS | Allowed methods |
//! | `TESSERA_CORS_HEADERS` | Content-Type,Accept,Authorization | Allowed headers |
//!
//! # Example
//!
//! ```rust
//! use tessera_rest::ServerConfig;
//!
//! // Create from environment
//! let config = ServerConfig::from_env();
//!
//! // Or create programmatically
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     app_domain: Some("example.com".to_string()),
//!     ..Default::default()
//! };
//! ```

use std::path::PathBuf;

use clap::Parser;
use tessera_tenancy::context::DefaultScopeMode;

/// Server configuration for the REST API.
///
/// This struct can be constructed from environment variables using
/// [`ServerConfig::from_env`], from command line arguments using
/// [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "tessera")]
#[command(about = "Tessera multi-tenant record server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "TESSERA_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "TESSERA_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "TESSERA_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Application domain. Hosts underneath it resolve tenants by
    /// subdomain; other hosts are treated as custom apex domains.
    #[arg(long, env = "TESSERA_APP_DOMAIN")]
    pub app_domain: Option<String>,

    /// Default read-scope mode for request contexts (enforced, disabled).
    #[arg(long, env = "TESSERA_DEFAULT_SCOPE", default_value = "enforced")]
    pub default_scope: DefaultScopeMode,

    /// JSON file of tenant accounts to seed the directory from.
    #[arg(long, env = "TESSERA_ACCOUNTS_FILE")]
    pub accounts_file: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long, env = "TESSERA_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "TESSERA_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "TESSERA_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(
        long,
        env = "TESSERA_CORS_METHODS",
        default_value = "GET,POST,PUT,PATCH,DELETE,OPTIONS"
    )]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "TESSERA_CORS_HEADERS",
        default_value = "Content-Type,Accept,Authorization"
    )]
    pub cors_headers: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            app_domain: None,
            default_scope: DefaultScopeMode::Enforced,
            accounts_file: None,
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,PUT,PATCH,DELETE,OPTIONS".to_string(),
            cors_headers: "Content-Type,Accept,Authorization".to_string(),
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables
    /// without requiring command line arguments.
    pub fn from_env() -> Self {
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    ///
    /// Port 0 is valid: it requests an OS-assigned ephemeral port, as
    /// [`ServerConfig::for_testing`] does.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if let Some(domain) = &self.app_domain {
            if domain.trim().is_empty() {
                errors.push("Application domain cannot be blank".to_string());
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses ephemeral port 0, a fixed application domain, and disables
    /// features that might interfere with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            app_domain: Some("example.com".to_string()),
            default_scope: DefaultScopeMode::Enforced,
            accounts_file: None,
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
        }
    }
}
