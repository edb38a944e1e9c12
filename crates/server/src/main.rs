//! Tessera multi-tenant record server.
//!
//! Binds tenant accounts to request hosts and serves tenant-isolated
//! record storage over HTTP.

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tessera_rest::{ServerConfig, create_app_with_config, init_logging};
use tessera_tenancy::resolver::TenantResolver;
use tessera_tenancy::store::MemoryBackend;
use tessera_tenancy::tenant::{Account, InMemoryAccountDirectory};
use tracing::info;

/// Loads the account directory, seeded from the configured JSON file if
/// one was given.
fn load_directory(config: &ServerConfig) -> anyhow::Result<InMemoryAccountDirectory> {
    let Some(path) = config.accounts_file.as_deref() else {
        return Ok(InMemoryAccountDirectory::new());
    };
    let directory = read_accounts(path)?;
    info!(accounts = directory.len(), file = %path.display(), "Seeded account directory");
    Ok(directory)
}

fn read_accounts(path: &Path) -> anyhow::Result<InMemoryAccountDirectory> {
    let raw = std::fs::read_to_string(path)?;
    let accounts: Vec<Account> = serde_json::from_str(&raw)?;
    Ok(InMemoryAccountDirectory::with_accounts(accounts))
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        app_domain = ?config.app_domain,
        default_scope = %config.default_scope,
        "Starting Tessera server"
    );

    let directory = load_directory(&config)?;
    let resolver = TenantResolver::new(Arc::new(directory));
    let backend = MemoryBackend::new();

    let app = create_app_with_config(backend, resolver, config.clone());
    serve(app, &config).await
}
