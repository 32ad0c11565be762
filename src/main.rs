//! Annotation store server.
//!
//! ```text
//!     Client ──▶ listener ──▶ http::server (middleware) ──▶ routing::match_route
//!                                                               │
//!     Client ◀── http::response ◀── http::handlers ◀── store ◀──┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use annotator_store::config::{load_config, validate_config, AppConfig, ConfigError};
use annotator_store::lifecycle::{wait_for_signal, Shutdown};
use annotator_store::observability::init_logging;
use annotator_store::{HttpServer, InMemoryStore};

#[derive(Parser)]
#[command(name = "annotator-store")]
#[command(about = "REST store for web annotations", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override `resource.mount_point`.
    #[arg(short, long)]
    mount_point: Option<String>,
}

fn resolve_config(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
    }
    if let Some(mount_point) = &cli.mount_point {
        config.resource.mount_point = mount_point.clone();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    init_logging(&config.observability)?;
    tracing::info!("annotator-store v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        mount_point = %config.resource.mount_point,
        resource = %config.resource.plural,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let store = Arc::new(InMemoryStore::new());
    let server = HttpServer::new(config, store)?;

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
