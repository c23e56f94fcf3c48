//! Glyphpress server binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use glyphpress_core::config::AppConfig;
use glyphpress_core::SubsetCatalog;
use glyphpress_server::{create_router, AppState};
use glyphpress_subset::{Pyftsubset, UploadPipeline};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Glyphpress - a font subsetting server
#[derive(Parser, Debug)]
#[command(name = "glyphpressd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "GLYPHPRESS_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Glyphpress v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration (file is optional, env vars can provide/override
    // everything)
    let mut figment = Figment::new();
    let config_path = std::path::Path::new(&args.config);
    if config_path.exists() {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("GLYPHPRESS_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    // Build the pipeline around the external subsetting tool
    let catalog = SubsetCatalog::builtin();
    tracing::info!(subsets = ?catalog.ids(), "Subset catalog loaded");

    let tool = Arc::new(Pyftsubset::new(config.subsetter.command.clone()));
    let pipeline = UploadPipeline::new(config.storage.upload_root.clone(), catalog, tool)
        .await
        .context("failed to initialize upload root")?;
    tracing::info!(
        upload_root = %config.storage.upload_root.display(),
        subsetter = %config.subsetter.command,
        "Upload pipeline ready"
    );

    // Create application state and router
    let state = AppState::new(config.clone(), Arc::new(pipeline));
    let app = create_router(state);

    // Parse bind address
    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
