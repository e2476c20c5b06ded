//! mlib-catalog - Song catalog HTTP service
//!
//! Serves the song catalog over HTTP: paginated listing with substring
//! filters, creation with metadata enrichment, partial edits, deletion and
//! verse-paginated lyrics.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use mlib_common::config::{resolve_database_path, DATABASE_PATH_ENV};
use mlib_common::db::{init_database, seed_sample_catalog, SqliteSongStore};
use mlib_common::SongStore;
use mlib_catalog::{build_router, AppState, HttpEnricher};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for mlib-catalog
#[derive(Parser, Debug)]
#[command(name = "mlib-catalog")]
#[command(about = "Song catalog service with metadata enrichment")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "SERVER_PORT")]
    port: u16,

    /// Base URL of the song info service
    #[arg(long, env = "API_URL")]
    api_url: String,

    /// Songs per catalog page
    #[arg(
        long,
        default_value = "10",
        env = "MLIB_PAGE_SIZE",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    page_size: u32,

    /// Enrichment request timeout in seconds (0 disables the timeout)
    #[arg(long, default_value = "30", env = "MLIB_ENRICHMENT_TIMEOUT_SECS")]
    enrichment_timeout_secs: u64,

    /// Insert the sample catalog when the database is empty
    #[arg(long, default_value_t = false, env = "MLIB_SEED_SAMPLE_DATA")]
    seed_sample_data: bool,

    /// Database file path (overrides MLIB_DATABASE_PATH and config.toml)
    #[arg(short, long)]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Variables from .env are visible to clap's env fallbacks below
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mlib_catalog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting mlib-catalog v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let db_path = resolve_database_path(args.database.as_deref(), DATABASE_PATH_ENV);
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path).await {
        Ok(pool) => {
            info!("Connected to database");
            pool
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    let store: Arc<dyn SongStore> = Arc::new(SqliteSongStore::new(pool));

    if args.seed_sample_data {
        seed_sample_catalog(store.as_ref())
            .await
            .context("Failed to seed sample catalog")?;
    }

    let timeout = match args.enrichment_timeout_secs {
        0 => {
            warn!("Enrichment timeout disabled");
            None
        }
        secs => Some(Duration::from_secs(secs)),
    };
    let enricher = HttpEnricher::new(args.api_url.as_str(), timeout)
        .map_err(|e| anyhow::anyhow!("Failed to build enrichment client: {}", e))?;
    info!("Enrichment API: {}", enricher.base_url());

    let state = AppState::new(store, Arc::new(enricher)).with_page_size(args.page_size as usize);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("mlib-catalog listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolve once Ctrl+C or SIGTERM arrives
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
