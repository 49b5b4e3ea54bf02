//! Chart Search: look up chart songs by title or performer
//!
//! This is the main entry point for the application.

use anyhow::{bail, Context, Result};
use chart_search::{
    config::{self, DatabaseBackend, Settings},
    store::{self, SongStore},
    web::{create_router, AppState},
    Loader,
};
use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "chart-search", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to settings.yml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Serve the search web interface (default)
    Serve {
        /// Load this CSV export into the store before serving
        #[arg(long)]
        load: Option<PathBuf>,
    },
    /// Load a CSV export into the store and exit
    ///
    /// Rows sharing a title and performer are merged: the first debut is
    /// kept, the best peak and the longest chart run win. The whole set is
    /// written in one transaction.
    Load {
        /// CSV export (default: ingest.source from settings)
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::load(cli.config.as_deref())?;

    init_logging(&settings);
    info!("Starting chart-search v{}", chart_search::VERSION);

    match cli.command.unwrap_or(Commands::Serve { load: None }) {
        Commands::Serve { load } => serve(settings, load.as_deref()).await,
        Commands::Load { path } => {
            if settings.database.backend == DatabaseBackend::Memory {
                bail!("the memory backend does not persist; use `serve --load` instead");
            }
            let path = path.unwrap_or_else(|| settings.ingest.source.clone());
            let store = store::open(&settings.database)?;
            let report = load_catalog(&settings, store, &path).await?;
            println!(
                "Loaded {} songs from {} rows",
                report.songs_written, report.rows_read
            );
            Ok(())
        }
    }
}

fn init_logging(settings: &Settings) {
    let default_level = if settings.general.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();
}

async fn load_catalog(
    settings: &Settings,
    store: Arc<dyn SongStore>,
    path: &Path,
) -> Result<chart_search::LoadReport> {
    let loader = Loader::new(store).with_mode(settings.ingest.mode);
    let path = path.to_path_buf();
    let report = tokio::task::spawn_blocking(move || loader.load_path(&path))
        .await?
        .context("loading chart data")?;
    Ok(report)
}

async fn serve(settings: Settings, load: Option<&Path>) -> Result<()> {
    let store = store::open(&settings.database)?;

    if let Some(path) = load {
        load_catalog(&settings, Arc::clone(&store), path).await?;
    }

    let songs = store.count()?;
    if songs == 0 {
        warn!("Store is empty; every search will come back with no matches");
    } else {
        info!("Serving {} songs from {} store", songs, store.name());
    }

    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    let state = AppState::new(settings, store)?;
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
