//! # atelier
//!
//! Generation studio server binary — wires settings, the history store, and
//! the OpenAI clients into the HTTP surface.

#![deny(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use atelier_history::{ConnectionConfig, HistoryStore};
use atelier_openai::{ApiKey, ImagesClient, OpenAiConfig, SpeechClient, VisionClient};
use atelier_server::{AppState, GenerationClients, Surfaces, build_router};

/// Generation surfaces selectable on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SurfaceArg {
    Images,
    Speech,
    Vision,
}

/// Generation studio server.
#[derive(Parser, Debug)]
#[command(name = "atelier", about = "Generation studio server")]
struct Cli {
    /// Port to bind (overrides settings if specified).
    #[arg(long)]
    port: Option<u16>,

    /// Data directory holding the database and media files.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Path to a JSON settings file.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Surfaces to serve.
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = [SurfaceArg::Images, SurfaceArg::Speech, SurfaceArg::Vision])]
    surfaces: Vec<SurfaceArg>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("atelier=info,tower_http=info")),
        )
        .init();

    let mut settings = atelier_settings::load_settings(args.settings.as_deref())
        .context("Failed to load settings")?;
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    if let Some(data_dir) = args.data_dir {
        settings.storage.data_dir = data_dir;
    }

    let surfaces = Surfaces {
        images: args.surfaces.contains(&SurfaceArg::Images),
        speech: args.surfaces.contains(&SurfaceArg::Speech),
        vision: args.surfaces.contains(&SurfaceArg::Vision),
    };

    std::fs::create_dir_all(&settings.storage.data_dir).with_context(|| {
        format!(
            "Failed to create data directory: {}",
            settings.storage.data_dir.display()
        )
    })?;

    // Schema setup is fatal: a server with no working history store has
    // nothing to offer.
    let db_path = settings.storage.database_path();
    let store = HistoryStore::open(&db_path, &ConnectionConfig::default())
        .with_context(|| format!("Failed to open history database: {}", db_path.display()))?;
    tracing::info!(path = %db_path.display(), "history database ready");

    // The speech flow has always required the key up front; the other two
    // degrade to per-request errors so history stays browsable.
    let clients = match ApiKey::from_env() {
        Ok(key) => {
            let config = OpenAiConfig::new(key).with_base_url(&settings.openai.base_url);
            Some(GenerationClients {
                images: ImagesClient::new(config.clone(), &settings.openai.image_model),
                speech: SpeechClient::new(config.clone()),
                vision: VisionClient::new(config, &settings.openai.vision_model)
                    .with_max_tokens(settings.openai.vision_max_tokens),
            })
        }
        Err(err) => {
            if surfaces.speech {
                bail!("OPENAI_API_KEY must be set to serve the speech surface: {err}");
            }
            tracing::warn!(error = %err, "no API key — generation endpoints will return errors");
            None
        }
    };

    let display_tz = atelier_core::time::resolve_timezone(&settings.display.timezone);
    let state = AppState::new(
        Arc::new(store),
        clients,
        settings.storage.audio_path(),
        settings.storage.uploads_path(),
        display_tz,
    );
    let app = build_router(state, surfaces);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], settings.server.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    let local = listener.local_addr().context("Failed to read bound address")?;
    tracing::info!(
        ?surfaces,
        timezone = %display_tz,
        "atelier listening on http://{local}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for ctrl-c");
    }
}
