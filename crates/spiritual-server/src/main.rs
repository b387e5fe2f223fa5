use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spiritual_core::{load_sample_data, MemStorage, SqliteStorage, Storage};
use spiritual_server::{
    config::{Args, ServerConfig},
    create_router,
    session::cleanup_task,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let log_filter = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "spiritual_server={log_filter},spiritual_core={log_filter},tower_http=info"
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config: ServerConfig = args.into();
    let listen_addr = config.listen_addr();

    // Open storage
    let storage: Arc<dyn Storage> = match &config.database {
        Some(path) => {
            tracing::info!(path = %path.display(), "using SQLite storage");
            Arc::new(SqliteStorage::open(path)?)
        }
        None => {
            tracing::info!("using in-memory storage");
            Arc::new(MemStorage::new())
        }
    };

    if config.seed {
        let report = load_sample_data(storage.as_ref(), config.seed_demo_user)?;
        if report.is_empty() {
            tracing::info!("store already populated, sample data skipped");
        }
    }

    if config.elevenlabs_api_key.is_none() {
        tracing::warn!("ELEVENLABS_API_KEY not set, speech synthesis disabled");
    }
    if config.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set, documents will be categorized as Unknown");
    }

    let cleanup_interval = config.session_cleanup_interval;
    let state = AppState::new(config, storage);

    // Start session cleanup background task
    let cleanup_manager = state.sessions.clone();
    tokio::spawn(async move {
        cleanup_task(cleanup_manager, cleanup_interval).await;
    });

    let app = create_router(state);
    let listener = TcpListener::bind(&listen_addr).await?;

    tracing::info!("Spiritual Connect API listening on http://{}", listen_addr);
    tracing::info!("Health check at http://{}/health", listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
