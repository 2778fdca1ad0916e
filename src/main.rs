use std::sync::Arc;

use anyhow::Context;
use config::Config;
use repositories::{posts_repo::PostsRepository, MemoryRepo, PostgresRepo};
use routes::create_routes;
use services::posts::PostsService;
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub use self::errors::{Error, Result};

mod config;
mod errors;
mod handlers;
mod models;
mod repositories;
mod routes;
mod services;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub posts_service: PostsService,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::init()?;

    let repo: Arc<dyn PostsRepository> = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await
                .context("failed to connect to the database")?;
            info!("Connection to the database is successful");

            let repo = PostgresRepo::new(pool);
            repo.init()
                .await
                .map_err(|err| anyhow::anyhow!("failed to prepare posts table: {err:?}"))?;
            Arc::new(repo)
        }
        None => {
            warn!("DATABASE_URL is not set, posts are kept in memory only");
            Arc::new(MemoryRepo::new())
        }
    };

    let app_state = AppState {
        config: config.clone(),
        posts_service: PostsService::new(repo),
    };

    let app = create_routes(Arc::new(app_state));

    let listener = tokio::net::TcpListener::bind(format!("[::]:{}", config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => warn!("Received Ctrl+C, shutting down"),
        _ = terminate => warn!("Received SIGTERM, shutting down"),
    }
}
