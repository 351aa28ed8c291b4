//! Scholara Server: Application entry point.

use std::process::ExitCode;
use std::sync::Arc;

use scholara_api::{AppState, build_router};
use scholara_auth::{AuthService, ProfileService};
use scholara_catalog::{CatalogService, spawn_daily_cleanup};
use scholara_db::DbManager;
use tokio::net::TcpListener;
use tokio::signal::{self, ctrl_c};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;

use config::ServerConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("scholara=info,tower_http=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();

    info!("Starting Scholara server...");

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Configuration error");
            return ExitCode::FAILURE;
        }
    };

    let db = match DbManager::connect(&config.db).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "Failed to initialize database");
            return ExitCode::FAILURE;
        }
    };

    let catalog = Arc::new(CatalogService::new(db.scholarships()));
    let auth = AuthService::new(db.user_profiles(), config.auth.clone());
    let profiles = ProfileService::new(db.user_profiles(), db.scholarships());

    let scheduler = if config.cleanup_enabled {
        info!("Daily scholarship cleanup enabled");
        Some(spawn_daily_cleanup(Arc::clone(&catalog)))
    } else {
        info!("Daily scholarship cleanup disabled");
        None
    };

    let app = build_router(AppState::new(catalog, auth, profiles));

    let address = format!("0.0.0.0:{}", config.port);
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, %address, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };
    info!("Server running on {address}");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Some(handle) = scheduler {
        handle.abort();
    }

    match served {
        Ok(()) => {
            info!("Scholara server stopped.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Server error");
            ExitCode::FAILURE
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
