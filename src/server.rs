use std::{net::SocketAddr, str::FromStr, sync::Arc};

use tokio::signal;

use crate::{
    Res, api,
    config::{Config, ConfigError},
    state::AppState,
    store::Database,
};

/// Runs the HTTP server until Ctrl-C or SIGTERM.
///
/// The document store is opened before binding and closed exactly once after
/// the server has drained its in-flight requests.
pub async fn start_api_server(config: Config) -> Res<()> {
    let addr = SocketAddr::from_str(&config.server_address).map_err(|e| ConfigError::Invalid {
        name: "SERVER_ADDRESS",
        reason: e.to_string(),
    })?;

    let db = Database::connect(&config.store_url, &config.db_name).await?;
    let state = Arc::new(AppState::new(config, db.clone()));
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    tracing::info!("closing document store");
    db.close().await?;

    served?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
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

    tracing::info!("shutdown signal received");
}
