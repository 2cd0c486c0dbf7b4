//! Binary entrypoint for the timetravel HTTP server.
//!
//! Configuration comes from environment variables (see
//! [`timetravel_server::config`]); log filtering from `RUST_LOG`.

use tracing_subscriber::EnvFilter;

use timetravel_server::config::ServerConfig;
use timetravel_server::router::build_router;
use timetravel_server::state::AppState;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };

    let state = AppState::new(&config);
    let app = build_router(state.clone());

    let addr = config.listen_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };
    tracing::info!(
        %addr,
        db = %config.db_path.display(),
        store = %config.store.store_name,
        "timetravel server starting"
    );

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server error");
    }

    state.service.lock().await.close();
    tracing::info!("timetravel server stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
