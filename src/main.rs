use anyhow::Context;
use catalog::logging::{init_tracing, shutdown_tracer};
use catalog::metrics::{init_metrics, metrics_app};
use catalog::router::init_router;
use catalog::state::init_app_state;
use catalog_config::ServerConfig;
use dotenvy::dotenv;
use tokio::signal;
use tracing::info;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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

    info!("Shutdown signal received, draining connections");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing().context("failed to initialize tracing")?;

    let state = init_app_state()
        .await
        .context("failed to initialize application state")?;
    let store = state.store.clone();

    let mut app = init_router(state);
    if let Some(handle) = init_metrics() {
        app = app.merge(metrics_app(handle));
        info!("Prometheus metrics available at /metrics");
    }

    let server = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(server.addr())
        .await
        .with_context(|| format!("failed to bind {}", server.addr()))?;

    info!(address = %server.addr(), "Server running");
    info!("Swagger UI available at /swagger-ui, Scalar at /scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    shutdown_tracer();

    Ok(())
}
