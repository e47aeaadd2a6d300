use coursebook::logging::init_tracing;
use coursebook::metrics::{init_metrics, metrics_app};
use coursebook::{init_app_state, init_router};
use coursebook_config::{AppConfig, LoggingConfig};
use dotenvy::dotenv;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing(&LoggingConfig::from_env());

    let config = AppConfig::from_env().inspect_err(|e| error!(error = %e, "invalid configuration"))?;

    if let Some(handle) = init_metrics(&config.metrics)? {
        let port = config.metrics.port.unwrap_or_default();
        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
        info!(port, "metrics available at /metrics");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                error!(error = %e, "metrics server stopped");
            }
        });
    }

    let state = init_app_state(&config)
        .await
        .inspect_err(|e| error!(error = ?e, "failed to initialize application state"))?;
    let app = init_router(state);

    let address = config.server.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(%address, "server listening");
    info!("Swagger UI at /swagger-ui, Scalar at /scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
}
