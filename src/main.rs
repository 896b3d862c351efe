use anyhow::Context;
use dotenvy::dotenv;
use pawhub::logging::init_tracing;
use pawhub::metrics::{init_metrics, metrics_app};
use pawhub::router::init_router;
use pawhub::state::init_app_state;
use pawhub_config::ServerConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let _log_guard = init_tracing();

    let metrics_handle = init_metrics().context("Failed to install Prometheus recorder")?;

    let server_config = ServerConfig::from_env();
    let state = init_app_state().await?;

    let mut app = init_router(state);
    if let Some(handle) = metrics_handle {
        app = app.merge(metrics_app(handle));
    }

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(address = %address, "Server running");
    info!("Swagger UI available at http://{address}/swagger-ui");
    axum::serve(listener, app).await?;

    Ok(())
}
