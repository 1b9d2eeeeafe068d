use std::net::SocketAddr;

use anyhow::Context;
use salary_engine::api::{create_router, AppState};
use salary_engine::config::{ConfigLoader, LogFormat, ServerSettings};
use salary_engine::store::TaxStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loader = ConfigLoader::from_env().context("failed to load configuration")?;
    init_tracing(loader.settings())?;

    let store = TaxStore::from_config(loader.config()).context("failed to seed tax store")?;
    let app = create_router(AppState::new(store));

    let addr: SocketAddr = loader.settings().listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(settings: &ServerSettings) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.log_level)
            .with_context(|| format!("invalid log_level '{}'", settings.log_level))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match settings.log_format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler; run until the process is killed.
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
