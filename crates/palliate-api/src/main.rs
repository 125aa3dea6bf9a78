use tracing_subscriber::EnvFilter;

use palliate_api::config::{Settings, resolve_catalog};
use palliate_api::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging; RUST_LOG overrides the default level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let settings = Settings::from_env()?;
    let loaded = resolve_catalog(&settings)?;
    tracing::info!(source = ?loaded.source, calculators = loaded.catalog.len(), "catalog ready");
    let state = AppState::new(loaded, settings.unknown_drug_policy);

    let listener = tokio::net::TcpListener::bind(settings.bind).await?;
    tracing::info!(
        addr = %settings.bind,
        policy = ?settings.unknown_drug_policy,
        "listening"
    );

    axum::serve(listener, palliate_api::router(state)).await?;
    Ok(())
}
