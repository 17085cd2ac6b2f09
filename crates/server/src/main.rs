use anyhow::Context;
use mediafamille_server::config::AppConfig;
use mediafamille_server::state::AppState;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    for var in config.missing_credentials() {
        warn!(var, "credential not set, the matching catalog will answer 503");
    }
    if config.google_books_api_key.is_none() {
        info!("GOOGLE_BOOKS_API_KEY not set, using the anonymous quota");
    }

    let state =
        AppState::from_config(&config).context("failed to build the upstream HTTP client")?;
    let app = mediafamille_server::routes::build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
