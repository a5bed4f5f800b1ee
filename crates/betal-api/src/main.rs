//! Tales of Betal play service entry point.

use betal_api::config::AppConfig;
use betal_api::error::AppError;
use betal_api::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Tales of Betal play service");

    let config = AppConfig::from_env()?;
    let addr = config.socket_addr()?;
    tracing::info!(
        state_dir = ?config.state_dir,
        catalog = ?config.catalog_path,
        curse_ms = config.rules.curse_duration.num_milliseconds(),
        return_delay_ms = config.rules.return_delay.num_milliseconds(),
        "configuration loaded"
    );

    let app = betal_api::app(AppState::from_config(&config)?);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
