use std::sync::Arc;

use stoploss_viz::api::{run_server, AppState};
use stoploss_viz::config::AppConfig;
use stoploss_viz::stoploss::{HttpTransport, StoplossDataClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();

    // Setup Logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting stoploss data service...");

    // Load Configuration
    let config = AppConfig::load()?;
    info!("Loaded Configuration: {:?}", config);

    let transport = HttpTransport::with_timeout(config.api.timeout())?;
    let client = StoplossDataClient::new(config.api.base_url.clone(), Arc::new(transport));
    info!(
        "Upstream base URL: {} (endpoint: {})",
        client.base_url(),
        client.endpoint_url()?
    );

    let app_state = Arc::new(AppState { client, config });

    info!("Initializing API Server...");
    run_server(app_state).await?;

    Ok(())
}
