use anyhow::{Context, Result};
use tracing::info;

use viajeros_ai::{TravelAiConfig, VERSION, telemetry, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = TravelAiConfig::load().context("Failed to load configuration")?;
    telemetry::init(&config.logging).context("Failed to initialise logging")?;

    info!(
        version = VERSION,
        provider = %config.ai.provider,
        mock = config.ai.wants_mock(),
        port = config.server.port,
        "starting Viajeros AI"
    );

    web::run(&config).await?;
    Ok(())
}
