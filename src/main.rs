use anyhow::Result;
use prompt_gateway::{config, logging, server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Logging is configured from the loaded config, so nothing is traced before this.
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&config.server.logs.level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    info!(
        upstream = %config.upstream.base_url,
        mode = ?config.upstream.mode,
        "Prompt gateway starting"
    );

    server::run(config).await?;

    Ok(())
}
