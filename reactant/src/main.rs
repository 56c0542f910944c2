//! Runs the simulated reactor until Ctrl-C or the configured tick limit.

use std::path::Path;

use reactant::{CONFIG_PATH, ReactorConfig, ReactorHost, logger, observe};
use tokio::spawn;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    logger::init()?;

    let config = ReactorConfig::load_or_create(Path::new(CONFIG_PATH))?;
    log::info!(
        "Starting reactor: {} ms ticks, limit {:?}",
        config.tick_millis,
        config.max_ticks
    );

    let cancel_token = CancellationToken::new();
    let (host, updates) = ReactorHost::new(config);
    let observer = spawn(observe(updates));

    let shutdown = cancel_token.clone();
    spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Ctrl-C received, stopping");
            shutdown.cancel();
        }
    });

    let host = host.run(cancel_token).await;
    log::info!("Final state:\n{}", host.debug_info());

    drop(host);
    observer.await?;
    Ok(())
}
