pub mod error;
pub mod modules;
pub mod proxy; // Relay service module
pub mod utils;

use modules::logger;
use tracing::info;

const ENDPOINTS: &[&str] = &[
    "GET     /health",
    "POST    /api/veo/generate-t2v",
    "POST    /api/veo/generate-i2v",
    "POST    /api/veo/status",
    "POST    /api/veo/upload",
    "GET     /api/veo/download-video",
    "OPTIONS /api/veo/download-video",
];

/// Load config, serve until Ctrl-C
pub async fn run() -> anyhow::Result<()> {
    logger::init_logger();

    let config = proxy::ProxyConfig::load()?;
    let (server, handle) = proxy::AxumServer::start(&config)
        .await
        .map_err(anyhow::Error::msg)?;

    info!(
        port = server.local_addr().port(),
        upstream = %config.upstream_base,
        "Veo relay ready, CORS allows all origins"
    );
    for endpoint in ENDPOINTS {
        info!("  {}", endpoint);
    }

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");
    server.stop();
    handle.await?;

    Ok(())
}
