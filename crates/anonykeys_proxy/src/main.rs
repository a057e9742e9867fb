use std::sync::Arc;

use anonykeys_engine::ReqwestFetcher;
use anonykeys_proxy::{router, ProxyConfig};
use anyhow::{Context, Result};
use shell_logging::shell_info;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = ProxyConfig::from_env()?;

    TermLogger::init(
        config.log_level,
        ConfigBuilder::new().set_time_format_rfc3339().build(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("failed to install logger")?;

    let fetcher = Arc::new(ReqwestFetcher::new(config.fetch_settings()));
    let app = router(fetcher);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    shell_info!(
        "Proxy listening on http://{} (upstream timeout {:?})",
        config.listen_addr,
        config.request_timeout
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shell_info!("Proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the server runs until killed.
        std::future::pending::<()>().await;
    }
}
