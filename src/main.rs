use anyhow::Context;
use clap::Parser;
use nekorekten_checker::utils::{logger, validation::Validate};
use nekorekten_checker::{start_server, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real environment variables win.
    dotenvy::dotenv().ok();

    let config = Config::parse();

    logger::init_logger(config.verbose, config.json_logs);

    tracing::info!("Starting nekorekten-checker");
    tracing::debug!(
        "Registry {} (searchMode={}), Shopify API {}, flag tag '{}', timeout {}s",
        config.nekorekten_api_url,
        config.search_mode,
        config.shopify_api_version,
        config.flag_tag,
        config.request_timeout_secs
    );

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    for name in config.missing_secrets() {
        tracing::warn!("⚠️ {} is not set", name);
    }

    let addr = config.socket_addr()?;
    let state = AppState::from_config(&config).context("failed to build HTTP clients")?;

    start_server(state, addr)
        .await
        .with_context(|| format!("server on {} failed", addr))?;

    Ok(())
}
