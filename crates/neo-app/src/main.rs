//! Asteroid tracker binary - composition root.
//!
//! 1. Parse CLI flags and load configuration from TOML
//! 2. Install the tracing subscriber
//! 3. Build the NeoWs feed client and the skill handler
//! 4. Serve the skill endpoint over axum

mod cli;

use std::sync::Arc;

use clap::Parser;

use neo_api::routes;
use neo_api::state::AppState;
use neo_chat::SkillHandler;
use neo_core::config::NeoConfig;
use neo_feed::NeoWsClient;

use cli::CliArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config. Loaded before tracing so the configured level applies.
    let config_file = args.resolve_config_path();
    let (mut config, load_error) = match NeoConfig::load(&config_file) {
        Ok(config) => (config, None),
        Err(e) => (NeoConfig::default(), Some(e)),
    };
    config.general.log_level = args.resolve_log_level(&config.general.log_level);
    config.server.port = args.resolve_port(config.server.port);
    config.feed.api_key = args.resolve_api_key(&config.feed.api_key);

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting Asteroid Tracker v{}", env!("CARGO_PKG_VERSION"));
    match load_error {
        None => tracing::info!(path = %config_file.display(), "Configuration loaded"),
        Some(e) => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Configuration not loaded, using defaults"
        ),
    }
    config.validate()?;

    // Feed client.
    let client = NeoWsClient::new(&config.feed)?;
    tracing::info!(
        base_url = %config.feed.base_url,
        timeout_secs = config.feed.timeout_secs,
        "NeoWs client ready"
    );

    // Skill.
    let handler = SkillHandler::new(Arc::new(client), config.conversation.page_size);
    tracing::info!(page_size = handler.page_size(), "Skill handler ready");

    let state = AppState::new(handler);

    // === Skill server ===

    if let Err(e) = routes::start_server(&config, state).await {
        tracing::error!(error = %e, "Skill server stopped");
        tracing::error!(
            "Try: NEO_PORT={} cargo run -p neo-app",
            config.server.port.saturating_add(1)
        );
        return Err(e.into());
    }

    Ok(())
}
