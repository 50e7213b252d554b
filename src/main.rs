// src/main.rs

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jobportal::application::state::AppState;
use jobportal::config::ClientConfig;
use jobportal::events::{SessionEndReason, SessionEnded};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. LOGGING (RUST_LOG, default warn)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    // 2. CONFIG
    let config = ClientConfig::from_env()?;

    // 3. APPLICATION STATE
    let state = AppState::connect(&config)?;

    // 4. EVENT HANDLER REGISTRATION
    state.event_bus.subscribe::<SessionEnded, _>(|event| {
        if event.reason == SessionEndReason::Unauthorized {
            log::warn!("the portal rejected the session token; session cleared");
        }
    });

    // 5. RUN
    cli::run(cli, &state).await
}
