//! Lineup coordination server binary
//!
//! Loads the environment configuration and the roster file, populates the
//! player registry once, then serves coach sessions until Ctrl-C.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use lineupserver::config::{validate_config, LineupServerConfig};
use lineupserver::server::LineupServer;
use lineupserver::service::PlayerRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    shared::logging::init("info");

    let config = LineupServerConfig::from_env()?;
    validate_config(&config)?;

    // Registry load happens exactly once, before the accept loop starts.
    // A missing or unreadable roster is not fatal: the server starts with
    // an empty registry.
    let registry = Arc::new(PlayerRegistry::new());
    match shared::roster::load_roster(&config.roster_path) {
        Ok(players) => {
            registry.load(players);
        }
        Err(e) => {
            warn!("starting with an empty player registry: {:#}", e);
            registry.load(Vec::new());
        }
    }

    let server = LineupServer::bind(&config.bind_address(), registry.clone()).await?;
    info!("=== Lineup Coordination Server ===");
    info!("listening on {}", server.local_addr()?);
    info!("players in registry: {}", registry.len());
    info!("==================================");

    tokio::select! {
        result = server.run() => result,
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received, stopping server");
            Ok(())
        }
    }
}
