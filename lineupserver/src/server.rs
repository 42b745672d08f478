//! Coordination server
//!
//! Binds one listening endpoint and accepts connections indefinitely; each
//! accepted connection gets its own session task. The accept loop itself
//! never blocks on per-connection work, and accept errors are logged
//! without stopping the loop.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::handler::SessionHandler;
use crate::service::{CoachDirectory, PlayerRegistry};

pub struct LineupServer {
    listener: TcpListener,
    handler: Arc<SessionHandler>,
}

impl LineupServer {
    /// Binds the listener. The registry must already be loaded; the server
    /// owns the coach directory for the process lifetime.
    pub async fn bind(addr: &str, registry: Arc<PlayerRegistry>) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind lineup server to {addr}"))?;

        let directory = Arc::new(CoachDirectory::new());
        let handler = Arc::new(SessionHandler::new(registry, directory));

        Ok(Self { listener, handler })
    }

    /// The bound address; useful when binding port 0.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("failed to read listener address")
    }

    /// Sequential accept loop. Runs until the task is dropped or cancelled.
    pub async fn run(self) -> Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    info!("new coach connection from {}", addr);
                    let handler = self.handler.clone();
                    tokio::spawn(async move {
                        handler.handle_connection(stream, addr).await;
                    });
                }
                Err(e) => {
                    error!("failed to accept connection: {}", e);
                }
            }
        }
    }
}
