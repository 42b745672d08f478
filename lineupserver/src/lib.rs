//! Lineup coordination server library
//!
//! Multi-coach coordination server for a soccer lineup builder: several
//! independent coach sessions share a player roster and exchange lineup
//! proposals over persistent TCP connections using a newline-delimited
//! text protocol.
//!
//! # Architecture
//!
//! ```text
//! LineupServer (accept loop)
//! ├── Service Layer
//! │   ├── PlayerRegistry   (immutable catalog, loaded once)
//! │   └── CoachDirectory   (active sessions, lookup + broadcast)
//! ├── Handler Layer
//! │   └── SessionHandler   (per-connection protocol state machine)
//! ├── Tool Layer
//! │   └── SessionError     (session-fatal error taxonomy)
//! └── Protocol             (line-based commands, frames, notices)
//! ```
//!
//! Each accepted connection runs on its own tokio task; all writes to a
//! session go through its outbound channel, drained by a dedicated writer
//! task, so broadcasts never block on a slow peer's socket.

/// Environment configuration.
pub mod config;

/// Line protocol: commands, sentinels, frame encoders.
pub mod protocol;

/// The listening server and accept loop.
pub mod server;

/// Business services: player registry and coach directory.
pub mod service;

/// Per-connection session handling.
pub mod handler;

/// Common utilities and the session error taxonomy.
pub mod tool;

pub use config::{validate_config, LineupServerConfig, DEFAULT_PORT};
pub use handler::SessionHandler;
pub use protocol::{ClientCommand, LineupEntry};
pub use server::LineupServer;
pub use service::{CoachDirectory, PlayerRegistry};
pub use tool::SessionError;
