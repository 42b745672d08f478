//! Shared library for the lineup coordination server
//!
//! Contains the pieces that are independent of the wire protocol:
//! - **model**: player data types
//! - **roster**: the roster source collaborator that supplies the initial
//!   player catalog once at process start
//! - **logging**: tracing subscriber initialization

pub mod logging;
pub mod model;
pub mod roster;

pub use model::PlayerRecord;
pub use roster::load_roster;
