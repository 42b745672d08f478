//! Session error taxonomy
//!
//! Everything that ends a session's read loop. Unrecognized commands are
//! not errors (the dispatcher ignores them); these variants cover the
//! conditions that close the connection.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The client did not complete the identification handshake.
    #[error("invalid identification handshake: expected {expected:?}, got {got:?}")]
    Handshake { expected: &'static str, got: String },

    /// A numeric field inside a framed block failed to parse. Session-fatal:
    /// the framing cursor is unrecoverable once a triple is torn.
    #[error("malformed {field} in lineup frame: {value:?}")]
    MalformedNumber { field: &'static str, value: String },

    /// The peer closed the stream in the middle of a command or frame.
    #[error("connection closed mid-command")]
    UnexpectedEof,

    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),
}
