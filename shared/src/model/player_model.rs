use serde::{Deserialize, Serialize};

/// One player in the shared catalog.
///
/// Loaded once at startup from the roster source and never mutated
/// afterwards; every session reads the same records through a shared
/// handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Shirt number, unique across the catalog.
    pub id: u32,
    pub name: String,
    pub position: String,
}

impl PlayerRecord {
    pub fn new(id: u32, name: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            position: position.into(),
        }
    }
}
