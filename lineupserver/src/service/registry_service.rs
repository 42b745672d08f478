//! Player registry
//!
//! Process-wide catalog of known players, populated once and read-only
//! afterwards. ADD_PLAYER / REMOVE_PLAYER never touch it: the registry is
//! the universe of known players, not a per-coach selection, so those
//! commands only trigger refresh notices to the other sessions.

use std::collections::HashMap;

use once_cell::sync::OnceCell;
use shared::model::PlayerRecord;
use tracing::{info, warn};

struct RegistryInner {
    /// Insertion order from the load, backing `list()`.
    players: Vec<PlayerRecord>,
    by_id: HashMap<u32, usize>,
}

pub struct PlayerRegistry {
    inner: OnceCell<RegistryInner>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self {
            inner: OnceCell::new(),
        }
    }

    /// Populates the registry. At most one call takes effect per process;
    /// concurrent first-time loaders are serialized by the cell and cannot
    /// double-populate. Returns false when the registry was already loaded.
    pub fn load(&self, records: Vec<PlayerRecord>) -> bool {
        let mut fresh = false;
        self.inner.get_or_init(|| {
            fresh = true;
            let by_id = records
                .iter()
                .enumerate()
                .map(|(index, record)| (record.id, index))
                .collect();
            info!("player registry loaded with {} records", records.len());
            RegistryInner {
                players: records,
                by_id,
            }
        });

        if !fresh {
            warn!("player registry load ignored: already loaded");
        }
        fresh
    }

    pub fn get(&self, id: u32) -> Option<&PlayerRecord> {
        let inner = self.inner.get()?;
        inner.by_id.get(&id).map(|&index| &inner.players[index])
    }

    /// All records in load order. Empty before the load.
    pub fn list(&self) -> &[PlayerRecord] {
        self.inner
            .get()
            .map(|inner| inner.players.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }
}

impl Default for PlayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
