//! Coach directory
//!
//! The set of currently active sessions. One coarse `tokio::sync::Mutex`
//! guards every operation, so a broadcast observes a consistent membership
//! snapshot and registration/deregistration are mutually exclusive with it.
//! Delivery enqueues onto each session's unbounded outbound channel; no
//! socket write ever happens while the lock is held, so a slow peer can
//! stall only its own writer task.
//!
//! Coach names are display labels, not identities: sessions are keyed by a
//! per-process session id, duplicates are allowed, and name lookup is
//! first-match in registration order.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::debug;

use crate::protocol::{self, LineupEntry};

/// Single-slot buffer for an outstanding lineup transfer.
///
/// Written by the offering session's handler, read and cleared by the
/// owning session's ACCEPT_LINEUP handler; the mutex prevents a torn read
/// when the two race.
pub type PendingLineup = Arc<Mutex<Vec<LineupEntry>>>;

/// One registered session as the directory sees it.
pub struct CoachEntry {
    pub session_id: u64,
    pub name: String,
    outbound: mpsc::UnboundedSender<String>,
    pending_lineup: PendingLineup,
}

impl CoachEntry {
    pub fn new(
        session_id: u64,
        name: String,
        outbound: mpsc::UnboundedSender<String>,
        pending_lineup: PendingLineup,
    ) -> Self {
        Self {
            session_id,
            name,
            outbound,
            pending_lineup,
        }
    }

    fn send(&self, block: &str) {
        // A closed channel means the session is tearing down; the departure
        // broadcast will tell everyone else.
        let _ = self.outbound.send(block.to_string());
    }
}

pub struct CoachDirectory {
    coaches: Mutex<Vec<CoachEntry>>,
}

impl CoachDirectory {
    pub fn new() -> Self {
        Self {
            coaches: Mutex::new(Vec::new()),
        }
    }

    /// Adds a session. No-op returning false if the session id is already
    /// registered.
    pub async fn register(&self, entry: CoachEntry) -> bool {
        let mut coaches = self.coaches.lock().await;
        if coaches.iter().any(|c| c.session_id == entry.session_id) {
            return false;
        }
        debug!("registered coach {:?} (session {})", entry.name, entry.session_id);
        coaches.push(entry);
        true
    }

    /// Removes a session. Idempotent.
    pub async fn deregister(&self, session_id: u64) -> bool {
        let mut coaches = self.coaches.lock().await;
        let before = coaches.len();
        coaches.retain(|c| c.session_id != session_id);
        before != coaches.len()
    }

    /// Enqueues `block` to every registered session except the sender.
    pub async fn broadcast_except(&self, sender_id: u64, block: &str) {
        let coaches = self.coaches.lock().await;
        for coach in coaches.iter().filter(|c| c.session_id != sender_id) {
            coach.send(block);
        }
    }

    /// Coach names of every registered session except the given one, in
    /// registration order. Answers GET_ACTIVE_COACHES, which excludes the
    /// issuing coach.
    pub async fn active_names_except(&self, session_id: u64) -> Vec<String> {
        let coaches = self.coaches.lock().await;
        coaches
            .iter()
            .filter(|c| c.session_id != session_id)
            .map(|c| c.name.clone())
            .collect()
    }

    /// Stores `entries` into the pending-lineup slot of the first coach
    /// named `target_name` and pushes the offer notice to it. Returns false
    /// when no such coach is registered (including one that has already
    /// deregistered mid-teardown); the caller drops the offer silently.
    pub async fn offer_lineup(
        &self,
        target_name: &str,
        from_coach: &str,
        entries: Vec<LineupEntry>,
    ) -> bool {
        let coaches = self.coaches.lock().await;
        let Some(target) = coaches.iter().find(|c| c.name == target_name) else {
            return false;
        };

        // Fill the slot before the notice goes out, so an accept racing the
        // offer can never observe an empty buffer.
        *target.pending_lineup.lock().await = entries;
        target.send(&protocol::lineup_offer(from_coach));
        true
    }

    pub async fn len(&self) -> usize {
        self.coaches.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.coaches.lock().await.is_empty()
    }
}

impl Default for CoachDirectory {
    fn default() -> Self {
        Self::new()
    }
}
