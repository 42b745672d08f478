//! Roster source collaborator
//!
//! Reads the initial player catalog from a JSON file: an array of
//! `{ "id": 7, "name": "Taylor", "position": "GK" }` objects. Malformed
//! entries and duplicate ids are skipped with a warning; only a missing or
//! unreadable file is reported to the caller, who decides whether to
//! continue with an empty registry.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::model::PlayerRecord;

/// Loads the player catalog from `path`.
///
/// Entry-level problems (missing fields, wrong types, duplicate ids) are
/// not fatal: the offending entry is skipped and logged. Returns an error
/// only when the file itself cannot be read or is not a JSON array.
pub fn load_roster(path: impl AsRef<Path>) -> Result<Vec<PlayerRecord>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read roster file {}", path.display()))?;

    let entries: Vec<serde_json::Value> = serde_json::from_str(&raw)
        .with_context(|| format!("roster file {} is not a JSON array", path.display()))?;

    let mut players = Vec::with_capacity(entries.len());
    let mut seen = HashSet::new();

    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<PlayerRecord>(entry) {
            Ok(record) => {
                if !seen.insert(record.id) {
                    warn!("skipping duplicate player id {} at roster entry {}", record.id, index);
                    continue;
                }
                players.push(record);
            }
            Err(e) => {
                warn!("skipping malformed roster entry {}: {}", index, e);
            }
        }
    }

    info!("loaded {} players from {}", players.len(), path.display());
    Ok(players)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_roster(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_roster_ok() {
        let file = write_roster(
            r#"[
                {"id": 7, "name": "Taylor", "position": "GK"},
                {"id": 10, "name": "Rivera", "position": "MF"}
            ]"#,
        );

        let players = load_roster(file.path()).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0], PlayerRecord::new(7, "Taylor", "GK"));
        assert_eq!(players[1], PlayerRecord::new(10, "Rivera", "MF"));
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let file = write_roster(
            r#"[
                {"id": 7, "name": "Taylor", "position": "GK"},
                {"id": "not-a-number", "name": "Bad", "position": "DF"},
                {"name": "NoId", "position": "FW"},
                {"id": 10, "name": "Rivera", "position": "MF"}
            ]"#,
        );

        let players = load_roster(file.path()).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].id, 7);
        assert_eq!(players[1].id, 10);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let file = write_roster(
            r#"[
                {"id": 7, "name": "Taylor", "position": "GK"},
                {"id": 7, "name": "Impostor", "position": "FW"}
            ]"#,
        );

        let players = load_roster(file.path()).unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Taylor");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_roster("/no/such/roster.json").is_err());
    }

    #[test]
    fn test_not_an_array_is_an_error() {
        let file = write_roster(r#"{"id": 7}"#);
        assert!(load_roster(file.path()).is_err());
    }
}
