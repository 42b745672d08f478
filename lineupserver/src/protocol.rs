//! Lineup wire protocol
//!
//! Newline-delimited UTF-8 text over TCP. Clients send one command per
//! line, some commands followed by argument lines or a framed block; the
//! server answers with framed blocks and pushes unsolicited notices.
//!
//! Framed blocks use literal sentinel lines:
//!
//! ```text
//! BEGIN_PLAYER_LIST / END_PLAYER_LIST   player catalog
//! ACTIVE_COACHES / END_COACHES          connected coach names
//! ... / END_LINEUP                      id/x/y placement triples
//! ```
//!
//! Every encoder here returns a complete multi-line chunk (each line
//! newline-terminated) so a block can be queued to a session's outbound
//! channel as one unit and never interleaves with a pushed notice.

use shared::model::PlayerRecord;

/// Identification handshake line, sent by the client before its name.
pub const COACH_NAME_PROMPT: &str = "Coach name:";

pub const BEGIN_PLAYER_LIST: &str = "BEGIN_PLAYER_LIST";
pub const END_PLAYER_LIST: &str = "END_PLAYER_LIST";
pub const ACTIVE_COACHES: &str = "ACTIVE_COACHES";
pub const END_COACHES: &str = "END_COACHES";
pub const END_LINEUP: &str = "END_LINEUP";

pub const SUCCESS: &str = "SUCCESS";
pub const ERROR_PLAYER_NOT_FOUND: &str = "ERROR: Player not found";

pub const PLAYERS_UPDATED: &str = "PLAYERS_UPDATED";
pub const LINEUP_OFFER: &str = "LINEUP_OFFER";
pub const LINEUP_RECEIVED: &str = "LINEUP_RECEIVED";
pub const LINEUP_DECLINED: &str = "LINEUP_DECLINED";
pub const COACH_DISCONNECTED: &str = "COACH_DISCONNECTED";

/// Commands a coach client may issue once identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCommand {
    GetPlayers,
    AddPlayer,
    RemovePlayer,
    GetActiveCoaches,
    SendLineupTo,
    AcceptLineup,
    DeclineLineup,
    Quit,
}

impl ClientCommand {
    /// Parses one command line. Unknown lines yield `None` and are ignored
    /// by the dispatcher.
    pub fn parse(line: &str) -> Option<Self> {
        match line {
            "GET_PLAYERS" => Some(Self::GetPlayers),
            "ADD_PLAYER" => Some(Self::AddPlayer),
            "REMOVE_PLAYER" => Some(Self::RemovePlayer),
            "GET_ACTIVE_COACHES" => Some(Self::GetActiveCoaches),
            "SEND_LINEUP_TO" => Some(Self::SendLineupTo),
            "ACCEPT_LINEUP" => Some(Self::AcceptLineup),
            "DECLINE_LINEUP" => Some(Self::DeclineLineup),
            "QUIT" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// One player placement inside a lineup frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LineupEntry {
    pub player_id: u32,
    pub x: f64,
    pub y: f64,
}

impl LineupEntry {
    pub fn new(player_id: u32, x: f64, y: f64) -> Self {
        Self { player_id, x, y }
    }
}

// Debug formatting keeps integral floats as "1.0" instead of "1", so an
// offered lineup is retrievable verbatim by the accepting coach.
fn push_float(out: &mut String, value: f64) {
    out.push_str(&format!("{value:?}\n"));
}

/// `BEGIN_PLAYER_LIST`, id/name/position per record, `END_PLAYER_LIST`.
pub fn player_list_frame(players: &[PlayerRecord]) -> String {
    let mut out = String::new();
    out.push_str(BEGIN_PLAYER_LIST);
    out.push('\n');
    for player in players {
        out.push_str(&format!("{}\n{}\n{}\n", player.id, player.name, player.position));
    }
    out.push_str(END_PLAYER_LIST);
    out.push('\n');
    out
}

/// `SUCCESS` plus the echoed record, the ADD_PLAYER happy path.
pub fn add_player_success(player: &PlayerRecord) -> String {
    format!(
        "{SUCCESS}\n{}\n{}\n{}\n",
        player.id, player.name, player.position
    )
}

pub fn remove_player_success() -> String {
    format!("{SUCCESS}\n")
}

pub fn player_not_found() -> String {
    format!("{ERROR_PLAYER_NOT_FOUND}\n")
}

/// `ACTIVE_COACHES`, one name per line, `END_COACHES`.
pub fn active_coaches_frame(names: &[String]) -> String {
    let mut out = String::new();
    out.push_str(ACTIVE_COACHES);
    out.push('\n');
    for name in names {
        out.push_str(name);
        out.push('\n');
    }
    out.push_str(END_COACHES);
    out.push('\n');
    out
}

pub fn players_updated() -> String {
    format!("{PLAYERS_UPDATED}\n")
}

/// `LINEUP_OFFER` plus the offering coach's name, pushed to the target.
pub fn lineup_offer(from_coach: &str) -> String {
    format!("{LINEUP_OFFER}\n{from_coach}\n")
}

/// `LINEUP_RECEIVED`, the buffered triples, `END_LINEUP`. An empty frame
/// is valid: accepting with nothing pending yields just the two markers.
pub fn lineup_received_frame(entries: &[LineupEntry]) -> String {
    let mut out = String::new();
    out.push_str(LINEUP_RECEIVED);
    out.push('\n');
    for entry in entries {
        out.push_str(&format!("{}\n", entry.player_id));
        push_float(&mut out, entry.x);
        push_float(&mut out, entry.y);
    }
    out.push_str(END_LINEUP);
    out.push('\n');
    out
}

pub fn lineup_declined() -> String {
    format!("{LINEUP_DECLINED}\n")
}

/// `COACH_DISCONNECTED` plus the departed coach's name.
pub fn coach_disconnected(coach: &str) -> String {
    format!("{COACH_DISCONNECTED}\n{coach}\n")
}
