//! Coach session handler
//!
//! One session per accepted connection. The session reads one line at a
//! time and dispatches it; everything it writes goes through an unbounded
//! outbound channel drained by a dedicated writer task, so responses and
//! pushed notices share a single ordered queue and framed blocks never
//! interleave.
//!
//! Lifecycle: handshake (CONNECTING) → directory registration (ACTIVE) →
//! read/dispatch loop → cleanup (CLOSED). Cleanup runs on every exit path
//! once the session is registered: deregister first, then broadcast the
//! departure, so an offer racing the teardown sees "target not found".

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use crate::protocol::{self, ClientCommand, LineupEntry};
use crate::service::{CoachDirectory, CoachEntry, PendingLineup, PlayerRegistry};
use crate::tool::SessionError;

type LineReader = tokio::io::Lines<BufReader<OwnedReadHalf>>;

pub struct SessionHandler {
    registry: Arc<PlayerRegistry>,
    directory: Arc<CoachDirectory>,
    next_session_id: AtomicU64,
}

impl SessionHandler {
    pub fn new(registry: Arc<PlayerRegistry>, directory: Arc<CoachDirectory>) -> Self {
        Self {
            registry,
            directory,
            next_session_id: AtomicU64::new(1),
        }
    }

    /// Runs one connection to completion. Never returns an error to the
    /// accept loop; session failures end the session and are logged here.
    pub async fn handle_connection(&self, stream: TcpStream, addr: std::net::SocketAddr) {
        let (read_half, write_half) = stream.into_split();
        let mut lines = BufReader::new(read_half).lines();

        let (tx, rx) = mpsc::unbounded_channel::<String>();
        let writer = tokio::spawn(write_outbound(write_half, rx));

        let coach_name = match read_handshake(&mut lines).await {
            Ok(name) => name,
            Err(e) => {
                warn!("handshake failed for {}: {}", addr, e);
                drop(tx);
                let _ = writer.await;
                return;
            }
        };

        let session_id = self.next_session_id.fetch_add(1, Ordering::Relaxed);
        let pending: PendingLineup = Arc::new(Mutex::new(Vec::new()));
        self.directory
            .register(CoachEntry::new(
                session_id,
                coach_name.clone(),
                tx.clone(),
                pending.clone(),
            ))
            .await;
        info!("coach connected: {} (session {}, {})", coach_name, session_id, addr);

        match self
            .run_session(session_id, &coach_name, &mut lines, &tx, &pending)
            .await
        {
            Ok(()) => info!("coach session closed: {}", coach_name),
            Err(e) => warn!("coach session {} ended with error: {}", coach_name, e),
        }

        // Removal is atomic with respect to broadcast: once deregistered,
        // this session can neither receive notices nor be offered lineups.
        self.directory.deregister(session_id).await;
        self.directory
            .broadcast_except(session_id, &protocol::coach_disconnected(&coach_name))
            .await;

        drop(tx);
        let _ = writer.await;
    }

    /// The ACTIVE-state command loop. Returns `Ok(())` on QUIT or a clean
    /// end of stream, an error on transport failure or a torn frame.
    async fn run_session(
        &self,
        session_id: u64,
        coach_name: &str,
        lines: &mut LineReader,
        tx: &mpsc::UnboundedSender<String>,
        pending: &PendingLineup,
    ) -> Result<(), SessionError> {
        while let Some(line) = lines.next_line().await? {
            let Some(command) = ClientCommand::parse(line.trim()) else {
                // Permissive dispatcher: unmatched input vanishes.
                debug!("ignoring unrecognized line from {}: {:?}", coach_name, line);
                continue;
            };
            debug!("command from {}: {:?}", coach_name, command);

            match command {
                ClientCommand::GetPlayers => {
                    queue(tx, protocol::player_list_frame(self.registry.list()));
                }
                ClientCommand::AddPlayer => {
                    let id_line = expect_line(lines).await?;
                    match parse_player_id(&id_line).and_then(|id| self.registry.get(id)) {
                        Some(record) => {
                            queue(tx, protocol::add_player_success(record));
                            self.directory
                                .broadcast_except(session_id, &protocol::players_updated())
                                .await;
                        }
                        None => queue(tx, protocol::player_not_found()),
                    }
                }
                ClientCommand::RemovePlayer => {
                    let id_line = expect_line(lines).await?;
                    match parse_player_id(&id_line).and_then(|id| self.registry.get(id)) {
                        Some(_) => {
                            queue(tx, protocol::remove_player_success());
                            self.directory
                                .broadcast_except(session_id, &protocol::players_updated())
                                .await;
                        }
                        None => queue(tx, protocol::player_not_found()),
                    }
                }
                ClientCommand::GetActiveCoaches => {
                    let names = self.directory.active_names_except(session_id).await;
                    queue(tx, protocol::active_coaches_frame(&names));
                }
                ClientCommand::SendLineupTo => {
                    let target = expect_line(lines).await?;
                    // Consume the whole frame before the lookup so a missing
                    // target never leaves stray triples in the stream.
                    let entries = read_lineup_frame(lines).await?;
                    let delivered = self
                        .directory
                        .offer_lineup(target.trim(), coach_name, entries)
                        .await;
                    if !delivered {
                        debug!(
                            "lineup from {} for unknown coach {:?} dropped",
                            coach_name,
                            target.trim()
                        );
                    }
                }
                ClientCommand::AcceptLineup => {
                    let entries = std::mem::take(&mut *pending.lock().await);
                    queue(tx, protocol::lineup_received_frame(&entries));
                }
                ClientCommand::DeclineLineup => {
                    queue(tx, protocol::lineup_declined());
                }
                ClientCommand::Quit => {
                    debug!("coach {} quit", coach_name);
                    break;
                }
            }
        }

        Ok(())
    }
}

/// Drains the outbound queue into the socket. Ends when every sender is
/// dropped or the peer stops accepting writes.
async fn write_outbound(write_half: OwnedWriteHalf, mut rx: mpsc::UnboundedReceiver<String>) {
    let mut writer = BufWriter::new(write_half);
    while let Some(chunk) = rx.recv().await {
        if writer.write_all(chunk.as_bytes()).await.is_err() {
            break;
        }
        if writer.flush().await.is_err() {
            break;
        }
    }
}

fn queue(tx: &mpsc::UnboundedSender<String>, block: String) {
    // Send only fails when the writer task is gone, which ends the session
    // through its own read loop shortly after.
    let _ = tx.send(block);
}

/// Identification handshake: the literal `Coach name:` line followed by the
/// display name. Anything else closes the connection before the session
/// joins the directory.
async fn read_handshake(lines: &mut LineReader) -> Result<String, SessionError> {
    let prompt = lines
        .next_line()
        .await?
        .ok_or(SessionError::UnexpectedEof)?;
    if prompt.trim() != protocol::COACH_NAME_PROMPT {
        return Err(SessionError::Handshake {
            expected: protocol::COACH_NAME_PROMPT,
            got: prompt,
        });
    }

    let name = lines
        .next_line()
        .await?
        .ok_or(SessionError::UnexpectedEof)?;
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(SessionError::Handshake {
            expected: "a non-empty coach name",
            got: name,
        });
    }
    Ok(name)
}

async fn expect_line(lines: &mut LineReader) -> Result<String, SessionError> {
    lines
        .next_line()
        .await?
        .ok_or(SessionError::UnexpectedEof)
}

/// A lookup argument, not a framed field: an unparsable id falls through to
/// "player not found" instead of ending the session.
fn parse_player_id(line: &str) -> Option<u32> {
    line.trim().parse().ok()
}

/// Reads id/x/y triples until `END_LINEUP`. Numeric parse failures inside
/// the frame are session-fatal: the framing cursor cannot recover once a
/// triple is torn.
async fn read_lineup_frame(lines: &mut LineReader) -> Result<Vec<LineupEntry>, SessionError> {
    let mut entries = Vec::new();

    loop {
        let id_line = expect_line(lines).await?;
        if id_line.trim() == protocol::END_LINEUP {
            return Ok(entries);
        }
        let player_id: u32 =
            id_line
                .trim()
                .parse()
                .map_err(|_| SessionError::MalformedNumber {
                    field: "player id",
                    value: id_line.clone(),
                })?;

        let x_line = expect_line(lines).await?;
        let x: f64 = x_line
            .trim()
            .parse()
            .map_err(|_| SessionError::MalformedNumber {
                field: "x coordinate",
                value: x_line.clone(),
            })?;

        let y_line = expect_line(lines).await?;
        let y: f64 = y_line
            .trim()
            .parse()
            .map_err(|_| SessionError::MalformedNumber {
                field: "y coordinate",
                value: y_line.clone(),
            })?;

        entries.push(LineupEntry::new(player_id, x, y));
    }
}
