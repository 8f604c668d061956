//! One tokio task per game. The task owns the `Game` exclusively; every
//! mutation flows through its mailbox in FIFO order, so concurrent
//! submissions serialize and exactly one of a set of simultaneous actions
//! for the same turn can win.
//!
//! Validation errors go back on the submitter's oneshot only. Accepted
//! actions fan a fresh broadcast snapshot out to every subscriber.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{sleep_until, Instant};
use tracing::{info, warn};

use crate::archive::GameArchive;
use crate::domain::game::{Game, GameStatus};
use crate::domain::snapshot::{snapshot_for, GameSnapshot};
use crate::domain::state::{ActionSource, Seat};
use crate::errors::domain::{DomainError, GameId};
use crate::sync::protocol::{ClientAction, ServerMsg};

enum Command {
    Join {
        name: String,
        reply: oneshot::Sender<Result<(), DomainError>>,
    },
    Leave {
        name: String,
        reply: oneshot::Sender<Result<(), DomainError>>,
    },
    Start {
        reply: oneshot::Sender<Result<(), DomainError>>,
    },
    Act {
        seat: Seat,
        action: ClientAction,
        reply: oneshot::Sender<Result<(), DomainError>>,
    },
    Snapshot {
        viewer: Option<Seat>,
        reply: oneshot::Sender<GameSnapshot>,
    },
}

/// Cloneable handle to a live game actor.
#[derive(Clone, Debug)]
pub struct GameHandle {
    game_id: GameId,
    tx: mpsc::Sender<Command>,
    broadcast: broadcast::Sender<ServerMsg>,
}

impl GameHandle {
    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    /// Subscribe to the fan-out stream of snapshots and restarts.
    pub fn subscribe(&self) -> broadcast::Receiver<ServerMsg> {
        self.broadcast.subscribe()
    }

    pub async fn join(&self, name: impl Into<String>) -> Result<(), DomainError> {
        self.request(|reply| Command::Join {
            name: name.into(),
            reply,
        })
        .await?
    }

    pub async fn leave(&self, name: impl Into<String>) -> Result<(), DomainError> {
        self.request(|reply| Command::Leave {
            name: name.into(),
            reply,
        })
        .await?
    }

    pub async fn start(&self) -> Result<(), DomainError> {
        self.request(|reply| Command::Start { reply }).await?
    }

    /// Submit one action for a seat. The result is private feedback; the
    /// state change, if any, arrives on the broadcast stream.
    pub async fn act(&self, seat: Seat, action: ClientAction) -> Result<(), DomainError> {
        self.request(|reply| Command::Act {
            seat,
            action,
            reply,
        })
        .await?
    }

    /// Viewer-scoped snapshot, for connect and reconnect.
    pub async fn snapshot(&self, viewer: Option<Seat>) -> Result<GameSnapshot, DomainError> {
        self.request(|reply| Command::Snapshot { viewer, reply })
            .await
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, DomainError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(make(reply_tx))
            .await
            .map_err(|_| DomainError::GameNotFound(self.game_id))?;
        reply_rx
            .await
            .map_err(|_| DomainError::GameNotFound(self.game_id))
    }
}

/// Spawn the actor task for a game and return its handle. The task exits
/// when every handle is dropped.
pub fn spawn_game(game: Game, archive: Arc<dyn GameArchive>) -> GameHandle {
    let game_id = game.id;
    let config = game.config().clone();
    let (tx, rx) = mpsc::channel(config.mailbox_capacity);
    let (broadcast_tx, _) = broadcast::channel(config.broadcast_capacity);

    let actor = Actor {
        game,
        archive,
        broadcast: broadcast_tx.clone(),
        turn_timeout: config.turn_timeout,
        deadline: None,
    };
    tokio::spawn(actor.run(rx));

    GameHandle {
        game_id,
        tx,
        broadcast: broadcast_tx,
    }
}

struct Actor {
    game: Game,
    archive: Arc<dyn GameArchive>,
    broadcast: broadcast::Sender<ServerMsg>,
    turn_timeout: Option<Duration>,
    deadline: Option<Instant>,
}

impl Actor {
    async fn run(mut self, mut rx: mpsc::Receiver<Command>) {
        info!(game_id = %self.game.id, "game actor started");
        loop {
            // select! evaluates the sleep even when disarmed; park it far
            // in the future in that case.
            let wake = self
                .deadline
                .unwrap_or_else(|| Instant::now() + Duration::from_secs(86_400));
            tokio::select! {
                cmd = rx.recv() => {
                    let Some(cmd) = cmd else { break };
                    self.handle(cmd).await;
                }
                _ = sleep_until(wake), if self.deadline.is_some() => {
                    self.fire_deadline().await;
                }
            }
        }
        info!(game_id = %self.game.id, "game actor stopped");
    }

    async fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::Join { name, reply } => {
                let res = self.game.add_player(name);
                if res.is_ok() {
                    self.publish_snapshot();
                }
                let _ = reply.send(res);
            }
            Command::Leave { name, reply } => {
                let res = self.game.remove_player(&name);
                if res.is_ok() {
                    self.publish_snapshot();
                }
                let _ = reply.send(res);
            }
            Command::Start { reply } => {
                let res = self.game.start_game();
                if res.is_ok() {
                    info!(game_id = %self.game.id, "game started");
                    self.publish_snapshot();
                    self.arm_deadline();
                }
                let _ = reply.send(res);
            }
            Command::Act {
                seat,
                action,
                reply,
            } => {
                let res = self
                    .apply_action(seat, action.into(), ActionSource::Player)
                    .await;
                let _ = reply.send(res);
            }
            Command::Snapshot { viewer, reply } => {
                let _ = reply.send(snapshot_for(&self.game, viewer));
            }
        }
    }

    /// The turn deadline expired: inject the default action for the seat
    /// holding the turn.
    async fn fire_deadline(&mut self) {
        self.deadline = None;
        let Some(seat) = self.game.round().and_then(|r| r.seat_to_act()) else {
            return;
        };
        let Some(action) = self.game.timeout_action(seat) else {
            return;
        };
        info!(game_id = %self.game.id, seat, "turn deadline expired, injecting default action");
        if let Err(err) = self.apply_action(seat, action, ActionSource::Timeout).await {
            // Defaults are always legal; anything here is an engine bug.
            warn!(game_id = %self.game.id, seat, %err, "default action rejected");
        }
    }

    async fn apply_action(
        &mut self,
        seat: Seat,
        action: crate::domain::game::GameAction,
        source: ActionSource,
    ) -> Result<(), DomainError> {
        match self.game.apply(seat, action, source) {
            Ok(outcome) => {
                if let Some(summary) = &outcome.round_completed {
                    info!(
                        game_id = %self.game.id,
                        round_no = summary.round_no,
                        points_a = summary.settlement.points[0],
                        points_b = summary.settlement.points[1],
                        forfeited = summary.settlement.forfeited,
                        "round settled"
                    );
                    self.archive.record_round(self.game.id, summary).await;
                }
                if let Some(winner) = outcome.game_finished {
                    info!(game_id = %self.game.id, ?winner, "game finished");
                    self.archive
                        .record_game(self.game.id, winner, self.game.scores)
                        .await;
                }
                self.publish_snapshot();
                self.arm_deadline();
                Ok(())
            }
            Err(err) if err.is_fatal() => {
                warn!(game_id = %self.game.id, %err, "fatal round error, redealing");
                self.restart_round(err.to_string()).await;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// A fatal error poisons only the current deal. Redeal the round and
    /// tell every client; the process and the other games are unaffected.
    async fn restart_round(&mut self, reason: String) {
        match self.game.restart_round() {
            Ok(()) => {
                let _ = self.broadcast.send(ServerMsg::RoundRestarted { reason });
                self.publish_snapshot();
                self.arm_deadline();
            }
            Err(err) => {
                // Redeal from a fresh deck cannot fail unless the game is
                // not in progress; nothing left to do for this round.
                warn!(game_id = %self.game.id, %err, "round restart failed");
            }
        }
    }

    fn publish_snapshot(&self) {
        let msg = ServerMsg::Snapshot {
            snapshot: snapshot_for(&self.game, None),
        };
        // No subscribers is fine.
        let _ = self.broadcast.send(msg);
    }

    fn arm_deadline(&mut self) {
        let waiting = self.game.status == GameStatus::InProgress
            && self
                .game
                .round()
                .and_then(|r| r.seat_to_act())
                .is_some();
        self.deadline = match (waiting, self.turn_timeout) {
            (true, Some(timeout)) => Some(Instant::now() + timeout),
            _ => None,
        };
    }
}
