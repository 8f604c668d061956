//! Viewer-scoped projections of game state for the wire.
//!
//! Broadcast snapshots never include any hand's cards, only counts. A
//! viewer's own hand is filled in for targeted sends (connect, reconnect,
//! after a deal).

use serde::{Deserialize, Serialize};

use super::cards_types::{Card, Suit};
use super::declarations::DeclarationKind;
use super::game::{Game, GameStatus};
use super::round::CompletedTrick;
use super::state::{Play, RoundPhase, Seat, Team};
use crate::errors::domain::GameId;

/// A declaration as shown to everyone: which seat claimed what, for how
/// much. The cards themselves stay hidden until the round settles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationView {
    pub seat: Seat,
    pub kind: DeclarationKind,
    pub value: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub game_id: GameId,
    #[serde(flatten)]
    pub status: GameStatus,
    pub round_no: u32,
    pub scores: [u32; 2],
    pub phase: Option<RoundPhase>,
    pub trump: Option<Suit>,
    pub calling_team: Option<Team>,
    pub dealer: Option<Seat>,
    pub turn: Option<Seat>,
    pub hand_sizes: [u8; 4],
    /// Present only in snapshots addressed to one seat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub your_hand: Option<Vec<Card>>,
    pub current_trick: Vec<Play>,
    pub last_trick: Option<CompletedTrick>,
    pub declarations: Vec<DeclarationView>,
}

/// Project the game for `viewer`. `None` produces the broadcast form with
/// every hand hidden.
pub fn snapshot_for(game: &Game, viewer: Option<Seat>) -> GameSnapshot {
    let round = game.round();
    GameSnapshot {
        game_id: game.id,
        status: game.status.clone(),
        round_no: game.round_no,
        scores: game.scores,
        phase: round.map(|r| r.phase),
        trump: round.and_then(|r| r.trump),
        calling_team: round.and_then(|r| r.calling_team),
        dealer: round.map(|r| r.dealer),
        turn: round.and_then(|r| r.seat_to_act()),
        hand_sizes: round.map(|r| r.hand_sizes()).unwrap_or([0; 4]),
        your_hand: match (round, viewer) {
            (Some(r), Some(seat)) => Some(r.hand(seat).to_vec()),
            _ => None,
        },
        current_trick: round.map(|r| r.current_trick().to_vec()).unwrap_or_default(),
        last_trick: round.and_then(|r| r.last_trick().cloned()),
        declarations: round
            .map(|r| {
                r.declarations
                    .iter()
                    .map(|d| DeclarationView {
                        seat: d.seat,
                        kind: d.kind,
                        value: d.kind.points(),
                    })
                    .collect()
            })
            .unwrap_or_default(),
    }
}
