//! Write-behind persistence port for finished rounds and games.
//!
//! The actor calls these after broadcasting, off the hot path; a failing
//! archive is logged and never blocks play.

use async_trait::async_trait;

use crate::domain::game::RoundSummary;
use crate::domain::state::Team;
use crate::errors::domain::GameId;

#[async_trait]
pub trait GameArchive: Send + Sync {
    async fn record_round(&self, game_id: GameId, summary: &RoundSummary);
    async fn record_game(&self, game_id: GameId, winner: Team, scores: [u32; 2]);
}

/// Default archive that drops everything. Real deployments plug in a
/// store; tests assert against their own recording fake.
pub struct NullArchive;

#[async_trait]
impl GameArchive for NullArchive {
    async fn record_round(&self, _game_id: GameId, _summary: &RoundSummary) {}
    async fn record_game(&self, _game_id: GameId, _winner: Team, _scores: [u32; 2]) {}
}
