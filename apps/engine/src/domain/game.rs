//! The game coordinator: players, seating, the current round, cumulative
//! scores, and the win condition.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cards_types::{Card, Suit};
use super::declarations::DeclarationKind;
use super::round::{PlayOutcome, Round};
use super::scoring::Settlement;
use super::state::{dealer_for_round, ActionSource, Seat, Team, SEATS};
use crate::config::EngineConfig;
use crate::errors::domain::{DomainError, GameId};

/// Lifecycle of one game instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GameStatus {
    Waiting,
    InProgress,
    Finished { winner: Team },
}

/// One entry of the match history, kept after each settled round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round_no: u32,
    pub dealer: Seat,
    pub trump: Suit,
    pub calling_team: Team,
    pub settlement: Settlement,
    pub scores_after: [u32; 2],
}

/// A gameplay action as the coordinator dispatches it. The sync layer
/// builds these from wire messages; tests build them directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameAction {
    CallTrump { suit: Suit },
    PassTrump,
    Declare { kind: DeclarationKind, cards: Vec<Card> },
    /// Shorthand for declaring the held king and queen of trump.
    Bela,
    PlayCard { card: Card },
}

/// What an accepted action changed, for the sync layer to broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplyOutcome {
    pub trick_completed: bool,
    pub round_completed: Option<RoundSummary>,
    pub game_finished: Option<Team>,
}

#[derive(Debug)]
pub struct Game {
    pub id: GameId,
    config: EngineConfig,
    /// Player names in join order; index is NOT the seat.
    players: Vec<String>,
    /// seating[seat] indexes into `players` once the game has started.
    seating: Vec<usize>,
    pub status: GameStatus,
    pub scores: [u32; 2],
    pub round_no: u32,
    round: Option<Round>,
    pub history: Vec<RoundSummary>,
    starting_dealer: Seat,
    rng: ChaCha12Rng,
}

impl Game {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rng(config, ChaCha12Rng::from_os_rng())
    }

    /// Deterministic construction for tests and replays.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha12Rng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, rng: ChaCha12Rng) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            players: Vec::new(),
            seating: Vec::new(),
            status: GameStatus::Waiting,
            scores: [0; 2],
            round_no: 0,
            round: None,
            history: Vec::new(),
            starting_dealer: 0,
            rng,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Name seated at `seat`, once the game has started.
    pub fn player_at(&self, seat: Seat) -> Option<&str> {
        self.seating
            .get(seat as usize)
            .map(|&i| self.players[i].as_str())
    }

    pub fn add_player(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        if self.status != GameStatus::Waiting {
            return Err(DomainError::validation("game already started"));
        }
        if self.players.len() >= SEATS as usize {
            return Err(DomainError::GameFull);
        }
        let name = name.into();
        if self.players.contains(&name) {
            return Err(DomainError::validation(format!(
                "player {name} already joined"
            )));
        }
        self.players.push(name);
        Ok(())
    }

    pub fn remove_player(&mut self, name: &str) -> Result<(), DomainError> {
        if self.status != GameStatus::Waiting {
            return Err(DomainError::validation(
                "cannot leave a game in progress",
            ));
        }
        let pos = self
            .players
            .iter()
            .position(|p| p == name)
            .ok_or_else(|| DomainError::validation(format!("player {name} not in game")))?;
        self.players.remove(pos);
        Ok(())
    }

    /// Start the match: shuffle players onto seats, pick the starting
    /// dealer, and deal round one. Teams are the opposite-seat pairs, so
    /// the seat shuffle is also the random team split.
    pub fn start_game(&mut self) -> Result<(), DomainError> {
        if self.status != GameStatus::Waiting {
            return Err(DomainError::validation("game already started"));
        }
        if self.players.len() != SEATS as usize {
            return Err(DomainError::validation(format!(
                "need exactly {SEATS} players, have {}",
                self.players.len()
            )));
        }
        let mut seating: Vec<usize> = (0..self.players.len()).collect();
        seating.shuffle(&mut self.rng);
        self.seating = seating;
        self.starting_dealer = self.rng.random_range(0..SEATS);
        self.status = GameStatus::InProgress;
        self.deal_next_round()
    }

    fn deal_next_round(&mut self) -> Result<(), DomainError> {
        self.round_no += 1;
        let dealer = dealer_for_round(self.starting_dealer, self.round_no);
        self.round = Some(Round::deal(self.round_no, dealer, &mut self.rng)?);
        Ok(())
    }

    /// Throw away the current deal and redeal the same round number. The
    /// sync layer calls this after a fatal round error.
    pub fn restart_round(&mut self) -> Result<(), DomainError> {
        if self.status != GameStatus::InProgress {
            return Err(DomainError::validation("no round to restart"));
        }
        let dealer = dealer_for_round(self.starting_dealer, self.round_no);
        self.round = Some(Round::deal(self.round_no, dealer, &mut self.rng)?);
        Ok(())
    }

    fn round_mut(&mut self) -> Result<&mut Round, DomainError> {
        if self.status != GameStatus::InProgress {
            return Err(DomainError::validation("game is not in progress"));
        }
        self.round
            .as_mut()
            .ok_or_else(|| DomainError::validation("no active round"))
    }

    /// Dispatch one gameplay action for a seat. On round completion the
    /// settlement is folded into the match scores and, unless the match
    /// ended, the next round is dealt.
    pub fn apply(
        &mut self,
        seat: Seat,
        action: GameAction,
        source: ActionSource,
    ) -> Result<ApplyOutcome, DomainError> {
        let round = self.round_mut()?;
        let play_outcome: Option<PlayOutcome> = match action {
            GameAction::CallTrump { suit } => {
                round.call_trump(seat, suit)?;
                None
            }
            GameAction::PassTrump => {
                round.pass_trump(seat)?;
                None
            }
            GameAction::Declare { kind, cards } => {
                round.declare(seat, kind, cards)?;
                None
            }
            GameAction::Bela => {
                let cards = round.bela_cards(seat).ok_or_else(|| {
                    DomainError::illegal_declaration(
                        "bela requires holding the king and queen of trump",
                    )
                })?;
                round.declare(seat, DeclarationKind::Bela, cards)?;
                None
            }
            GameAction::PlayCard { card } => Some(round.play_card(seat, card, source)?),
        };

        let mut outcome = ApplyOutcome::default();
        let Some(play) = play_outcome else {
            return Ok(outcome);
        };
        outcome.trick_completed = play.trick_completed;
        let Some(settlement) = play.settlement else {
            return Ok(outcome);
        };

        let summary = self.record_settlement(settlement)?;
        outcome.game_finished = match self.status {
            GameStatus::Finished { winner } => Some(winner),
            _ => None,
        };
        outcome.round_completed = Some(summary);
        if outcome.game_finished.is_none() {
            self.deal_next_round()?;
        }
        Ok(outcome)
    }

    /// Fold a settlement into the match scores and check the win
    /// condition. The check only runs here, at the round boundary; higher
    /// of the two totals wins when both cross in the same round.
    fn record_settlement(&mut self, settlement: Settlement) -> Result<RoundSummary, DomainError> {
        let round = self
            .round
            .as_ref()
            .ok_or_else(|| DomainError::validation("no round to settle"))?;
        let trump = round
            .trump
            .ok_or_else(|| DomainError::validation("settled round without trump"))?;
        let calling_team = round
            .calling_team
            .ok_or_else(|| DomainError::validation("settled round without caller"))?;
        let dealer = round.dealer;

        self.scores[0] += settlement.points[0] as u32;
        self.scores[1] += settlement.points[1] as u32;

        let target = self.config.target_score;
        let winner = if self.scores[0] >= target || self.scores[1] >= target {
            if self.scores[0] == self.scores[1] {
                // Dead tie at or above target: play on.
                None
            } else if self.scores[0] > self.scores[1] {
                Some(Team::A)
            } else {
                Some(Team::B)
            }
        } else {
            None
        };
        if let Some(winner) = winner {
            self.status = GameStatus::Finished { winner };
        }

        let summary = RoundSummary {
            round_no: self.round_no,
            dealer,
            trump,
            calling_team,
            settlement,
            scores_after: self.scores,
        };
        self.history.push(summary.clone());
        Ok(summary)
    }

    /// Default action for a seat whose turn deadline expired: pass in the
    /// open rotation, call the most-held suit when forced, play the
    /// weakest legal card in trick play.
    pub fn timeout_action(&self, seat: Seat) -> Option<GameAction> {
        let round = self.round()?;
        if round.seat_to_act() != Some(seat) {
            return None;
        }
        match round.phase {
            super::state::RoundPhase::TrumpCalling => {
                if round.rotation.dealer_is_forced() {
                    Some(GameAction::CallTrump {
                        suit: round.most_held_suit(seat),
                    })
                } else {
                    Some(GameAction::PassTrump)
                }
            }
            super::state::RoundPhase::TrickPlay => round
                .lowest_legal_card(seat)
                .map(|card| GameAction::PlayCard { card }),
            _ => None,
        }
    }
}
