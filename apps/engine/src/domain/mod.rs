//! Pure rules core: cards, dealing, tricks, scoring, declarations, and the
//! round/game state machines. No I/O, no async, no clocks; everything in
//! here is deterministic given an RNG.

pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod deck;
pub mod declarations;
pub mod game;
pub mod round;
pub mod rules;
pub mod scoring;
pub mod snapshot;
pub mod state;

pub use cards_types::{Card, Rank, Suit};
pub use declarations::{Declaration, DeclarationKind};
pub use game::{Game, GameAction, GameStatus, RoundSummary};
pub use round::{CompletedTrick, Round};
pub use scoring::Settlement;
pub use snapshot::{snapshot_for, GameSnapshot};
pub use state::{ActionSource, Play, RoundPhase, Seat, Team};

#[cfg(test)]
mod tests_flow;
#[cfg(test)]
mod tests_props;
