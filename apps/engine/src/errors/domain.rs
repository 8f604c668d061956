//! Domain-level error type used across the rules core and the sync layer.
//!
//! This type is transport- and storage-agnostic. Gameplay-validation errors
//! are recoverable: they are returned to the submitting seat and leave the
//! game state untouched. `DeckExhausted` is a fatal internal-invariant
//! violation for one game instance; the sync layer reacts by restarting the
//! round, never by crashing the process.

use uuid::Uuid;

use crate::domain::state::Seat;

/// Identifier of a live game instance.
pub type GameId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Malformed or semantically invalid input (wrong phase, bad payload).
    #[error("validation error: {0}")]
    Validation(String),

    /// A submitted card violates follow-suit, trump-forcing, or over-trump.
    #[error("illegal move: {reason}")]
    IllegalMove { reason: String },

    /// Action submitted by a seat that does not hold the turn.
    #[error("out of turn: seat {expected} is to act")]
    OutOfTurn { expected: Seat },

    /// A declaration that fails its structural checks.
    #[error("illegal declaration: {reason}")]
    IllegalDeclaration { reason: String },

    /// Trump call from the wrong rotation slot, or trump already set.
    #[error("illegal trump call: {reason}")]
    IllegalTrumpCall { reason: String },

    /// The deck cannot satisfy a deal pattern. Fatal for the round.
    #[error("deck exhausted: {0}")]
    DeckExhausted(String),

    /// No live game with the given id.
    #[error("game not found: {0}")]
    GameNotFound(GameId),

    /// The game already has four seated players.
    #[error("game is full")]
    GameFull,
}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }

    pub fn illegal_move(reason: impl Into<String>) -> Self {
        Self::IllegalMove {
            reason: reason.into(),
        }
    }

    pub fn illegal_declaration(reason: impl Into<String>) -> Self {
        Self::IllegalDeclaration {
            reason: reason.into(),
        }
    }

    pub fn illegal_trump_call(reason: impl Into<String>) -> Self {
        Self::IllegalTrumpCall {
            reason: reason.into(),
        }
    }

    /// Whether this error is fatal for the round rather than recoverable
    /// per-action feedback.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DomainError::DeckExhausted(_))
    }
}
