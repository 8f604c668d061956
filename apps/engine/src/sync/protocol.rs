//! Wire messages between clients and a game actor. JSON, snapshot-driven:
//! the server never sends deltas, only fresh viewer-scoped snapshots.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::{Card, Suit};
use crate::domain::declarations::DeclarationKind;
use crate::domain::game::GameAction;
use crate::domain::snapshot::GameSnapshot;
use crate::errors::domain::DomainError;

/// Action payloads as clients submit them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientAction {
    CallTrump { suit: Suit },
    PassTrump,
    Declare { kind: DeclarationKind, cards: Vec<Card> },
    /// Announce bela without listing the cards; the engine resolves the
    /// trump king and queen from the seat's hand.
    Bela,
    PlayCard { card: Card },
}

impl From<ClientAction> for GameAction {
    fn from(action: ClientAction) -> Self {
        match action {
            ClientAction::CallTrump { suit } => GameAction::CallTrump { suit },
            ClientAction::PassTrump => GameAction::PassTrump,
            ClientAction::Declare { kind, cards } => GameAction::Declare { kind, cards },
            ClientAction::Bela => GameAction::Bela,
            ClientAction::PlayCard { card } => GameAction::PlayCard { card },
        }
    }
}

/// Stable machine-readable error tags for clients.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    IllegalMove,
    OutOfTurn,
    IllegalDeclaration,
    IllegalTrumpCall,
    GameNotFound,
    GameFull,
    Internal,
}

impl From<&DomainError> for ErrorCode {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Validation(_) => ErrorCode::Validation,
            DomainError::IllegalMove { .. } => ErrorCode::IllegalMove,
            DomainError::OutOfTurn { .. } => ErrorCode::OutOfTurn,
            DomainError::IllegalDeclaration { .. } => ErrorCode::IllegalDeclaration,
            DomainError::IllegalTrumpCall { .. } => ErrorCode::IllegalTrumpCall,
            DomainError::GameNotFound(_) => ErrorCode::GameNotFound,
            DomainError::GameFull => ErrorCode::GameFull,
            DomainError::DeckExhausted(_) => ErrorCode::Internal,
        }
    }
}

/// Server-to-client messages. Errors are private to the submitting seat;
/// everything else fans out on the broadcast channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    Snapshot { snapshot: GameSnapshot },
    RoundRestarted { reason: String },
    Error { code: ErrorCode, message: String },
}

impl ServerMsg {
    pub fn error(err: &DomainError) -> Self {
        ServerMsg::Error {
            code: ErrorCode::from(err),
            message: err.to_string(),
        }
    }
}
