//! Legal-move computation and trick-winner determination.
//!
//! Pure functions over hands and in-progress tricks; all state mutation
//! lives in the round layer.

use super::cards_types::{hand_has_suit, plain_strength, trump_strength, Card, Suit};
use super::state::{Play, Seat};
use crate::errors::domain::DomainError;

/// Comparable strength of a card within one trick. Trump cards outrank
/// every lead-suit card; off-suit non-trump cards can never win.
pub fn trick_strength(card: Card, lead: Suit, trump: Suit) -> i16 {
    if card.suit == trump {
        100 + trump_strength(card.rank) as i16
    } else if card.suit == lead {
        plain_strength(card.rank) as i16
    } else {
        -1
    }
}

fn best_lead_strength(trick: &[Play], lead: Suit, trump: Suit) -> i16 {
    trick
        .iter()
        .map(|p| trick_strength(p.card, lead, trump))
        .max()
        .unwrap_or(-1)
}

fn trump_in_trick(trick: &[Play], trump: Suit) -> bool {
    trick.iter().any(|p| p.card.suit == trump)
}

/// Compute the set of cards the holder of `hand` may legally play into
/// `trick`. An empty trick allows any held card. Otherwise:
///
/// - holding the lead suit restricts to lead-suit cards, and while no trump
///   has been played in the trick, to lead-suit cards that beat the current
///   best lead-suit card if any such card is held ("über");
/// - void in the lead suit but holding trump forces a trump, unless a trump
///   has already been played in the trick;
/// - otherwise any held card.
pub fn legal_moves(hand: &[Card], trick: &[Play], trump: Suit) -> Vec<Card> {
    if trick.is_empty() {
        return hand.to_vec();
    }

    let lead = trick[0].card.suit;
    let trumped = trump_in_trick(trick, trump);

    if hand_has_suit(hand, lead) {
        let lead_cards: Vec<Card> = hand.iter().copied().filter(|c| c.suit == lead).collect();
        if trumped {
            return lead_cards;
        }
        let best = best_lead_strength(trick, lead, trump);
        let higher: Vec<Card> = lead_cards
            .iter()
            .copied()
            .filter(|&c| trick_strength(c, lead, trump) > best)
            .collect();
        if higher.is_empty() {
            lead_cards
        } else {
            higher
        }
    } else if hand_has_suit(hand, trump) && !trumped {
        hand.iter().copied().filter(|c| c.suit == trump).collect()
    } else {
        hand.to_vec()
    }
}

/// Validate one submitted card against `legal_moves`, returning the rule
/// that was violated. Never mutates anything.
pub fn check_move(hand: &[Card], trick: &[Play], trump: Suit, card: Card) -> Result<(), DomainError> {
    if !hand.contains(&card) {
        return Err(DomainError::illegal_move(format!(
            "card {card} is not in hand"
        )));
    }
    let legal = legal_moves(hand, trick, trump);
    if legal.contains(&card) {
        return Ok(());
    }

    // Reconstruct which constraint bit: follow-suit, über, or trump-forcing.
    let lead = trick[0].card.suit;
    let reason = if hand_has_suit(hand, lead) {
        if card.suit != lead {
            format!("must follow the lead suit {lead:?}")
        } else {
            "must beat the highest lead-suit card in the trick".to_string()
        }
    } else {
        "must play a trump when void in the lead suit".to_string()
    };
    Err(DomainError::illegal_move(reason))
}

/// Winner of a completed trick: the highest trump if any trump was played,
/// otherwise the highest lead-suit card. Returns None for an incomplete
/// trick.
pub fn trick_winner(trick: &[Play], trump: Suit) -> Option<Seat> {
    if trick.len() < 4 {
        return None;
    }
    let lead = trick[0].card.suit;
    trick
        .iter()
        .max_by_key(|p| trick_strength(p.card, lead, trump))
        .map(|p| p.seat)
}
