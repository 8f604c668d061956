//! Declaration validation, ranking, and hand scanning.
//!
//! Declarations are claimed before a seat's first card of the round and
//! only the highest-ranked side's declarations score; ties between equal
//! declarations go to the seat closest to the dealer's left.

use serde::{Deserialize, Serialize};

use super::cards_types::{Card, Rank, Suit};
use super::state::{distance_from_dealers_left, Seat};
use crate::errors::domain::DomainError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Bela,
    FourJacks,
    FourNines,
    FourAces,
    FourTens,
    FourKings,
    FourQueens,
    #[serde(rename = "sequence_3")]
    SequenceThree,
    #[serde(rename = "sequence_4")]
    SequenceFour,
    #[serde(rename = "sequence_5_plus")]
    SequenceFivePlus,
    Belot,
}

impl DeclarationKind {
    /// Points credited when the declaration scores. The eight-card belot
    /// is valued at the full match target so it wins the round and the
    /// match outright through the ordinary settlement path.
    pub fn points(self) -> u16 {
        match self {
            DeclarationKind::Bela => 20,
            DeclarationKind::FourJacks => 200,
            DeclarationKind::FourNines => 150,
            DeclarationKind::FourAces
            | DeclarationKind::FourTens
            | DeclarationKind::FourKings
            | DeclarationKind::FourQueens => 100,
            DeclarationKind::SequenceThree => 20,
            DeclarationKind::SequenceFour => 50,
            DeclarationKind::SequenceFivePlus => 100,
            DeclarationKind::Belot => 1001,
        }
    }

    fn four_of(self) -> Option<Rank> {
        match self {
            DeclarationKind::FourJacks => Some(Rank::Jack),
            DeclarationKind::FourNines => Some(Rank::Nine),
            DeclarationKind::FourAces => Some(Rank::Ace),
            DeclarationKind::FourTens => Some(Rank::Ten),
            DeclarationKind::FourKings => Some(Rank::King),
            DeclarationKind::FourQueens => Some(Rank::Queen),
            _ => None,
        }
    }

    fn sequence_len(self) -> Option<(usize, usize)> {
        match self {
            DeclarationKind::SequenceThree => Some((3, 3)),
            DeclarationKind::SequenceFour => Some((4, 4)),
            DeclarationKind::SequenceFivePlus => Some((5, 7)),
            DeclarationKind::Belot => Some((8, 8)),
            _ => None,
        }
    }
}

/// A validated declaration as it entered the round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub seat: Seat,
    pub cards: Vec<Card>,
}

fn is_consecutive_run(cards: &[Card]) -> bool {
    let suit = cards[0].suit;
    if !cards.iter().all(|c| c.suit == suit) {
        return false;
    }
    let mut idx: Vec<u8> = cards.iter().map(|c| c.rank.sequence_index()).collect();
    idx.sort_unstable();
    idx.windows(2).all(|w| w[1] == w[0] + 1)
}

/// Structural validation of a claimed declaration against the cards put
/// forward. Hand-membership and timing checks live in the round layer.
pub fn validate(kind: DeclarationKind, cards: &[Card], trump: Suit) -> Result<(), DomainError> {
    let distinct = {
        let mut sorted = cards.to_vec();
        sorted.sort();
        sorted.dedup();
        sorted.len() == cards.len()
    };
    if !distinct {
        return Err(DomainError::illegal_declaration("duplicate cards"));
    }

    if kind == DeclarationKind::Bela {
        if cards.len() != 2 {
            return Err(DomainError::illegal_declaration(
                "bela is exactly the king and queen",
            ));
        }
        let has = |rank: Rank| cards.iter().any(|c| c.rank == rank && c.suit == trump);
        if !(has(Rank::King) && has(Rank::Queen)) {
            return Err(DomainError::illegal_declaration(
                "bela requires the king and queen of trump",
            ));
        }
        return Ok(());
    }

    if let Some(rank) = kind.four_of() {
        if cards.len() != 4
            || !cards.iter().all(|c| c.rank == rank)
            || !Suit::ALL.iter().all(|&s| cards.iter().any(|c| c.suit == s))
        {
            return Err(DomainError::illegal_declaration(format!(
                "four of a kind requires all four {rank:?}s"
            )));
        }
        return Ok(());
    }

    // Remaining kinds are all sequences.
    let (min, max) = match kind.sequence_len() {
        Some(bounds) => bounds,
        None => {
            return Err(DomainError::illegal_declaration(format!(
                "{kind:?} is not claimable"
            )))
        }
    };
    if cards.len() < min || cards.len() > max {
        return Err(DomainError::illegal_declaration(format!(
            "sequence of {} cards does not match {kind:?}",
            cards.len()
        )));
    }
    if !is_consecutive_run(cards) {
        return Err(DomainError::illegal_declaration(
            "sequence cards must be consecutive in one suit",
        ));
    }
    Ok(())
}

/// Ordering for the round-wide ranking: higher value wins; between equal
/// values the seat closer to the dealer's left wins. Bela never enters
/// this ranking.
pub fn stronger_than(a: &Declaration, b: &Declaration, dealer: Seat) -> bool {
    match a.kind.points().cmp(&b.kind.points()) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => {
            distance_from_dealers_left(a.seat, dealer) < distance_from_dealers_left(b.seat, dealer)
        }
    }
}

/// Enumerate every declaration present in a dealt hand: the belot, fours
/// of a kind, maximal sequences, and bela when trump is known. Used for
/// client hints and for timeout defaults; players still claim explicitly.
pub fn scan_declarations(hand: &[Card], trump: Suit) -> Vec<(DeclarationKind, Vec<Card>)> {
    let mut found = Vec::new();

    // Maximal consecutive runs per suit.
    for suit in Suit::ALL {
        let mut in_suit: Vec<Card> = hand.iter().copied().filter(|c| c.suit == suit).collect();
        in_suit.sort_by_key(|c| c.rank.sequence_index());
        let mut run: Vec<Card> = Vec::new();
        let flush = |run: &mut Vec<Card>, found: &mut Vec<(DeclarationKind, Vec<Card>)>| {
            let kind = match run.len() {
                0..=2 => None,
                3 => Some(DeclarationKind::SequenceThree),
                4 => Some(DeclarationKind::SequenceFour),
                5..=7 => Some(DeclarationKind::SequenceFivePlus),
                _ => Some(DeclarationKind::Belot),
            };
            if let Some(kind) = kind {
                found.push((kind, std::mem::take(run)));
            } else {
                run.clear();
            }
        };
        for card in in_suit {
            match run.last() {
                Some(prev) if card.rank.sequence_index() == prev.rank.sequence_index() + 1 => {
                    run.push(card)
                }
                Some(_) => {
                    flush(&mut run, &mut found);
                    run.push(card);
                }
                None => run.push(card),
            }
        }
        flush(&mut run, &mut found);
    }

    for (kind, rank) in [
        (DeclarationKind::FourJacks, Rank::Jack),
        (DeclarationKind::FourNines, Rank::Nine),
        (DeclarationKind::FourAces, Rank::Ace),
        (DeclarationKind::FourTens, Rank::Ten),
        (DeclarationKind::FourKings, Rank::King),
        (DeclarationKind::FourQueens, Rank::Queen),
    ] {
        let cards: Vec<Card> = hand.iter().copied().filter(|c| c.rank == rank).collect();
        if cards.len() == 4 {
            found.push((kind, cards));
        }
    }

    let bela: Vec<Card> = hand
        .iter()
        .copied()
        .filter(|c| c.suit == trump && (c.rank == Rank::King || c.rank == Rank::Queen))
        .collect();
    if bela.len() == 2 {
        found.push((DeclarationKind::Bela, bela));
    }

    found
}
