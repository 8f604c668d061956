//! The 32-card deck: shuffle and pattern-based dealing.

use rand::seq::SliceRandom;
use rand::Rng;

use super::cards_types::{Card, Rank, Suit};
use crate::errors::domain::DomainError;

pub const DECK_SIZE: usize = 32;
pub const SEATS: usize = 4;
pub const CARDS_PER_HAND: usize = 8;

/// Group sizes for the traditional Belot deal: three rounds of 3, 3, 2
/// cards to each seat.
pub const DEAL_PATTERN: [usize; 3] = [3, 3, 2];

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The 32 canonical cards in stable suit-then-rank order.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card { suit, rank });
            }
        }
        Self { cards }
    }

    /// Build a deck from an explicit card order. Used for test fixtures;
    /// the caller is responsible for the order being a permutation of the
    /// standard deck.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Uniform Fisher-Yates shuffle. Server-authoritative; not
    /// cryptographically hardened.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Partition the deck into `num_seats` hands following `pattern`:
    /// for each group size, every seat in order receives that many cards.
    /// Fails with `DeckExhausted` if the deck cannot satisfy the request;
    /// that is an internal invariant violation, never expected in play.
    pub fn deal(
        &mut self,
        num_seats: usize,
        pattern: &[usize],
    ) -> Result<Vec<Vec<Card>>, DomainError> {
        let per_seat: usize = pattern.iter().sum();
        let needed = per_seat * num_seats;
        if needed > self.cards.len() {
            return Err(DomainError::DeckExhausted(format!(
                "deal needs {needed} cards, {} remain",
                self.cards.len()
            )));
        }

        let mut hands: Vec<Vec<Card>> = vec![Vec::with_capacity(per_seat); num_seats];
        for &group in pattern {
            for hand in hands.iter_mut() {
                for _ in 0..group {
                    // len checked above
                    let card = self.cards.pop().ok_or_else(|| {
                        DomainError::DeckExhausted("deck drained mid-pattern".to_string())
                    })?;
                    hand.push(card);
                }
            }
        }
        Ok(hands)
    }

    /// Draw a single card. Testing/simulation only.
    pub fn draw(&mut self) -> Result<Card, DomainError> {
        self.cards
            .pop()
            .ok_or_else(|| DomainError::DeckExhausted("draw from empty deck".to_string()))
    }

    /// Return cards to the bottom of the deck. Testing/simulation only.
    pub fn return_cards(&mut self, cards: &[Card]) {
        for &card in cards {
            self.cards.insert(0, card);
        }
    }
}
