//! Property coverage over random seeds and tricks.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use super::cards_types::{Card, Suit};
use super::deck::{Deck, CARDS_PER_HAND, DEAL_PATTERN, DECK_SIZE, SEATS};
use super::rules;
use super::scoring;
use super::state::{ActionSource, Play, Seat};

fn shuffled_deck(seed: u64) -> Deck {
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    let mut deck = Deck::standard();
    deck.shuffle(&mut rng);
    deck
}

proptest! {
    /// Any shuffle deals four disjoint 8-card hands covering the deck.
    #[test]
    fn deal_always_partitions_the_deck(seed in any::<u64>()) {
        let mut deck = shuffled_deck(seed);
        let hands = deck.deal(SEATS, &DEAL_PATTERN).unwrap();
        let mut all: Vec<Card> = hands.iter().flatten().copied().collect();
        prop_assert_eq!(all.len(), DECK_SIZE);
        for hand in &hands {
            prop_assert_eq!(hand.len(), CARDS_PER_HAND);
        }
        all.sort();
        all.dedup();
        prop_assert_eq!(all.len(), DECK_SIZE);
    }

    /// Card points over the whole deck always total 162 with the
    /// last-trick bonus, whatever the trump suit and trick grouping.
    #[test]
    fn card_points_always_total_162(seed in any::<u64>(), trump_idx in 0usize..4) {
        let trump = Suit::ALL[trump_idx];
        let mut deck = shuffled_deck(seed);
        let hands = deck.deal(SEATS, &DEAL_PATTERN).unwrap();
        let cards: Vec<Card> = hands.into_iter().flatten().collect();
        let mut total = 0u16;
        for (i, trick) in cards.chunks(4).enumerate() {
            total += scoring::trick_points(trick, trump, i == 7);
        }
        prop_assert_eq!(total, scoring::ROUND_BASE_POINTS);
    }

    /// The trick winner actually played the strongest card under the
    /// lead/trump context, and is unique.
    #[test]
    fn trick_winner_holds_the_strongest_card(seed in any::<u64>(), trump_idx in 0usize..4) {
        let trump = Suit::ALL[trump_idx];
        let mut deck = shuffled_deck(seed);
        let mut trick: Vec<Play> = Vec::new();
        for seat in 0..4 {
            trick.push(Play {
                seat: seat as Seat,
                card: deck.draw().unwrap(),
                source: ActionSource::Player,
            });
        }
        let winner = rules::trick_winner(&trick, trump).unwrap();
        let lead = trick[0].card.suit;
        let winning = trick.iter().find(|p| p.seat == winner).unwrap();
        let best = rules::trick_strength(winning.card, lead, trump);
        for p in &trick {
            if p.seat != winner {
                prop_assert!(rules::trick_strength(p.card, lead, trump) < best);
            }
        }
    }

    /// Whatever the hand and trick, the legal-move set is never empty and
    /// is always a subset of the hand.
    #[test]
    fn legal_moves_nonempty_subset_of_hand(seed in any::<u64>(), trump_idx in 0usize..4) {
        let trump = Suit::ALL[trump_idx];
        let mut deck = shuffled_deck(seed);
        let mut trick: Vec<Play> = Vec::new();
        for seat in 0..3 {
            trick.push(Play {
                seat: seat as Seat,
                card: deck.draw().unwrap(),
                source: ActionSource::Player,
            });
        }
        let mut hand = Vec::new();
        for _ in 0..8 {
            hand.push(deck.draw().unwrap());
        }
        let legal = rules::legal_moves(&hand, &trick, trump);
        prop_assert!(!legal.is_empty());
        for card in &legal {
            prop_assert!(hand.contains(card));
        }
    }
}
