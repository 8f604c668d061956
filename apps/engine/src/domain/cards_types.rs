//! Core card-related types: Card, Rank, Suit, and context-dependent orderings.

/// The four suits. Derived `Ord` gives the stable C < D < H < S order used
/// for sorting hands, nothing else.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
}

/// Ranks of the 32-card Belot deck, declared in natural deck order
/// (7 .. A). The derived `Ord` is the sequence order used for declarations;
/// trick strength goes through [`plain_strength`] / [`trump_strength`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 8] = [
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Position in the natural deck order 7,8,9,10,J,Q,K,A. Sequence
    /// declarations are consecutive runs in this order.
    pub fn sequence_index(self) -> u8 {
        self as u8
    }
}

/// Strength of a rank in a non-trump suit: 7 < 8 < 9 < J < Q < K < 10 < A.
pub fn plain_strength(rank: Rank) -> u8 {
    match rank {
        Rank::Seven => 0,
        Rank::Eight => 1,
        Rank::Nine => 2,
        Rank::Jack => 3,
        Rank::Queen => 4,
        Rank::King => 5,
        Rank::Ten => 6,
        Rank::Ace => 7,
    }
}

/// Strength of a rank in the trump suit: 7 < 8 < Q < K < 10 < A < 9 < J.
pub fn trump_strength(rank: Rank) -> u8 {
    match rank {
        Rank::Seven => 0,
        Rank::Eight => 1,
        Rank::Queen => 2,
        Rank::King => 3,
        Rank::Ten => 4,
        Rank::Ace => 5,
        Rank::Nine => 6,
        Rank::Jack => 7,
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }
}

// Note: Ord/Eq on Card is only for stable sorting: suit order C<D<H<S then
// natural rank order. Do not use for trick resolution or any comparison
// involving trump/lead context.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.rank.cmp(&other.rank),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trump_order_promotes_jack_and_nine() {
        assert!(trump_strength(Rank::Jack) > trump_strength(Rank::Nine));
        assert!(trump_strength(Rank::Nine) > trump_strength(Rank::Ace));
        assert!(trump_strength(Rank::Ace) > trump_strength(Rank::Ten));
        assert!(trump_strength(Rank::Ten) > trump_strength(Rank::King));
    }

    #[test]
    fn plain_order_puts_ten_below_ace_only() {
        assert!(plain_strength(Rank::Ace) > plain_strength(Rank::Ten));
        assert!(plain_strength(Rank::Ten) > plain_strength(Rank::King));
        assert!(plain_strength(Rank::Jack) > plain_strength(Rank::Nine));
    }

    #[test]
    fn sequence_index_is_natural_order() {
        let idx: Vec<u8> = Rank::ALL.iter().map(|r| r.sequence_index()).collect();
        assert_eq!(idx, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn hand_has_suit_checks_membership() {
        let hand = vec![
            Card::new(Rank::Seven, Suit::Clubs),
            Card::new(Rank::Ace, Suit::Diamonds),
        ];
        assert!(hand_has_suit(&hand, Suit::Clubs));
        assert!(!hand_has_suit(&hand, Suit::Hearts));
    }
}
