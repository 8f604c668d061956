//! Card-point tables and round settlement: last-trick bonus, capot, and
//! the calling team's forfeiture rule.

use serde::{Deserialize, Serialize};

use super::cards_types::{Card, Rank, Suit};
use super::state::Team;

/// Base card points for one round, before declarations: 152 from the cards
/// plus the 10-point last-trick bonus.
pub const ROUND_BASE_POINTS: u16 = 162;

/// Bonus for winning the last trick of a round.
pub const LAST_TRICK_BONUS: u16 = 10;

/// Bonus for taking all eight tricks (capot).
pub const CAPOT_BONUS: u16 = 90;

pub const TRICKS_PER_ROUND: u8 = 8;

/// Point value of a card given the round's trump suit. The jack and nine
/// are promoted in trump; sevens and eights are worthless everywhere, as
/// is the non-trump nine.
pub fn card_point_value(card: Card, trump: Suit) -> u16 {
    if card.suit == trump {
        match card.rank {
            Rank::Jack => 20,
            Rank::Nine => 14,
            Rank::Ace => 11,
            Rank::Ten => 10,
            Rank::King => 4,
            Rank::Queen => 3,
            Rank::Seven | Rank::Eight => 0,
        }
    } else {
        match card.rank {
            Rank::Ace => 11,
            Rank::Ten => 10,
            Rank::King => 4,
            Rank::Queen => 3,
            Rank::Jack => 2,
            Rank::Seven | Rank::Eight | Rank::Nine => 0,
        }
    }
}

/// Sum of card points in one trick, with the last-trick bonus applied when
/// `is_last` is set.
pub fn trick_points(cards: &[Card], trump: Suit, is_last: bool) -> u16 {
    let base: u16 = cards.iter().map(|&c| card_point_value(c, trump)).sum();
    if is_last {
        base + LAST_TRICK_BONUS
    } else {
        base
    }
}

/// Final per-team result of one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Points credited to each team, indexed by [`Team::index`].
    pub points: [u16; 2],
    /// Team whose total is applied against the forfeiture rule.
    pub calling_team: Team,
    /// The calling team failed to strictly exceed the opponents.
    pub forfeited: bool,
    /// A team took all eight tricks.
    pub capot: Option<Team>,
}

/// Settle a finished round. Inputs are each team's accumulated trick
/// points (last-trick bonus included), trick counts, and declaration
/// points. The capot bonus is credited before the forfeiture check, so a
/// capot can rescue a call that card points alone would lose.
pub fn settle_round(
    trick_points: [u16; 2],
    tricks_won: [u8; 2],
    declaration_points: [u16; 2],
    calling_team: Team,
) -> Settlement {
    debug_assert_eq!(
        trick_points[0] + trick_points[1],
        ROUND_BASE_POINTS,
        "trick points must partition the round total"
    );

    let mut totals = [
        trick_points[0] + declaration_points[0],
        trick_points[1] + declaration_points[1],
    ];

    let capot = if tricks_won[0] == TRICKS_PER_ROUND {
        Some(Team::A)
    } else if tricks_won[1] == TRICKS_PER_ROUND {
        Some(Team::B)
    } else {
        None
    };
    if let Some(team) = capot {
        totals[team.index()] += CAPOT_BONUS;
    }

    let caller = calling_team.index();
    let defender = calling_team.opponent().index();
    let forfeited = totals[caller] <= totals[defender];
    if forfeited {
        totals[defender] += totals[caller];
        totals[caller] = 0;
    }

    Settlement {
        points: totals,
        calling_team,
        forfeited,
        capot,
    }
}
