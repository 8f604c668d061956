//! Seats, teams, phases, and rotation math shared by the round and game
//! layers.

use serde::{Deserialize, Serialize};

use super::cards_types::Card;

/// Table position, 0..=3, clockwise.
pub type Seat = u8;

pub const SEATS: u8 = 4;

/// Seats 0/2 form team A, seats 1/3 team B. The random element of the
/// 2-vs-2 split lives in the game coordinator, which shuffles players onto
/// seats at start; partners always sit opposite.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn of_seat(seat: Seat) -> Team {
        if seat % 2 == 0 {
            Team::A
        } else {
            Team::B
        }
    }

    pub fn opponent(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Team::A => 0,
            Team::B => 1,
        }
    }
}

/// Linear lifecycle of one deal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    Dealing,
    TrumpCalling,
    TrickPlay,
    Settlement,
    Complete,
}

/// Where an accepted action originated. Timeout-injected defaults are
/// recorded with a distinct tag for audit; they are not errors.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionSource {
    Player,
    Timeout,
}

/// One card placed into a trick.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
    pub source: ActionSource,
}

/// Explicit trump-calling rotation state: who is to act and how many seats
/// have passed so far. Replaces the original's accumulating call-order list.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TrumpRotation {
    pub to_act: Seat,
    pub passes: u8,
}

impl TrumpRotation {
    pub fn starting_left_of(dealer: Seat) -> Self {
        Self {
            to_act: next_seat(dealer),
            passes: 0,
        }
    }

    /// Whether the seat to act is the dealer in the forced slot: after
    /// three passes the dealer cannot pass.
    pub fn dealer_is_forced(&self) -> bool {
        self.passes == 3
    }
}

/// Seat / turn math (4 fixed seats, clockwise is +1).
#[inline]
pub fn seat_offset(seat: Seat, delta: i8) -> Seat {
    let seat_i = seat as i16;
    let delta_i = delta as i16;
    (seat_i + delta_i).rem_euclid(SEATS as i16) as Seat
}

/// Next seat clockwise (0 → 1 → 2 → 3 → 0).
#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    seat_offset(seat, 1)
}

/// The seat that opens both trump calling and the first trick.
#[inline]
pub fn left_of_dealer(dealer: Seat) -> Seat {
    next_seat(dealer)
}

/// Dealer seat for a 1-based round number, rotating clockwise from the
/// starting dealer each round.
#[inline]
pub fn dealer_for_round(starting_dealer: Seat, round_no: u32) -> Seat {
    debug_assert!(round_no >= 1, "round_no is 1-based");
    seat_offset(starting_dealer, ((round_no - 1) % 4) as i8)
}

/// Clockwise distance from the seat left of the dealer; 0 is closest.
/// Breaks declaration-ranking ties.
#[inline]
pub fn distance_from_dealers_left(seat: Seat, dealer: Seat) -> u8 {
    (seat + SEATS - left_of_dealer(dealer)) % SEATS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_math_wraps() {
        assert_eq!(next_seat(3), 0);
        assert_eq!(seat_offset(0, -1), 3);
        assert_eq!(left_of_dealer(2), 3);
    }

    #[test]
    fn dealer_rotates_each_round() {
        assert_eq!(dealer_for_round(2, 1), 2);
        assert_eq!(dealer_for_round(2, 2), 3);
        assert_eq!(dealer_for_round(2, 5), 2);
    }

    #[test]
    fn teams_sit_opposite() {
        assert_eq!(Team::of_seat(0), Team::A);
        assert_eq!(Team::of_seat(2), Team::A);
        assert_eq!(Team::of_seat(1), Team::B);
        assert_eq!(Team::of_seat(3), Team::B);
        assert_eq!(Team::A.opponent(), Team::B);
    }

    #[test]
    fn rotation_forces_dealer_after_three_passes() {
        let mut rot = TrumpRotation::starting_left_of(0);
        assert_eq!(rot.to_act, 1);
        for _ in 0..3 {
            assert!(!rot.dealer_is_forced());
            rot.to_act = next_seat(rot.to_act);
            rot.passes += 1;
        }
        assert_eq!(rot.to_act, 0);
        assert!(rot.dealer_is_forced());
    }

    #[test]
    fn proximity_to_dealers_left() {
        // dealer 0: left is seat 1, so 1 < 2 < 3 < 0
        assert_eq!(distance_from_dealers_left(1, 0), 0);
        assert_eq!(distance_from_dealers_left(2, 0), 1);
        assert_eq!(distance_from_dealers_left(0, 0), 3);
    }
}
