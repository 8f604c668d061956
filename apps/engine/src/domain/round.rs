//! One deal from shuffle to settlement.
//!
//! The round owns the four hands, the trump-calling rotation, the trick in
//! progress, and the per-team tallies. Every mutating operation validates
//! first and only then mutates, so a rejected action leaves the round
//! exactly as it was.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::cards_types::{Card, Rank, Suit};
use super::declarations::{self, Declaration, DeclarationKind};
use super::deck::{Deck, DEAL_PATTERN};
use super::rules;
use super::scoring::{self, Settlement};
use super::state::{
    left_of_dealer, next_seat, ActionSource, Play, RoundPhase, Seat, Team, TrumpRotation, SEATS,
};
use crate::errors::domain::DomainError;

/// A finished trick kept for history and the last-trick display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTrick {
    pub plays: Vec<Play>,
    pub winner: Seat,
    pub points: u16,
}

/// What a successful `play_card` did beyond placing the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOutcome {
    pub trick_completed: bool,
    pub trick_winner: Option<Seat>,
    pub round_completed: bool,
    pub settlement: Option<Settlement>,
}

#[derive(Debug, Clone)]
pub struct Round {
    pub number: u32,
    pub dealer: Seat,
    pub phase: RoundPhase,
    hands: [Vec<Card>; 4],
    pub trump: Option<Suit>,
    pub calling_team: Option<Team>,
    pub rotation: TrumpRotation,
    trick: Vec<Play>,
    pub tricks: Vec<CompletedTrick>,
    pub declarations: Vec<Declaration>,
    has_played: [bool; 4],
    pub turn: Seat,
    trick_points: [u16; 2],
    tricks_won: [u8; 2],
    pub settlement: Option<Settlement>,
}

impl Round {
    /// Shuffle a fresh deck with the supplied RNG and deal it out.
    pub fn deal<R: Rng + ?Sized>(number: u32, dealer: Seat, rng: &mut R) -> Result<Self, DomainError> {
        let mut deck = Deck::standard();
        deck.shuffle(rng);
        Self::with_deck(number, dealer, deck)
    }

    /// Deal from an explicit deck order. Fixture path for tests; `deal`
    /// is the production entry.
    pub fn with_deck(number: u32, dealer: Seat, mut deck: Deck) -> Result<Self, DomainError> {
        let dealt = deck.deal(SEATS as usize, &DEAL_PATTERN)?;
        let mut hands: [Vec<Card>; 4] = Default::default();
        for (i, hand) in dealt.into_iter().enumerate() {
            hands[i] = hand;
        }
        Ok(Self {
            number,
            dealer,
            phase: RoundPhase::TrumpCalling,
            hands,
            trump: None,
            calling_team: None,
            rotation: TrumpRotation::starting_left_of(dealer),
            trick: Vec::new(),
            tricks: Vec::new(),
            declarations: Vec::new(),
            has_played: [false; 4],
            turn: left_of_dealer(dealer),
            trick_points: [0; 2],
            tricks_won: [0; 2],
            settlement: None,
        })
    }

    pub fn hand(&self, seat: Seat) -> &[Card] {
        &self.hands[seat as usize]
    }

    pub fn hand_sizes(&self) -> [u8; 4] {
        [
            self.hands[0].len() as u8,
            self.hands[1].len() as u8,
            self.hands[2].len() as u8,
            self.hands[3].len() as u8,
        ]
    }

    pub fn current_trick(&self) -> &[Play] {
        &self.trick
    }

    pub fn last_trick(&self) -> Option<&CompletedTrick> {
        self.tricks.last()
    }

    /// The seat whose action the round is waiting for, if any.
    pub fn seat_to_act(&self) -> Option<Seat> {
        match self.phase {
            RoundPhase::TrumpCalling => Some(self.rotation.to_act),
            RoundPhase::TrickPlay => Some(self.turn),
            _ => None,
        }
    }

    fn ensure_phase(&self, phase: RoundPhase) -> Result<(), DomainError> {
        if self.phase != phase {
            return Err(DomainError::validation(format!(
                "action not valid in phase {:?}",
                self.phase
            )));
        }
        Ok(())
    }

    /// Claim the trump suit for the seat currently holding the rotation.
    pub fn call_trump(&mut self, seat: Seat, suit: Suit) -> Result<(), DomainError> {
        self.ensure_phase(RoundPhase::TrumpCalling)?;
        if seat != self.rotation.to_act {
            return Err(DomainError::OutOfTurn {
                expected: self.rotation.to_act,
            });
        }
        self.trump = Some(suit);
        self.calling_team = Some(Team::of_seat(seat));
        self.phase = RoundPhase::TrickPlay;
        self.turn = left_of_dealer(self.dealer);
        Ok(())
    }

    /// Decline to call. The dealer's slot after three passes cannot pass.
    pub fn pass_trump(&mut self, seat: Seat) -> Result<(), DomainError> {
        self.ensure_phase(RoundPhase::TrumpCalling)?;
        if seat != self.rotation.to_act {
            return Err(DomainError::OutOfTurn {
                expected: self.rotation.to_act,
            });
        }
        if self.rotation.dealer_is_forced() {
            return Err(DomainError::illegal_trump_call(
                "dealer must call trump after three passes",
            ));
        }
        self.rotation.passes += 1;
        self.rotation.to_act = next_seat(self.rotation.to_act);
        Ok(())
    }

    /// Claim a declaration. Structural validity is checked by the
    /// declarations module; the round adds hand membership and the timing
    /// window (before the seat's first card of the round). Bela further
    /// requires trump to be set.
    pub fn declare(
        &mut self,
        seat: Seat,
        kind: DeclarationKind,
        cards: Vec<Card>,
    ) -> Result<(), DomainError> {
        if self.phase != RoundPhase::TrumpCalling && self.phase != RoundPhase::TrickPlay {
            return Err(DomainError::validation(format!(
                "declarations are closed in phase {:?}",
                self.phase
            )));
        }
        if self.has_played[seat as usize] {
            return Err(DomainError::illegal_declaration(
                "declarations close once the seat has played a card",
            ));
        }
        let trump = match (kind, self.trump) {
            (DeclarationKind::Bela, None) => {
                return Err(DomainError::illegal_declaration(
                    "bela requires trump to be set",
                ))
            }
            (_, Some(trump)) => trump,
            // Trump is irrelevant for everything but bela; any suit does
            // for the structural check.
            (_, None) => Suit::Clubs,
        };
        declarations::validate(kind, &cards, trump)?;
        let hand = &self.hands[seat as usize];
        if !cards.iter().all(|c| hand.contains(c)) {
            return Err(DomainError::illegal_declaration(
                "declared cards must be held",
            ));
        }
        if self
            .declarations
            .iter()
            .any(|d| d.seat == seat && d.kind == kind && d.cards == cards)
        {
            return Err(DomainError::illegal_declaration("already declared"));
        }
        self.declarations.push(Declaration { kind, seat, cards });
        Ok(())
    }

    /// Place one card into the current trick. Checks turn order and move
    /// legality first; on success removes the card from the hand, closes
    /// the trick when it is full, and settles the round after the eighth
    /// trick.
    pub fn play_card(
        &mut self,
        seat: Seat,
        card: Card,
        source: ActionSource,
    ) -> Result<PlayOutcome, DomainError> {
        self.ensure_phase(RoundPhase::TrickPlay)?;
        if seat != self.turn {
            return Err(DomainError::OutOfTurn { expected: self.turn });
        }
        let trump = self
            .trump
            .ok_or_else(|| DomainError::validation("trick play with no trump set"))?;
        rules::check_move(&self.hands[seat as usize], &self.trick, trump, card)?;

        // Validation passed; mutate.
        let hand = &mut self.hands[seat as usize];
        let pos = hand.iter().position(|&c| c == card).ok_or_else(|| {
            DomainError::illegal_move(format!("card {card} is not in hand"))
        })?;
        hand.remove(pos);
        self.has_played[seat as usize] = true;
        self.trick.push(Play { seat, card, source });

        if self.trick.len() < SEATS as usize {
            self.turn = next_seat(self.turn);
            return Ok(PlayOutcome {
                trick_completed: false,
                trick_winner: None,
                round_completed: false,
                settlement: None,
            });
        }

        let winner = rules::trick_winner(&self.trick, trump)
            .ok_or_else(|| DomainError::validation("full trick without a winner"))?;
        let is_last = self.tricks.len() == 7;
        let cards: Vec<Card> = self.trick.iter().map(|p| p.card).collect();
        let points = scoring::trick_points(&cards, trump, is_last);
        let team = Team::of_seat(winner);
        self.trick_points[team.index()] += points;
        self.tricks_won[team.index()] += 1;
        self.tricks.push(CompletedTrick {
            plays: std::mem::take(&mut self.trick),
            winner,
            points,
        });
        self.turn = winner;

        if !is_last {
            return Ok(PlayOutcome {
                trick_completed: true,
                trick_winner: Some(winner),
                round_completed: false,
                settlement: None,
            });
        }

        self.phase = RoundPhase::Settlement;
        let settlement = self.settle()?;
        self.phase = RoundPhase::Complete;
        Ok(PlayOutcome {
            trick_completed: true,
            trick_winner: Some(winner),
            round_completed: true,
            settlement: Some(settlement),
        })
    }

    /// Per-team declaration points under the ranking rule: only the side
    /// holding the single strongest declaration scores, except bela, which
    /// always counts for its team.
    fn declaration_points(&self) -> [u16; 2] {
        let mut points = [0u16; 2];
        let ranked: Vec<&Declaration> = self
            .declarations
            .iter()
            .filter(|d| d.kind != DeclarationKind::Bela)
            .collect();
        if let Some(best) = ranked
            .iter()
            .copied()
            .reduce(|a, b| if declarations::stronger_than(b, a, self.dealer) { b } else { a })
        {
            let winning_team = Team::of_seat(best.seat);
            for d in &ranked {
                if Team::of_seat(d.seat) == winning_team {
                    points[winning_team.index()] += d.kind.points();
                }
            }
        }
        for d in &self.declarations {
            if d.kind == DeclarationKind::Bela {
                points[Team::of_seat(d.seat).index()] += d.kind.points();
            }
        }
        points
    }

    fn settle(&mut self) -> Result<Settlement, DomainError> {
        let calling_team = self
            .calling_team
            .ok_or_else(|| DomainError::validation("settlement with no calling team"))?;
        let settlement = scoring::settle_round(
            self.trick_points,
            self.tricks_won,
            self.declaration_points(),
            calling_team,
        );
        self.settlement = Some(settlement);
        Ok(settlement)
    }

    /// Suit the seat holds the most of. Timeout default for the dealer's
    /// forced call.
    pub fn most_held_suit(&self, seat: Seat) -> Suit {
        let hand = &self.hands[seat as usize];
        Suit::ALL
            .into_iter()
            .max_by_key(|&s| hand.iter().filter(|c| c.suit == s).count())
            .unwrap_or(Suit::Clubs)
    }

    /// Weakest legal card for the seat to act. Timeout default during
    /// trick play.
    pub fn lowest_legal_card(&self, seat: Seat) -> Option<Card> {
        let trump = self.trump?;
        let legal = rules::legal_moves(&self.hands[seat as usize], &self.trick, trump);
        let lead = self.trick.first().map(|p| p.card.suit).unwrap_or(trump);
        legal
            .into_iter()
            .min_by_key(|&c| rules::trick_strength(c, lead, trump))
    }

    /// True when the seat still holds both bela cards of the set trump.
    pub fn bela_cards(&self, seat: Seat) -> Option<Vec<Card>> {
        let trump = self.trump?;
        let hand = &self.hands[seat as usize];
        let bela: Vec<Card> = hand
            .iter()
            .copied()
            .filter(|c| c.suit == trump && (c.rank == Rank::King || c.rank == Rank::Queen))
            .collect();
        (bela.len() == 2).then_some(bela)
    }
}
