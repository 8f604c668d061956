//! End-to-end round flow over seeded deals: the 162 partition, settlement
//! bookkeeping, and score accumulation across rounds.

use super::game::{Game, GameAction, GameStatus};
use super::scoring::ROUND_BASE_POINTS;
use super::state::ActionSource;
use crate::config::EngineConfig;

fn seeded_game(seed: u64) -> Game {
    let mut game = Game::with_seed(EngineConfig::for_tests(), seed);
    for name in ["ana", "bruno", "vesna", "dario"] {
        game.add_player(name).unwrap();
    }
    game.start_game().unwrap();
    game
}

/// Drive the game with default actions until the current round settles.
/// Returns the settlement totals for that round.
fn play_one_round(game: &mut Game) -> [u16; 2] {
    for _ in 0..64 {
        let seat = game
            .round()
            .and_then(|r| r.seat_to_act())
            .expect("round should be awaiting an action");
        let action = game.timeout_action(seat).expect("default action exists");
        let outcome = game.apply(seat, action, ActionSource::Player).unwrap();
        if let Some(summary) = outcome.round_completed {
            return summary.settlement.points;
        }
        if game.status != GameStatus::InProgress {
            break;
        }
    }
    panic!("round did not complete within the action budget");
}

#[test]
fn every_settled_round_partitions_162_plus_bonuses() {
    for seed in [1u64, 7, 23, 99, 512] {
        let mut game = seeded_game(seed);
        let points = play_one_round(&mut game);
        let total = points[0] + points[1];
        // Base 162, optionally +90 for a capot; no declarations are
        // claimed on the default-action path.
        assert!(
            total == ROUND_BASE_POINTS || total == ROUND_BASE_POINTS + 90,
            "seed {seed}: unexpected round total {total}"
        );
    }
}

#[test]
fn scores_accumulate_monotonically_across_rounds() {
    let mut game = seeded_game(3);
    let mut prev = [0u32; 2];
    for _ in 0..3 {
        if game.status != GameStatus::InProgress {
            break;
        }
        play_one_round(&mut game);
        assert!(game.scores[0] >= prev[0]);
        assert!(game.scores[1] >= prev[1]);
        assert!(game.scores != prev, "a settled round must move the score");
        prev = game.scores;
    }
    assert_eq!(game.history.len() as u32, game.history.last().unwrap().round_no);
}

#[test]
fn identical_seeds_produce_identical_matches() {
    let mut a = seeded_game(77);
    let mut b = seeded_game(77);
    let pa = play_one_round(&mut a);
    let pb = play_one_round(&mut b);
    assert_eq!(pa, pb);
    assert_eq!(a.scores, b.scores);
    assert_eq!(
        a.history.last().unwrap().trump,
        b.history.last().unwrap().trump
    );
}
