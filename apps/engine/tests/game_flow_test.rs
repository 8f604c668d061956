//! Full games through the actor: timeout-driven defaults, a recording
//! archive, and a client-driven match to completion.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use belot_engine::archive::{GameArchive, NullArchive};
use belot_engine::config::EngineConfig;
use belot_engine::domain::game::{Game, RoundSummary};
use belot_engine::domain::{rules, ActionSource, GameStatus, RoundPhase, Team};
use belot_engine::errors::domain::GameId;
use belot_engine::sync::{spawn_game, ClientAction, ServerMsg};

#[derive(Default)]
struct RecordingArchive {
    rounds: Mutex<Vec<(GameId, u32)>>,
    games: Mutex<Vec<(GameId, Team)>>,
}

#[async_trait]
impl GameArchive for RecordingArchive {
    async fn record_round(&self, game_id: GameId, summary: &RoundSummary) {
        self.rounds.lock().unwrap().push((game_id, summary.round_no));
    }

    async fn record_game(&self, game_id: GameId, winner: Team, _scores: [u32; 2]) {
        self.games.lock().unwrap().push((game_id, winner));
    }
}

async fn seated(handle: &belot_engine::sync::GameHandle) {
    for name in ["ana", "bruno", "vesna", "dario"] {
        handle.join(name).await.unwrap();
    }
}

/// With a turn deadline configured and nobody acting, the actor injects
/// default actions and the game advances on its own. Injected plays are
/// tagged with their timeout source in the snapshots.
#[tokio::test(start_paused = true)]
async fn turn_deadlines_inject_default_actions() {
    let config = EngineConfig {
        turn_timeout: Some(Duration::from_secs(30)),
        ..EngineConfig::default()
    };
    let game = Game::with_seed(config, 8);
    let handle = spawn_game(game, Arc::new(NullArchive));
    seated(&handle).await;
    let mut rx = handle.subscribe();
    handle.start().await.unwrap();

    // No client ever acts; paused time fast-forwards each deadline.
    let mut saw_timeout_play = false;
    for _ in 0..40 {
        let msg = rx.recv().await.unwrap();
        let ServerMsg::Snapshot { snapshot } = msg else {
            continue;
        };
        if snapshot.phase == Some(RoundPhase::TrickPlay)
            && snapshot
                .current_trick
                .iter()
                .any(|p| p.source == ActionSource::Timeout)
        {
            saw_timeout_play = true;
            break;
        }
    }
    assert!(saw_timeout_play, "deadline expiry should inject plays");
}

/// Clients drive a whole match through the public handle, computing their
/// legal plays from targeted snapshots. The archive sees every settled
/// round and the final result.
#[tokio::test]
async fn clients_play_a_match_to_completion() {
    let config = EngineConfig {
        target_score: 50,
        ..EngineConfig::for_tests()
    };
    let game = Game::with_seed(config, 21);
    let game_id = game.id;
    let archive = Arc::new(RecordingArchive::default());
    let handle = spawn_game(game, Arc::clone(&archive) as Arc<dyn GameArchive>);
    seated(&handle).await;
    handle.start().await.unwrap();

    let mut finished = None;
    for _ in 0..500 {
        let snap = handle.snapshot(None).await.unwrap();
        if let GameStatus::Finished { winner } = snap.status {
            finished = Some((winner, snap.scores));
            break;
        }
        let seat = snap.turn.expect("someone must hold the turn");
        match snap.phase {
            Some(RoundPhase::TrumpCalling) => {
                // Pass around; the forced dealer calls hearts.
                let res = handle.act(seat, ClientAction::PassTrump).await;
                if res.is_err() {
                    handle
                        .act(seat, ClientAction::CallTrump { suit: belot_engine::domain::Suit::Hearts })
                        .await
                        .unwrap();
                }
            }
            Some(RoundPhase::TrickPlay) => {
                let mine = handle.snapshot(Some(seat)).await.unwrap();
                let hand = mine.your_hand.expect("targeted snapshot carries the hand");
                let trump = mine.trump.expect("trump set during trick play");
                let legal = rules::legal_moves(&hand, &mine.current_trick, trump);
                let card = legal[0];
                handle
                    .act(seat, ClientAction::PlayCard { card })
                    .await
                    .unwrap();
            }
            other => panic!("unexpected phase {other:?}"),
        }
    }

    let (winner, scores) = finished.expect("match should finish");
    assert!(scores[winner.index()] >= 50);
    assert!(scores[winner.index()] > scores[winner.opponent().index()]);

    let rounds = archive.rounds.lock().unwrap();
    assert!(!rounds.is_empty());
    assert!(rounds.iter().all(|(id, _)| *id == game_id));
    let games = archive.games.lock().unwrap();
    assert_eq!(games.as_slice(), &[(game_id, winner)]);
}
