//! Actor-layer behavior: serialized mailboxes, private errors, broadcast
//! fan-out, viewer-scoped snapshots, and the registry.

use std::sync::Arc;

use belot_engine::archive::NullArchive;
use belot_engine::config::EngineConfig;
use belot_engine::domain::game::Game;
use belot_engine::domain::{RoundPhase, Suit};
use belot_engine::errors::DomainError;
use belot_engine::sync::{spawn_game, ClientAction, GameRegistry, ServerMsg};

fn test_handle() -> belot_engine::sync::GameHandle {
    let game = Game::with_seed(EngineConfig::for_tests(), 42);
    spawn_game(game, Arc::new(NullArchive))
}

async fn seated_and_started() -> belot_engine::sync::GameHandle {
    let handle = test_handle();
    for name in ["ana", "bruno", "vesna", "dario"] {
        handle.join(name).await.unwrap();
    }
    handle.start().await.unwrap();
    handle
}

/// Four clients race the same decision point. The mailbox serializes
/// them: exactly one trump call is accepted, the other three seats get
/// private errors, and subscribers see exactly one state change.
#[tokio::test]
async fn simultaneous_actions_serialize_to_one_winner() {
    let handle = seated_and_started().await;
    let mut rx = handle.subscribe();

    let call = |seat| {
        let handle = handle.clone();
        async move {
            handle
                .act(seat, ClientAction::CallTrump { suit: Suit::Hearts })
                .await
        }
    };
    let (r0, r1, r2, r3) = tokio::join!(call(0), call(1), call(2), call(3));
    let results = [r0, r1, r2, r3];

    let accepted = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(accepted, 1, "exactly one call must win the race");
    for r in &results {
        if let Err(err) = r {
            assert!(
                matches!(
                    err,
                    DomainError::OutOfTurn { .. } | DomainError::Validation(_)
                ),
                "losers get turn/phase errors, got {err:?}"
            );
        }
    }

    // One accepted action, one broadcast snapshot.
    let mut snapshots = 0;
    while let Ok(msg) = rx.try_recv() {
        if let ServerMsg::Snapshot { snapshot } = msg {
            snapshots += 1;
            assert_eq!(snapshot.phase, Some(RoundPhase::TrickPlay));
            assert_eq!(snapshot.trump, Some(Suit::Hearts));
        }
    }
    assert_eq!(snapshots, 1);
}

/// Broadcast snapshots expose hand sizes only; a targeted snapshot fills
/// in the requesting seat's hand. This is the reconnect path.
#[tokio::test]
async fn reconnect_snapshot_reveals_only_own_hand() {
    let handle = seated_and_started().await;
    let mut rx = handle.subscribe();

    // A fresh targeted snapshot at any time, no action needed.
    let mine = handle.snapshot(Some(2)).await.unwrap();
    assert_eq!(mine.your_hand.as_ref().map(Vec::len), Some(8));
    assert_eq!(mine.hand_sizes, [8, 8, 8, 8]);

    // Trigger a broadcast and verify it hides everything.
    let to_act = mine.turn.unwrap();
    handle.act(to_act, ClientAction::PassTrump).await.unwrap();
    let msg = rx.recv().await.unwrap();
    let ServerMsg::Snapshot { snapshot } = msg else {
        panic!("expected snapshot, got {msg:?}");
    };
    assert_eq!(snapshot.your_hand, None);
    assert_eq!(snapshot.hand_sizes, [8, 8, 8, 8]);
}

/// Rejected actions leave no trace: no broadcast, no state change.
#[tokio::test]
async fn rejected_actions_are_private_and_stateless() {
    let handle = seated_and_started().await;
    let before = handle.snapshot(None).await.unwrap();
    let wrong_seat = (before.turn.unwrap() + 1) % 4;

    let mut rx = handle.subscribe();
    let err = handle
        .act(wrong_seat, ClientAction::PassTrump)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::OutOfTurn { .. }));

    assert!(rx.try_recv().is_err(), "no broadcast for a rejected action");
    let after = handle.snapshot(None).await.unwrap();
    assert_eq!(after, before);
}

#[tokio::test]
async fn joins_respect_capacity_and_broadcast() {
    let handle = test_handle();
    for name in ["ana", "bruno", "vesna", "dario"] {
        handle.join(name).await.unwrap();
    }
    let err = handle.join("emil").await.unwrap_err();
    assert!(matches!(err, DomainError::GameFull));

    let snap = handle.snapshot(None).await.unwrap();
    assert_eq!(snap.round_no, 0);
}

#[tokio::test]
async fn registry_tracks_live_games() {
    let registry = GameRegistry::new(EngineConfig::for_tests(), Arc::new(NullArchive));
    assert!(registry.is_empty());

    let handle = registry.create_game();
    let id = handle.game_id();
    assert_eq!(registry.len(), 1);

    let fetched = registry.get(id).unwrap();
    assert_eq!(fetched.game_id(), id);
    fetched.join("ana").await.unwrap();

    registry.remove(id).unwrap();
    assert!(matches!(
        registry.get(id).unwrap_err(),
        DomainError::GameNotFound(_)
    ));
    assert!(matches!(
        registry.remove(id).unwrap_err(),
        DomainError::GameNotFound(_)
    ));

    // Existing handles keep working after removal.
    handle.join("bruno").await.unwrap();
}
