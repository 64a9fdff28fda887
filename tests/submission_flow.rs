//! Integration tests for the rating submission flow
//!
//! These tests drive the recorder end to end against the in-memory store:
//! accepted submissions, duplicate rejection, clamping at the rating bounds,
//! the audit history, and persistence-failure handling.

mod fixtures;

use fixtures::{init_logging, submission, FlakyStore};
use std::sync::Arc;
use teamatch_rating::error::RatingError;
use teamatch_rating::recorder::RatingRecorder;
use teamatch_rating::store::{DocumentStore, InMemoryDocumentStore};
use teamatch_rating::types::PlayerRatingState;

fn is_error<F>(err: &anyhow::Error, pred: F) -> bool
where
    F: Fn(&RatingError) -> bool,
{
    err.downcast_ref::<RatingError>().map_or(false, pred)
}

#[tokio::test]
async fn test_end_to_end_submission() {
    init_logging();

    let store = Arc::new(InMemoryDocumentStore::new());
    let recorder = RatingRecorder::new(store.clone());

    // Player mid-season: rating 50.0 after three rated matches
    store
        .set(
            "users",
            "striker",
            serde_json::to_value(PlayerRatingState {
                rating: 50.0,
                match_count: 3,
            })
            .unwrap()
            .as_object()
            .unwrap()
            .clone(),
        )
        .await
        .unwrap();

    let scores = vec![8.0, 8.0, 8.0, 8.0, 8.0, 9.0, 8.0, 8.0, 9.0, 10.0];
    let record = recorder
        .submit(submission("derby", "keeper", "striker", scores.clone()))
        .await
        .unwrap();

    assert_eq!(record.old_rating, 50.0);
    assert_eq!(record.new_rating, 53.0);
    assert_eq!(record.answers, scores);

    let state = recorder.player_state("striker").await.unwrap();
    assert_eq!(state.rating, 53.0);
    assert_eq!(state.match_count, 4);

    // One keyed record and one audit copy
    assert!(store
        .get("ratings", "derby_keeper_striker")
        .await
        .unwrap()
        .is_some());
    let history = recorder.history_for_player("striker").await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].new_rating, 53.0);
}

#[tokio::test]
async fn test_duplicate_yields_single_record() {
    init_logging();

    let store = Arc::new(InMemoryDocumentStore::new());
    let recorder = RatingRecorder::new(store.clone());
    recorder.register_player("striker").await.unwrap();

    let first = recorder
        .submit(submission("derby", "keeper", "striker", vec![7.0; 10]))
        .await;
    assert!(first.is_ok());

    let second = recorder
        .submit(submission("derby", "keeper", "striker", vec![7.0; 10]))
        .await;
    assert!(is_error(&second.unwrap_err(), |e| matches!(
        e,
        RatingError::DuplicateSubmission { .. }
    )));

    assert_eq!(store.count("ratings").unwrap(), 1);
    assert_eq!(store.count("player_rating_history").unwrap(), 1);

    let state = recorder.player_state("striker").await.unwrap();
    assert_eq!(state.match_count, 1);
}

#[tokio::test]
async fn test_concurrent_duplicates_accept_exactly_one() {
    init_logging();

    let store = Arc::new(InMemoryDocumentStore::new());
    let recorder = Arc::new(RatingRecorder::new(store.clone()));
    recorder.register_player("striker").await.unwrap();

    let a = {
        let recorder = recorder.clone();
        tokio::spawn(async move {
            recorder
                .submit(submission("derby", "keeper", "striker", vec![9.0; 10]))
                .await
        })
    };
    let b = {
        let recorder = recorder.clone();
        tokio::spawn(async move {
            recorder
                .submit(submission("derby", "keeper", "striker", vec![9.0; 10]))
                .await
        })
    };

    let results = [a.await.unwrap(), b.await.unwrap()];
    let accepted = results.iter().filter(|r| r.is_ok()).count();

    // The conditional create guarantees a single winner even when both
    // submissions pass the fast-path existence check.
    assert_eq!(accepted, 1);
    assert_eq!(store.count("ratings").unwrap(), 1);

    let state = recorder.player_state("striker").await.unwrap();
    assert_eq!(state.match_count, 1);
}

#[tokio::test]
async fn test_clamping_at_both_bounds() {
    init_logging();

    let store = Arc::new(InMemoryDocumentStore::new());
    let recorder = RatingRecorder::new(store.clone());

    for (player, rating, scores, expected) in [
        ("high", 99.0, vec![10.0; 10], 100.0),
        ("low", 1.0, vec![1.0; 10], 0.0),
    ] {
        store
            .set(
                "users",
                player,
                serde_json::to_value(PlayerRatingState {
                    rating,
                    match_count: 0,
                })
                .unwrap()
                .as_object()
                .unwrap()
                .clone(),
            )
            .await
            .unwrap();

        let record = recorder
            .submit(submission("derby", "keeper", player, scores))
            .await
            .unwrap();
        assert_eq!(record.new_rating, expected);
    }
}

#[tokio::test]
async fn test_persistence_failure_surfaces_and_retry_recovers() {
    init_logging();

    let store = FlakyStore::new();
    let recorder = RatingRecorder::new(store.clone());
    recorder.register_player("striker").await.unwrap();

    store.set_fail_writes(true);
    let failed = recorder
        .submit(submission("derby", "keeper", "striker", vec![8.0; 10]))
        .await;
    assert!(is_error(&failed.unwrap_err(), |e| matches!(
        e,
        RatingError::PersistenceFailure { .. }
    )));

    // The write failed before any document landed, so a retry succeeds
    store.set_fail_writes(false);
    let retried = recorder
        .submit(submission("derby", "keeper", "striker", vec![8.0; 10]))
        .await;
    assert!(retried.is_ok());

    assert_eq!(store.inner().count("ratings").unwrap(), 1);
    let state = recorder.player_state("striker").await.unwrap();
    assert_eq!(state.match_count, 1);
}

#[tokio::test]
async fn test_full_match_rating_round() {
    init_logging();

    let store = Arc::new(InMemoryDocumentStore::new());
    let recorder = RatingRecorder::new(store.clone());

    // Two teammates each rate the same player after one match,
    // and the same rater scores a second player.
    for player in ["striker", "winger"] {
        recorder.register_player(player).await.unwrap();
    }

    recorder
        .submit(submission("derby", "keeper", "striker", vec![10.0; 10]))
        .await
        .unwrap();
    recorder
        .submit(submission("derby", "defender", "striker", vec![1.0; 10]))
        .await
        .unwrap();
    recorder
        .submit(submission("derby", "keeper", "winger", vec![5.0; 10]))
        .await
        .unwrap();

    // striker: 50 + 5 - 8 = 47 over two submissions
    let striker = recorder.player_state("striker").await.unwrap();
    assert_eq!(striker.rating, 47.0);
    assert_eq!(striker.match_count, 2);

    // winger: all fives lands in the +1 band
    let winger = recorder.player_state("winger").await.unwrap();
    assert_eq!(winger.rating, 51.0);
    assert_eq!(winger.match_count, 1);

    let history = recorder.history_for_player("striker").await.unwrap();
    assert_eq!(history.len(), 2);
    // Oldest first, chained old -> new ratings
    assert_eq!(history[0].old_rating, 50.0);
    assert_eq!(history[1].old_rating, history[0].new_rating);

    let stats = recorder.stats();
    assert_eq!(stats.accepted, 3);
    assert_eq!(stats.duplicates_rejected, 0);
    assert_eq!(stats.failed, 0);
}
