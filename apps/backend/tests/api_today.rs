//! Today's deck and review API tests.
//!
//! These tests require a running PostgreSQL database.
//! Set DATABASE_URL environment variable before running.

mod common;

use std::collections::HashSet;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::Value;
use uuid::Uuid;

use common::fixtures;
use common::TestContext;

const DATE: &str = "2024-01-01";

fn card_ids(body: &Value) -> Vec<String> {
    body["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["phrase_id"].as_str().unwrap().to_string())
        .collect()
}

fn session(id: &'static str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-session-id"),
        HeaderValue::from_static(id),
    )
}

/// Test building the deck twice yields the same cards and no duplicate rows.
#[tokio::test]
#[ignore = "requires database"]
async fn test_deck_is_idempotent() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    ctx.seed_phrases(20, "cafe").await;

    let first: Value = server.get("/api/today").add_query_param("date", DATE).await.json();
    let second: Value = server.get("/api/today").add_query_param("date", DATE).await.json();

    assert_eq!(card_ids(&first), card_ids(&second));
    assert_eq!(first["deck_size"], 15);
    assert_eq!(ctx.count("decks").await, 15);

    ctx.cleanup().await;
}

/// Test an existing deck survives later library and settings changes.
#[tokio::test]
#[ignore = "requires database"]
async fn test_deck_is_not_rebuilt_after_changes() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    ctx.seed_phrases(12, "cafe").await;

    let before: Value = server.get("/api/today").add_query_param("date", DATE).await.json();
    assert_eq!(before["deck_size"], 12);

    let body: Value = server
        .post("/api/library/import")
        .text(fixtures::phrase_csv("airport", 20))
        .await
        .json();
    assert_eq!(body["inserted"], 20);
    server
        .put("/api/settings")
        .json(&serde_json::json!({ "daily_n": 30 }))
        .await
        .assert_status_ok();

    let after: Value = server.get("/api/today").add_query_param("date", DATE).await.json();
    assert_eq!(card_ids(&after), card_ids(&before));
    assert_eq!(after["deck_size"], 12);
    assert_eq!(ctx.count("decks").await, 12);

    ctx.cleanup().await;
}

/// Test the deck size follows the clamped target and the library size.
#[tokio::test]
#[ignore = "requires database"]
async fn test_deck_size_is_clamped() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    ctx.seed_phrases(40, "cafe").await;

    server
        .put("/api/settings")
        .json(&serde_json::json!({ "daily_n": 99 }))
        .await
        .assert_status_ok();

    let body: Value = server.get("/api/today").add_query_param("date", DATE).await.json();
    assert_eq!(body["deck_size"], 30);
    assert_eq!(body["target_n"], 30);

    server
        .put("/api/settings")
        .json(&serde_json::json!({ "daily_n": 1 }))
        .await
        .assert_status_ok();

    let body: Value = server
        .get("/api/today")
        .add_query_param("date", "2024-01-02")
        .await
        .json();
    assert_eq!(body["deck_size"], 10);

    ctx.cleanup().await;
}

/// Test a small library puts every phrase in the deck.
#[tokio::test]
#[ignore = "requires database"]
async fn test_small_library_uses_all_phrases() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let ids = ctx.seed_phrases(5, "cafe").await;

    let body: Value = server.get("/api/today").add_query_param("date", DATE).await.json();

    let deck: HashSet<String> = card_ids(&body).into_iter().collect();
    let expected: HashSet<String> = ids.iter().map(|id| id.to_string()).collect();
    assert_eq!(deck, expected);

    ctx.cleanup().await;
}

/// Test unseen phrases fill the deck before learning and known ones.
#[tokio::test]
#[ignore = "requires database"]
async fn test_unseen_phrases_come_first() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let known = ctx.seed_phrases(10, "known").await;
    for id in &known {
        ctx.set_mastery(*id, 2).await;
    }
    let learning = ctx.seed_phrases(3, "learning").await;
    for id in &learning {
        ctx.set_mastery(*id, 1).await;
    }
    ctx.seed_phrases(4, "unseen").await;

    let body: Value = server.get("/api/today").add_query_param("date", DATE).await.json();
    assert_eq!(body["deck_size"], 15);

    let scenes: Vec<String> = body["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["scene"].as_str().unwrap().to_string())
        .collect();
    assert!(scenes[..4].iter().all(|s| s == "unseen"));
    assert!(scenes[4..7].iter().all(|s| s == "learning"));
    assert!(scenes[7..].iter().all(|s| s == "known"));

    ctx.cleanup().await;
}

/// Test an empty library gives an empty deck and actions are not found.
#[tokio::test]
#[ignore = "requires database"]
async fn test_empty_library() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let body: Value = server.get("/api/today").add_query_param("date", DATE).await.json();
    assert_eq!(body["deck_size"], 0);
    assert_eq!(body["completed"], false);
    assert!(body["current"].is_null());

    let response = server
        .post("/api/today/known")
        .add_query_param("date", DATE)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(ctx.count("checkins").await, 0);

    ctx.cleanup().await;
}

/// Test known forces mastery 2 and unknown never lowers it.
#[tokio::test]
#[ignore = "requires database"]
async fn test_review_updates_mastery() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    ctx.seed_phrases(3, "cafe").await;

    let body: Value = server.get("/api/today").add_query_param("date", DATE).await.json();
    let first: Uuid = body["current"]["phrase_id"].as_str().unwrap().parse().unwrap();

    let body: Value = server
        .post("/api/today/known")
        .add_query_param("date", DATE)
        .await
        .json();
    assert_eq!(body["done_n"], 1);
    let second: Uuid = body["current"]["phrase_id"].as_str().unwrap().parse().unwrap();
    assert_ne!(first, second);

    let progress = ctx.db.get_progress(first).await.unwrap().unwrap();
    assert_eq!(progress.mastery, 2);
    assert_eq!(progress.seen_count, 1);
    assert!(progress.last_seen.is_some());

    server
        .post("/api/today/unknown")
        .add_query_param("date", DATE)
        .await
        .assert_status_ok();
    let progress = ctx.db.get_progress(second).await.unwrap().unwrap();
    assert_eq!(progress.mastery, 1);

    // Back on the first card, "unknown" does not lower a known phrase
    server
        .post("/api/today/reset")
        .add_query_param("date", DATE)
        .await
        .assert_status_ok();
    let body: Value = server
        .post("/api/today/unknown")
        .add_query_param("date", DATE)
        .await
        .json();
    assert_eq!(body["done_n"], 2);
    let progress = ctx.db.get_progress(first).await.unwrap().unwrap();
    assert_eq!(progress.mastery, 2);
    assert_eq!(progress.seen_count, 2);

    ctx.cleanup().await;
}

/// Test skip leaves progress alone and blocks completion.
#[tokio::test]
#[ignore = "requires database"]
async fn test_skip_blocks_completion() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    ctx.seed_phrases(2, "cafe").await;

    server.get("/api/today").add_query_param("date", DATE).await.assert_status_ok();

    let body: Value = server
        .post("/api/today/known")
        .add_query_param("date", DATE)
        .await
        .json();
    let skipped: Uuid = body["current"]["phrase_id"].as_str().unwrap().parse().unwrap();

    let body: Value = server
        .post("/api/today/skip")
        .add_query_param("date", DATE)
        .await
        .json();
    assert_eq!(body["done_n"], 1);
    assert_eq!(body["completed"], false);
    assert!(ctx.db.get_progress(skipped).await.unwrap().is_none());

    let completed: bool =
        sqlx::query_scalar("SELECT is_completed FROM checkins WHERE check_date = '2024-01-01'")
            .fetch_one(ctx.db.pool())
            .await
            .unwrap();
    assert!(!completed);

    ctx.cleanup().await;
}

/// Test answering every card completes the day.
#[tokio::test]
#[ignore = "requires database"]
async fn test_all_done_completes_checkin() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    ctx.seed_phrases(12, "cafe").await;

    let body: Value = server.get("/api/today").add_query_param("date", DATE).await.json();
    let size = body["deck_size"].as_u64().unwrap();
    assert_eq!(size, 12);

    let mut last = body;
    for _ in 0..size {
        last = server
            .post("/api/today/known")
            .add_query_param("date", DATE)
            .await
            .json();
    }
    assert_eq!(last["done_n"], size);
    assert_eq!(last["completed"], true);

    let (done_n, completed): (i32, bool) = sqlx::query_as(
        "SELECT done_n, is_completed FROM checkins WHERE check_date = '2024-01-01'",
    )
    .fetch_one(ctx.db.pool())
    .await
    .unwrap();
    assert_eq!(done_n as u64, size);
    assert!(completed);

    ctx.cleanup().await;
}

/// Test sessions keep independent cursors.
#[tokio::test]
#[ignore = "requires database"]
async fn test_sessions_have_separate_cursors() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    ctx.seed_phrases(10, "cafe").await;

    let (name, value) = session("phone");
    let body: Value = server
        .post("/api/today/skip")
        .add_query_param("date", DATE)
        .add_header(name, value)
        .await
        .json();
    assert_eq!(body["cursor"], 1);

    let (name, value) = session("laptop");
    let body: Value = server
        .get("/api/today")
        .add_query_param("date", DATE)
        .add_header(name, value)
        .await
        .json();
    assert_eq!(body["cursor"], 0);

    let (name, value) = session("phone");
    let body: Value = server
        .post("/api/today/reset")
        .add_query_param("date", DATE)
        .add_header(name, value)
        .await
        .json();
    assert_eq!(body["cursor"], 0);

    ctx.cleanup().await;
}
