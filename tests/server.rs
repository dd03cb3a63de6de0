//! End-to-end lifecycle tests: bind an ephemeral port, query over HTTP, shut down.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum_server::Handle;
use serde_json::Value;
use tokio::time::timeout;

use hausa_api::config::ConnectFailurePolicy;
use hausa_api::db::{ConnectionStatus, DbError};
use hausa_api::http::run;
use hausa_api::StartupError;

use common::{lifecycle, test_config, TEST_URL};

const START_TIMEOUT: Duration = Duration::from_secs(5);

async fn get_json(client: &reqwest::Client, url: String) -> (u16, Value) {
    let response = client.get(url).send().await.expect("request failed");
    let status = response.status().as_u16();
    (status, response.json().await.expect("invalid json"))
}

#[tokio::test]
async fn test_serves_then_disconnects_on_shutdown() {
    let config = Arc::new(test_config(Some(TEST_URL)));
    let (db, counters) = lifecycle(&config, true);
    let handle = Handle::new();

    let server = tokio::spawn(run(Arc::clone(&config), Arc::clone(&db), handle.clone()));
    let addr = timeout(START_TIMEOUT, handle.listening())
        .await
        .expect("server did not start")
        .expect("server did not bind");

    // Startup finished before the listener was bound
    assert_eq!(db.status(), ConnectionStatus::Connected);
    assert!(db.get_database().is_some());

    let client = reqwest::Client::new();
    let (status, body) = get_json(&client, format!("http://{addr}/api/health")).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get_json(&client, format!("http://{addr}/api/")).await;
    assert_eq!(status, 200);
    assert_eq!(body["documentation"], "/docs");
    drop(client);

    handle.graceful_shutdown(Some(Duration::from_secs(1)));
    server.await.unwrap().unwrap();

    assert_eq!(db.status(), ConnectionStatus::Closed);
    assert!(db.get_database().is_none());
    assert_eq!(counters.connects(), 1);
    assert_eq!(counters.closes(), 1);
}

#[tokio::test]
async fn test_missing_target_never_binds() {
    let config = Arc::new(test_config(None));
    let (db, counters) = lifecycle(&config, true);
    let handle = Handle::new();

    let err = run(Arc::clone(&config), Arc::clone(&db), handle.clone())
        .await
        .unwrap_err();

    assert!(matches!(err, StartupError::Database(DbError::Configuration(_))));
    assert_eq!(counters.connects(), 0);
    assert_eq!(db.status(), ConnectionStatus::Uninitialized);
    assert!(timeout(Duration::from_millis(200), handle.listening()).await.is_err());
}

#[tokio::test]
async fn test_unreachable_database_exits_by_default() {
    let config = Arc::new(test_config(Some(TEST_URL)));
    let (db, counters) = lifecycle(&config, false);
    let handle = Handle::new();

    let err = run(Arc::clone(&config), Arc::clone(&db), handle.clone())
        .await
        .unwrap_err();

    assert!(matches!(err, StartupError::Database(DbError::Connection(_))));
    assert_eq!(counters.connects(), 1);
    assert_eq!(counters.closes(), 0);
    assert!(timeout(Duration::from_millis(200), handle.listening()).await.is_err());
}

#[tokio::test]
async fn test_continue_policy_serves_degraded() {
    let mut config = test_config(Some(TEST_URL));
    config.database.on_connect_failure = ConnectFailurePolicy::Continue;
    let config = Arc::new(config);
    let (db, counters) = lifecycle(&config, false);
    let handle = Handle::new();

    let server = tokio::spawn(run(Arc::clone(&config), Arc::clone(&db), handle.clone()));
    let addr = timeout(START_TIMEOUT, handle.listening())
        .await
        .expect("server did not start")
        .expect("server did not bind");

    let client = reqwest::Client::new();
    let (status, _) = get_json(&client, format!("http://{addr}/api/health")).await;
    assert_eq!(status, 200);

    let (status, body) = get_json(&client, format!("http://{addr}/api/ready")).await;
    assert_eq!(status, 503);
    assert_eq!(body["detail"], "Database unavailable: uninitialized");
    drop(client);

    handle.graceful_shutdown(Some(Duration::from_secs(1)));
    server.await.unwrap().unwrap();

    assert_eq!(db.status(), ConnectionStatus::Uninitialized);
    assert_eq!(counters.closes(), 0);
}

#[tokio::test]
async fn test_continue_policy_still_rejects_bad_config() {
    let mut config = test_config(Some("localhost:27017"));
    config.database.on_connect_failure = ConnectFailurePolicy::Continue;
    let config = Arc::new(config);
    let (db, _) = lifecycle(&config, true);

    let err = run(config, db, Handle::new()).await.unwrap_err();
    assert!(matches!(err, StartupError::Database(DbError::Configuration(_))));
}
