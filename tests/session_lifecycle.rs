//! Shared-session lifecycle properties.

mod common;

use std::sync::Arc;

use finance_query::config::SessionConfig;
use finance_query::session::{SessionError, SessionManager};

#[tokio::test]
async fn concurrent_acquires_construct_exactly_once() {
    let manager = Arc::new(SessionManager::new(SessionConfig::default()));

    let mut handles = Vec::new();
    for _ in 0..16 {
        let manager = manager.clone();
        handles.push(tokio::spawn(
            async move { manager.acquire().await.unwrap().generation() },
        ));
    }

    for handle in handles {
        assert_eq!(
            handle.await.unwrap(),
            1,
            "every caller must observe the one constructed instance"
        );
    }
    assert!(manager.is_present().await);
}

#[tokio::test]
async fn release_twice_is_a_no_op() {
    let manager = SessionManager::new(SessionConfig::default());
    manager.acquire().await.unwrap();

    manager.release().await;
    assert!(!manager.is_present().await);

    // Second release must neither panic nor change state.
    manager.release().await;
    assert!(!manager.is_present().await);
}

#[tokio::test]
async fn reacquire_after_release_yields_a_fresh_instance() {
    let manager = SessionManager::new(SessionConfig::default());

    let first = manager.acquire().await.unwrap();
    let first_generation = first.generation();
    drop(first);

    manager.release().await;

    let second = manager.acquire().await.unwrap();
    assert_ne!(first_generation, second.generation());
    assert_eq!(second.generation(), 2);
}

#[tokio::test]
async fn released_handle_is_never_served_again() {
    let manager = SessionManager::new(SessionConfig::default());

    let stale = manager.acquire().await.unwrap();
    manager.release().await;

    // The stale clone is still alive here; the manager must hand out a new
    // instance rather than the half-closed one.
    let fresh = manager.acquire().await.unwrap();
    assert_ne!(stale.generation(), fresh.generation());
}

#[tokio::test]
async fn handler_use_between_acquire_and_release_sees_present_client() {
    let upstream = common::start_mock_upstream(r#"{"quotes":[]}"#).await;
    let manager = SessionManager::new(SessionConfig::default());

    let session = manager.acquire().await.unwrap();
    assert!(manager.is_present().await);

    let response = session
        .http()
        .get(format!("http://{upstream}/quotes"))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    drop(session);

    manager.release().await;
    assert!(!manager.is_present().await);
}

#[tokio::test]
async fn failed_construction_leaves_state_absent() {
    let config = SessionConfig {
        user_agent: "finance-query\nnot-a-header".into(),
        ..SessionConfig::default()
    };
    let manager = SessionManager::new(config);

    let err = manager.acquire().await.unwrap_err();
    assert!(matches!(err, SessionError::Initialization(_)));
    assert!(
        !manager.is_present().await,
        "failed construction must leave the slot empty so a retry is possible"
    );

    // A retry with the same broken config fails the same way, still leaving
    // the state absent rather than poisoned.
    assert!(manager.acquire().await.is_err());
    assert!(!manager.is_present().await);
}
