//! Concurrent signup tests
//! Exactly one of many simultaneous signups for the same email may succeed.
//!
//! Run with: cargo test --test concurrent_tests

mod common;

use authpad::auth::password::MIN_COST;
use authpad::auth::{Authenticator, PasswordHasher, TokenService, UserStore};
use authpad::config::SecretKey;
use authpad::error::Error;
use common::TestApp;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Instant;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_store_creates_same_email() {
    let store = UserStore::new();
    let mut handles = vec![];

    for i in 0..32 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.create("a@x.com", format!("hash-{}", i)).await
        }));
    }

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(Error::UserAlreadyExists(_)) => conflicts += 1,
            Err(e) => panic!("Unexpected error: {}", e),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 31);
    assert_eq!(store.len().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_signups_same_email() {
    let auth = Arc::new(Authenticator::new(
        UserStore::new(),
        PasswordHasher::new(MIN_COST),
        TokenService::new(&SecretKey::new("concurrent-test-secret")),
        900,
    ));

    let mut handles = vec![];
    for i in 0..16 {
        let auth = auth.clone();
        handles.push(tokio::spawn(async move {
            auth.signup("a@x.com", &format!("password-{}", i)).await
        }));
    }

    let results: Vec<_> = join_handles(handles).await;
    let created = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(Error::UserAlreadyExists(_))))
        .count();

    assert_eq!(created, 1);
    assert_eq!(conflicts, 15);
    assert_eq!(auth.store().len().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_http_signups_same_email() {
    let app = TestApp::spawn().await;
    let start = Instant::now();

    let mut handles = vec![];
    for i in 0..10 {
        let client = app.client.clone();
        let url = format!("{}/signup", app.address);
        handles.push(tokio::spawn(async move {
            client
                .post(&url)
                .json(&serde_json::json!({ "email": "a@x.com", "password": format!("pw-{}", i) }))
                .send()
                .await
                .map(|response| response.status())
        }));
    }

    let mut created = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap().expect("Request failed") {
            StatusCode::CREATED => created += 1,
            StatusCode::BAD_REQUEST => rejected += 1,
            other => panic!("Unexpected status {}", other),
        }
    }

    println!(
        "✓ Completed 10 concurrent signups in {:?} ({} created)",
        start.elapsed(),
        created
    );
    assert_eq!(created, 1);
    assert_eq!(rejected, 9);
    assert_eq!(app.state.auth.store().len().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_signups_distinct_emails() {
    let app = TestApp::spawn().await;

    let mut handles = vec![];
    for i in 0..10 {
        let client = app.client.clone();
        let url = format!("{}/signup", app.address);
        handles.push(tokio::spawn(async move {
            client
                .post(&url)
                .json(&serde_json::json!({ "email": format!("user{}@x.com", i), "password": "pw" }))
                .send()
                .await
                .map(|response| response.status())
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), StatusCode::CREATED);
    }
    assert_eq!(app.state.auth.store().len().await, 10);
}

async fn join_handles<T>(handles: Vec<tokio::task::JoinHandle<T>>) -> Vec<T> {
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.expect("Task panicked"));
    }
    results
}
