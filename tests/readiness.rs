// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use chainview::readiness::{wait_for, wait_for_all, Dependency, ReadinessError, RetryPolicy};
use tokio::net::TcpListener;

fn fast_policy(max_attempts: usize) -> RetryPolicy {
    RetryPolicy {
        interval: Duration::from_millis(25),
        connect_timeout: Duration::from_millis(250),
        max_attempts,
    }
}

/// Binds a listener on an ephemeral port and returns both.
async fn listen() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

/// Returns a port that was just released, i.e. one that refuses connections.
async fn closed_port() -> u16 {
    let (listener, port) = listen().await;
    drop(listener);
    port
}

#[tokio::test]
async fn already_listening_dependency_is_ready_within_one_interval() {
    let (_listener, port) = listen().await;
    let dependency = Dependency::new("store", "127.0.0.1", port);

    let policy = RetryPolicy {
        interval: Duration::from_millis(250),
        ..fast_policy(10)
    };

    let start = Instant::now();
    wait_for(&dependency, &policy).await.unwrap();

    // The first attempt is made immediately, so a listening dependency must
    // be observed without a single sleep.
    assert!(start.elapsed() < policy.interval);
}

#[tokio::test]
async fn unreachable_dependency_exhausts_the_attempt_budget() {
    let dependency = Dependency::new("store", "127.0.0.1", closed_port().await);

    let policy = fast_policy(3);
    let err = wait_for(&dependency, &policy).await.unwrap_err();

    assert!(matches!(
        err,
        ReadinessError::Unreachable { attempts: 3, .. }
    ));
}

#[tokio::test]
async fn dependency_that_comes_up_late_is_awaited() {
    let port = closed_port().await;
    let dependency = Dependency::new("store", "127.0.0.1", port);

    let policy = fast_policy(40);
    let delay = policy.interval * 5;

    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let listener = TcpListener::bind(("127.0.0.1", port)).await.unwrap();
        let _ = listener.accept().await;
    });

    let start = Instant::now();
    wait_for(&dependency, &policy).await.unwrap();
    assert!(start.elapsed() >= delay);
}

#[tokio::test]
async fn handoff_waits_for_all_dependencies_in_order() {
    // The first dependency only starts listening after five polling
    // intervals; the second is up from the start and records when it first
    // sees a connection attempt.
    let first_port = closed_port().await;
    let (second_listener, second_port) = listen().await;

    let policy = fast_policy(40);
    let delay = policy.interval * 5;

    let first_ready_at = Arc::new(Mutex::new(None::<Instant>));
    let second_probed_at = Arc::new(Mutex::new(None::<Instant>));

    let ready = first_ready_at.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let listener = TcpListener::bind(("127.0.0.1", first_port)).await.unwrap();
        *ready.lock().unwrap() = Some(Instant::now());
        let _ = listener.accept().await;
    });

    let probed = second_probed_at.clone();
    tokio::spawn(async move {
        let _ = second_listener.accept().await;
        *probed.lock().unwrap() = Some(Instant::now());
    });

    let dependencies = vec![
        Dependency::new("mongodb", "127.0.0.1", first_port),
        Dependency::new("redis", "127.0.0.1", second_port),
    ];

    let start = Instant::now();
    wait_for_all(&dependencies, &policy).await.unwrap();

    // No handoff before every dependency was ready.
    assert!(start.elapsed() >= delay);

    // Strict sequencing: the cache must not have been probed before the
    // document store was reachable.
    let first_ready_at = first_ready_at.lock().unwrap().expect("first dependency never came up");
    let second_probed_at = second_probed_at.lock().unwrap().expect("second dependency never probed");
    assert!(second_probed_at >= first_ready_at);
}

#[tokio::test]
async fn failing_dependency_blocks_handoff() {
    let (_listener, ready_port) = listen().await;

    let dependencies = vec![
        Dependency::new("mongodb", "127.0.0.1", ready_port),
        Dependency::new("redis", "127.0.0.1", closed_port().await),
    ];

    let err = wait_for_all(&dependencies, &fast_policy(2)).await.unwrap_err();
    let ReadinessError::Unreachable { name, attempts, .. } = err;
    assert_eq!(name, "redis");
    assert_eq!(attempts, 2);
}
