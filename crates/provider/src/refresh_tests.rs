// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

use crate::test_support::{running_status, FakeManager};

struct Harness {
    clients_tx: mpsc::Sender<Arc<dyn WorkspaceManagerClient>>,
    requests_tx: mpsc::Sender<RefreshRequest>,
    cache: Arc<WorkspaceInfoCache>,
    shutdown: CancellationToken,
}

fn spawn_coordinator(interval: Duration) -> Harness {
    let cache = Arc::new(WorkspaceInfoCache::new());
    let (clients_tx, clients_rx) = mpsc::channel(1);
    let (requests_tx, requests_rx) = mpsc::channel(10);
    let shutdown = CancellationToken::new();

    tokio::spawn(
        RefreshCoordinator {
            interval,
            cache: Arc::clone(&cache),
            clients_rx,
            requests_rx,
            shutdown: shutdown.clone(),
        }
        .run(),
    );

    Harness { clients_tx, requests_tx, cache, shutdown }
}

impl Harness {
    /// Register one refresh request and wait for its round to complete.
    async fn request_and_wait(&self) {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.requests_tx.send(RefreshRequest { reply: reply_tx }).await.expect("send request");
        let mut round = reply_rx.await.expect("round receiver");
        while round.changed().await.is_ok() {}
    }
}

#[tokio::test]
async fn refresh_fills_cache_from_snapshot() {
    let manager = FakeManager::new();
    manager.set_snapshot(vec![running_status("w1", "https://a/")]);

    let harness = spawn_coordinator(Duration::from_millis(20));
    harness.clients_tx.send(manager.client().await).await.expect("publish client");

    harness.request_and_wait().await;

    assert!(harness.cache.get(&"w1".into()).is_some());
    harness.shutdown.cancel();
}

#[tokio::test]
async fn no_refresh_without_pending_requests() {
    let manager = FakeManager::new();

    let harness = spawn_coordinator(Duration::from_millis(10));
    harness.clients_tx.send(manager.client().await).await.expect("publish client");
    let calls_before = manager.snapshot_calls();

    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(manager.snapshot_calls(), calls_before);
    harness.shutdown.cancel();
}

#[tokio::test]
async fn concurrent_requests_share_one_fetch() {
    let manager = FakeManager::new();
    manager.set_snapshot(vec![running_status("w1", "https://a/")]);

    let harness = spawn_coordinator(Duration::from_millis(30));
    harness.clients_tx.send(manager.client().await).await.expect("publish client");
    let calls_before = manager.snapshot_calls();

    tokio::join!(
        harness.request_and_wait(),
        harness.request_and_wait(),
        harness.request_and_wait(),
    );

    assert_eq!(manager.snapshot_calls(), calls_before + 1);
    harness.shutdown.cancel();
}

#[tokio::test]
async fn failed_refresh_still_completes_round() {
    let manager = FakeManager::new();
    manager.set_snapshot(vec![running_status("w1", "https://a/")]);

    let harness = spawn_coordinator(Duration::from_millis(20));
    harness.clients_tx.send(manager.client().await).await.expect("publish client");

    manager.fail_next_snapshots(1);
    harness.request_and_wait().await;
    // the round completed, the index is untouched
    assert!(harness.cache.get(&"w1".into()).is_none());

    // the next round succeeds and fills the cache
    harness.request_and_wait().await;
    assert!(harness.cache.get(&"w1".into()).is_some());
    harness.shutdown.cancel();
}

#[tokio::test]
async fn coordinator_switches_to_latest_published_client() {
    let first = FakeManager::new();
    first.set_snapshot(vec![running_status("old", "https://old.example.com/")]);
    let second = FakeManager::new();
    second.set_snapshot(vec![running_status("new", "https://new.example.com/")]);

    let harness = spawn_coordinator(Duration::from_millis(20));
    harness.clients_tx.send(first.client().await).await.expect("publish first");
    harness.request_and_wait().await;
    assert!(harness.cache.get(&"old".into()).is_some());

    harness.clients_tx.send(second.client().await).await.expect("publish second");
    // give the coordinator a chance to pick up the handoff
    tokio::time::sleep(Duration::from_millis(10)).await;

    harness.request_and_wait().await;
    assert!(harness.cache.get(&"new".into()).is_some());
    assert!(harness.cache.get(&"old".into()).is_none(), "rebuild replaces old snapshot");
    harness.shutdown.cancel();
}

#[tokio::test]
async fn shutdown_stops_the_coordinator() {
    let manager = FakeManager::new();

    let harness = spawn_coordinator(Duration::from_millis(10));
    harness.clients_tx.send(manager.client().await).await.expect("publish client");

    harness.shutdown.cancel();
    tokio::time::sleep(Duration::from_millis(30)).await;

    // requests after shutdown are never answered with a round
    let (reply_tx, reply_rx) = oneshot::channel();
    let _ = harness.requests_tx.send(RefreshRequest { reply: reply_tx }).await;
    assert!(reply_rx.await.is_err(), "reply channel should be dropped unanswered");
}
