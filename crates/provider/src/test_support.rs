// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scriptable in-process workspace manager for provider tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use wsgate_core::{
    PortSpec, WorkspaceMetadata, WorkspacePhase, WorkspaceSpec, WorkspaceStatus,
};
use wsgate_wire::{
    GetWorkspacesRequest, GetWorkspacesResponse, SubscribeRequest, SubscribeResponse,
};

use crate::adapters::{
    ManagerDialer, ManagerError, ManagerHandle, StatusSource, StatusStream, WorkspaceManagerClient,
};

/// Fake workspace manager with a scriptable snapshot, pushable status
/// updates, and injectable dial/snapshot failures.
#[derive(Default)]
pub(crate) struct FakeManager {
    inner: Arc<FakeManagerInner>,
}

#[derive(Default)]
struct FakeManagerInner {
    snapshot: Mutex<Vec<WorkspaceStatus>>,
    snapshot_calls: AtomicUsize,
    snapshot_failures: AtomicUsize,
    dial_calls: AtomicUsize,
    dial_failures: AtomicUsize,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<Result<Option<SubscribeResponse>, ManagerError>>>>,
}

impl FakeManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_snapshot(&self, statuses: Vec<WorkspaceStatus>) {
        *self.inner.snapshot.lock() = statuses;
    }

    pub fn snapshot_calls(&self) -> usize {
        self.inner.snapshot_calls.load(Ordering::SeqCst)
    }

    pub fn dial_calls(&self) -> usize {
        self.inner.dial_calls.load(Ordering::SeqCst)
    }

    /// Make the next `n` dial attempts fail.
    pub fn fail_next_dials(&self, n: usize) {
        self.inner.dial_failures.store(n, Ordering::SeqCst);
    }

    /// Make the next `n` snapshot fetches fail.
    pub fn fail_next_snapshots(&self, n: usize) {
        self.inner.snapshot_failures.store(n, Ordering::SeqCst);
    }

    /// Push one status update to every open subscription.
    pub fn push_status(&self, status: WorkspaceStatus) {
        self.push_update(SubscribeResponse { status: Some(status), log: None });
    }

    pub fn push_update(&self, update: SubscribeResponse) {
        let subscribers = self.inner.subscribers.lock();
        for tx in subscribers.iter() {
            let _ = tx.send(Ok(Some(update.clone())));
        }
    }

    /// End every open subscription as if the manager closed them.
    pub fn close_streams(&self) {
        let mut subscribers = self.inner.subscribers.lock();
        for tx in subscribers.drain(..) {
            let _ = tx.send(Ok(None));
        }
    }

    pub fn dialer(&self) -> Arc<dyn ManagerDialer> {
        Arc::new(FakeDialer { inner: Arc::clone(&self.inner) })
    }

    /// Dial once and return the client, for driving components directly.
    pub async fn client(&self) -> Arc<dyn WorkspaceManagerClient> {
        self.dialer().dial("fake-manager").await.expect("fake dial").client()
    }
}

impl FakeManagerInner {
    /// Consume one scripted failure if any remain.
    fn take_failure(counter: &AtomicUsize) -> bool {
        let mut remaining = counter.load(Ordering::SeqCst);
        while remaining > 0 {
            match counter.compare_exchange(
                remaining,
                remaining - 1,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return true,
                Err(actual) => remaining = actual,
            }
        }
        false
    }
}

struct FakeDialer {
    inner: Arc<FakeManagerInner>,
}

#[async_trait]
impl ManagerDialer for FakeDialer {
    async fn dial(&self, _target: &str) -> Result<ManagerHandle, ManagerError> {
        self.inner.dial_calls.fetch_add(1, Ordering::SeqCst);
        if FakeManagerInner::take_failure(&self.inner.dial_failures) {
            return Err(ManagerError::Connect(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "scripted dial failure",
            )));
        }

        let client = Arc::new(FakeClient { inner: Arc::clone(&self.inner) });
        Ok(ManagerHandle::new(client, CancellationToken::new()))
    }
}

struct FakeClient {
    inner: Arc<FakeManagerInner>,
}

#[async_trait]
impl WorkspaceManagerClient for FakeClient {
    async fn get_workspaces(
        &self,
        _request: GetWorkspacesRequest,
    ) -> Result<GetWorkspacesResponse, ManagerError> {
        self.inner.snapshot_calls.fetch_add(1, Ordering::SeqCst);
        if FakeManagerInner::take_failure(&self.inner.snapshot_failures) {
            return Err(ManagerError::Remote("scripted snapshot failure".to_string()));
        }
        Ok(GetWorkspacesResponse { status: self.inner.snapshot.lock().clone() })
    }

    async fn subscribe(&self, _request: SubscribeRequest) -> Result<StatusStream, ManagerError> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.subscribers.lock().push(tx);
        Ok(StatusStream::new(ChannelStatusSource { rx }))
    }
}

/// Stream source fed from a channel; ends when the sender signals a close
/// or drops.
struct ChannelStatusSource {
    rx: mpsc::UnboundedReceiver<Result<Option<SubscribeResponse>, ManagerError>>,
}

#[async_trait]
impl StatusSource for ChannelStatusSource {
    async fn recv(&mut self) -> Result<Option<SubscribeResponse>, ManagerError> {
        match self.rx.recv().await {
            Some(item) => item,
            None => Ok(None),
        }
    }
}

// --- status builders ---

pub(crate) fn running_status(meta_id: &str, url: &str) -> WorkspaceStatus {
    WorkspaceStatus {
        id: format!("{}-inst", meta_id).into(),
        metadata: WorkspaceMetadata { meta_id: meta_id.into() },
        spec: WorkspaceSpec {
            url: url.to_string(),
            ide_image: "ide:latest".to_string(),
            exposed_ports: vec![],
        },
        phase: WorkspacePhase::Running,
        auth: None,
    }
}

pub(crate) fn status_with_port(
    meta_id: &str,
    url: &str,
    port: u32,
    port_url: &str,
) -> WorkspaceStatus {
    let mut status = running_status(meta_id, url);
    status.spec.exposed_ports = vec![PortSpec { port, url: port_url.to_string() }];
    status
}

pub(crate) fn stopped_status(meta_id: &str) -> WorkspaceStatus {
    let mut status = running_status(meta_id, "https://stopped.example.com/");
    status.phase = WorkspacePhase::Stopped;
    status
}

/// Poll `check` every 10 ms until it holds, panicking after ~2 s.
pub(crate) async fn eventually(check: impl Fn() -> bool, what: &str) {
    for _ in 0..200 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for {}", what);
}
