// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace info provider: the query surface of the wsgate proxy core.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use wsgate_core::{WorkspaceCoords, WorkspaceId, WorkspaceInfo};

use crate::adapters::{ManagerDialer, ManagerError, TcpDialer};
use crate::cache::WorkspaceInfoCache;
use crate::config::{ConfigError, ProviderConfig};
use crate::refresh::{RefreshCoordinator, RefreshRequest};
use crate::stream::{fetch_snapshot, StreamConsumer};

/// Capacity of the refresh request queue shared by query tasks.
const REFRESH_QUEUE: usize = 10;

/// Workspace information surface consumed by the proxy's request handlers.
#[async_trait]
pub trait WorkspaceInfoProvider: Send + Sync {
    /// Resolve a workspace by id, waiting briefly for an unknown workspace
    /// to appear. Returns `None` once `cancel` fires.
    async fn workspace_info(
        &self,
        cancel: &CancellationToken,
        workspace_id: &WorkspaceId,
    ) -> Option<Arc<WorkspaceInfo>>;

    /// Resolve the workspace coordinates served under a public port.
    fn workspace_coords(&self, public_port: &str) -> Option<WorkspaceCoords>;

    /// Whether the manager connection is live.
    fn ready(&self) -> bool;
}

/// Errors surfaced by [`RemoteWorkspaceInfoProvider::start`].
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("error while connecting to workspace manager: {0}")]
    Connect(#[source] ManagerError),

    #[error("error while retrieving initial state from workspace manager: {0}")]
    InitialSnapshot(#[source] ManagerError),

    #[error("provider already started")]
    AlreadyStarted,
}

/// Readiness flag guarded by its own lock, separate from the index lock.
#[derive(Clone, Default)]
pub(crate) struct ReadyFlag(Arc<Mutex<bool>>);

impl ReadyFlag {
    pub fn get(&self) -> bool {
        *self.0.lock()
    }

    pub fn set(&self, ready: bool) {
        *self.0.lock() = ready;
    }
}

/// Provides cached infos about running workspaces, streamed live from the
/// workspace manager.
pub struct RemoteWorkspaceInfoProvider {
    config: ProviderConfig,
    dialer: Arc<dyn ManagerDialer>,
    cache: Arc<WorkspaceInfoCache>,
    ready: ReadyFlag,
    refresh_tx: mpsc::Sender<RefreshRequest>,
    refresh_rx: Mutex<Option<mpsc::Receiver<RefreshRequest>>>,
    shutdown: CancellationToken,
}

impl std::fmt::Debug for RemoteWorkspaceInfoProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteWorkspaceInfoProvider")
            .field("config", &self.config)
            .field("shutdown", &self.shutdown)
            .finish_non_exhaustive()
    }
}

impl RemoteWorkspaceInfoProvider {
    /// Create a provider with the default TCP dialer. Fails on invalid
    /// configuration.
    pub fn new(config: ProviderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (refresh_tx, refresh_rx) = mpsc::channel(REFRESH_QUEUE);
        Ok(Self {
            config,
            dialer: Arc::new(TcpDialer),
            cache: Arc::new(WorkspaceInfoCache::new()),
            ready: ReadyFlag::default(),
            refresh_tx,
            refresh_rx: Mutex::new(Some(refresh_rx)),
            shutdown: CancellationToken::new(),
        })
    }

    /// Replace the dialer; used by tests and embedders with their own
    /// transport.
    pub fn with_dialer(mut self, dialer: Arc<dyn ManagerDialer>) -> Self {
        self.dialer = dialer;
        self
    }

    /// Connect, load the initial snapshot, and spawn the background tasks.
    ///
    /// Dial and initial-snapshot failures are surfaced; the caller decides
    /// whether to retry or abort. After a successful start the provider
    /// reconnects on its own until [`close`](Self::close).
    pub async fn start(&self) -> Result<(), ProviderError> {
        if self.refresh_rx.lock().is_none() {
            return Err(ProviderError::AlreadyStarted);
        }

        let handle =
            self.dialer.dial(&self.config.ws_manager_addr).await.map_err(ProviderError::Connect)?;

        // fetch the initial state synchronously so a started provider is
        // immediately answerable
        let infos = fetch_snapshot(handle.client().as_ref())
            .await
            .map_err(ProviderError::InitialSnapshot)?;
        self.cache.replace_all(infos);

        // the receiver is only consumed once the connection is up, so a
        // failed start can simply be retried
        let Some(requests_rx) = self.refresh_rx.lock().take() else {
            return Err(ProviderError::AlreadyStarted);
        };

        let (clients_tx, clients_rx) = mpsc::channel(1);

        tokio::spawn(
            RefreshCoordinator {
                interval: self.config.refresh_interval,
                cache: Arc::clone(&self.cache),
                clients_rx,
                requests_rx,
                shutdown: self.shutdown.clone(),
            }
            .run(),
        );

        tokio::spawn(
            StreamConsumer {
                target: self.config.ws_manager_addr.clone(),
                reconnect_interval: self.config.reconnect_interval,
                dialer: Arc::clone(&self.dialer),
                cache: Arc::clone(&self.cache),
                ready: self.ready.clone(),
                clients_tx,
                shutdown: self.shutdown.clone(),
            }
            .run(handle),
        );

        Ok(())
    }

    /// Stop the background tasks and prevent further reconnects.
    pub fn close(&self) {
        self.shutdown.cancel();
    }

    /// Ask the refresh coordinator for a fresh snapshot, wait for the round
    /// to complete, then re-check the index. A completed round that still
    /// does not surface the key yields `None`; this bounds a misser's extra
    /// latency to one refresh interval.
    async fn refresh_and_get(&self, workspace_id: &WorkspaceId) -> Option<Arc<WorkspaceInfo>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.refresh_tx.send(RefreshRequest { reply: reply_tx }).await.is_err() {
            // coordinator gone (shutdown); leave resolution to the other
            // query paths
            return std::future::pending().await;
        }
        let Ok(mut round) = reply_rx.await else {
            return std::future::pending().await;
        };

        // the round is over when its channel closes
        while round.changed().await.is_ok() {}

        self.cache.get(workspace_id)
    }
}

#[async_trait]
impl WorkspaceInfoProvider for RemoteWorkspaceInfoProvider {
    async fn workspace_info(
        &self,
        cancel: &CancellationToken,
        workspace_id: &WorkspaceId,
    ) -> Option<Arc<WorkspaceInfo>> {
        if let Some(info) = self.cache.get(workspace_id) {
            return Some(info);
        }

        // race a waiter on the index against a forced refresh; losing
        // branches are plain futures dropped with the select, so abandoned
        // paths terminate with the query
        tokio::select! {
            info = self.cache.wait_for(cancel.clone(), workspace_id) => info,
            info = self.refresh_and_get(workspace_id) => info,
            _ = cancel.cancelled() => None,
        }
    }

    fn workspace_coords(&self, public_port: &str) -> Option<WorkspaceCoords> {
        self.cache.get_coords_by_public_port(public_port)
    }

    fn ready(&self) -> bool {
        self.ready.get()
    }
}

/// Static provider serving fixed maps; for tests and embedders that know
/// their fleet up front.
#[derive(Debug, Clone, Default)]
pub struct FixedWorkspaceInfoProvider {
    pub infos: HashMap<WorkspaceId, Arc<WorkspaceInfo>>,
    pub coords: HashMap<String, WorkspaceCoords>,
}

#[async_trait]
impl WorkspaceInfoProvider for FixedWorkspaceInfoProvider {
    async fn workspace_info(
        &self,
        _cancel: &CancellationToken,
        workspace_id: &WorkspaceId,
    ) -> Option<Arc<WorkspaceInfo>> {
        self.infos.get(workspace_id).cloned()
    }

    fn workspace_coords(&self, public_port: &str) -> Option<WorkspaceCoords> {
        self.coords.get(public_port).cloned()
    }

    fn ready(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
