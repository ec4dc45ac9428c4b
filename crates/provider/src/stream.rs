// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stream consumer: owns the manager transport and keeps the index current.
//!
//! A single task driving connect cycles. Each cycle rebuilds the index
//! from a snapshot, subscribes to status updates, hands the fresh client
//! to the refresh coordinator, and applies updates in arrival order until
//! the transport fails.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use wsgate_core::WorkspaceInfo;
use wsgate_wire::{GetWorkspacesRequest, SubscribeRequest};

use crate::adapters::{
    ManagerDialer, ManagerError, ManagerHandle, WorkspaceManagerClient, RPC_TIMEOUT,
};
use crate::cache::WorkspaceInfoCache;
use crate::provider::ReadyFlag;

/// Why a connect cycle ended.
#[derive(Debug, Error)]
enum ListenError {
    #[error("subscription ended")]
    EndOfStream,

    #[error(transparent)]
    Manager(#[from] ManagerError),
}

pub(crate) struct StreamConsumer {
    pub target: String,
    pub reconnect_interval: Duration,
    pub dialer: Arc<dyn ManagerDialer>,
    pub cache: Arc<WorkspaceInfoCache>,
    pub ready: ReadyFlag,
    pub clients_tx: mpsc::Sender<Arc<dyn WorkspaceManagerClient>>,
    pub shutdown: CancellationToken,
}

impl StreamConsumer {
    /// Drive connect cycles until shutdown, starting from the handle
    /// established by the initial dial.
    pub async fn run(self, mut handle: ManagerHandle) {
        loop {
            let end = tokio::select! {
                end = self.listen(&handle) => Some(end),
                _ = self.shutdown.cancelled() => None,
            };

            handle.close();
            self.ready.set(false);

            let Some(end) = end else { return };
            match end {
                ListenError::EndOfStream => {
                    warn!("workspace manager closed the subscription, reconnecting after timeout");
                }
                ListenError::Manager(e) => {
                    warn!(
                        error = %e,
                        "error while streaming workspace status updates, reconnecting after timeout"
                    );
                }
            }

            handle = match self.reconnect().await {
                Some(handle) => handle,
                None => return,
            };
        }
    }

    /// One connect cycle. Only returns once the cycle fails.
    async fn listen(&self, handle: &ManagerHandle) -> ListenError {
        let client = handle.client();

        // rebuild the entire index on (re-)connect
        let infos = match fetch_snapshot(client.as_ref()).await {
            Ok(infos) => infos,
            Err(e) => return e.into(),
        };
        self.cache.replace_all(infos);

        let mut stream = match client.subscribe(SubscribeRequest::default()).await {
            Ok(stream) => stream,
            Err(e) => return e.into(),
        };

        // hand the fresh client to the refresh coordinator, then go live
        let _ = self.clients_tx.send(Arc::clone(&client)).await;
        self.ready.set(true);

        loop {
            let message = match stream.recv().await {
                Ok(Some(message)) => message,
                Ok(None) => return ListenError::EndOfStream,
                Err(e) => return e.into(),
            };

            // some subscription messages carry log output rather than
            // status updates
            let Some(status) = message.status else { continue };

            if status.phase.is_stopped() {
                self.cache.delete(&status.metadata.meta_id);
            } else {
                self.cache.insert(WorkspaceInfo::from(&status));
            }
        }
    }

    /// Sleep-and-dial until a connection is established or shutdown fires.
    async fn reconnect(&self) -> Option<ManagerHandle> {
        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.reconnect_interval) => {}
                _ = self.shutdown.cancelled() => return None,
            }

            match self.dialer.dial(&self.target).await {
                Ok(handle) => return Some(handle),
                Err(e) => {
                    warn!(
                        error = %e,
                        "error while connecting to workspace manager, reconnecting after timeout"
                    );
                }
            }
        }
    }
}

/// Fetch a bounded full snapshot and map it into workspace infos.
pub(crate) async fn fetch_snapshot(
    client: &dyn WorkspaceManagerClient,
) -> Result<Vec<WorkspaceInfo>, ManagerError> {
    let response =
        tokio::time::timeout(RPC_TIMEOUT, client.get_workspaces(GetWorkspacesRequest::default()))
            .await
            .map_err(|_| ManagerError::Timeout)??;

    Ok(response.status.iter().map(WorkspaceInfo::from).collect())
}
