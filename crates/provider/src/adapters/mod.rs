// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapters for talking to the workspace manager.
//!
//! The dialer and client are trait objects so tests can substitute fakes
//! for the TCP transport.

mod tcp;

pub use tcp::TcpDialer;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use wsgate_wire::{
    GetWorkspacesRequest, GetWorkspacesResponse, ProtocolError, SubscribeRequest, SubscribeResponse,
};

/// Bound on every manager round-trip: dial, initial snapshot, on-demand
/// refresh. Stream receive is deliberately unbounded; the manager pushes
/// sporadically and liveness comes from transport keepalive.
pub const RPC_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from manager transport and protocol handling.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("connect failed: {0}")]
    Connect(#[source] std::io::Error),

    #[error("deadline exceeded")]
    Timeout,

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("manager error: {0}")]
    Remote(String),

    #[error("unexpected response: {0}")]
    Unexpected(&'static str),

    #[error("connection closed")]
    Closed,
}

/// Client surface of the workspace manager RPC.
#[async_trait]
pub trait WorkspaceManagerClient: Send + Sync {
    /// Fetch a full snapshot of current workspace statuses.
    async fn get_workspaces(
        &self,
        request: GetWorkspacesRequest,
    ) -> Result<GetWorkspacesResponse, ManagerError>;

    /// Open the status subscription stream.
    async fn subscribe(&self, request: SubscribeRequest) -> Result<StatusStream, ManagerError>;
}

/// Source feeding a [`StatusStream`]; implemented by transports and fakes.
#[async_trait]
pub trait StatusSource: Send {
    async fn recv(&mut self) -> Result<Option<SubscribeResponse>, ManagerError>;
}

/// Server-push stream of subscription messages.
pub struct StatusStream {
    inner: Box<dyn StatusSource>,
}

impl StatusStream {
    pub fn new(source: impl StatusSource + 'static) -> Self {
        Self { inner: Box::new(source) }
    }

    /// Receive the next message; `Ok(None)` is graceful end-of-stream.
    pub async fn recv(&mut self) -> Result<Option<SubscribeResponse>, ManagerError> {
        self.inner.recv().await
    }
}

/// Dials out to a workspace manager. Must block until the connection is
/// established or [`RPC_TIMEOUT`] expires. Replaceable for testing.
#[async_trait]
pub trait ManagerDialer: Send + Sync {
    async fn dial(&self, target: &str) -> Result<ManagerHandle, ManagerError>;
}

/// An established manager connection: the client plus a close handle.
///
/// Closing cancels every stream opened through the connection; the stream
/// consumer closes each handle exactly once per connect cycle.
pub struct ManagerHandle {
    client: Arc<dyn WorkspaceManagerClient>,
    closed: CancellationToken,
}

impl std::fmt::Debug for ManagerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagerHandle")
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl ManagerHandle {
    pub fn new(client: Arc<dyn WorkspaceManagerClient>, closed: CancellationToken) -> Self {
        Self { client, closed }
    }

    pub fn client(&self) -> Arc<dyn WorkspaceManagerClient> {
        Arc::clone(&self.client)
    }

    pub fn close(&self) {
        self.closed.cancel();
    }
}
