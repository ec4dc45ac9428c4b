// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Default TCP transport speaking the wsgate wire protocol.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;
use wsgate_wire::{
    decode, encode, read_message, write_message, GetWorkspacesRequest, GetWorkspacesResponse,
    ProtocolError, Request, Response, SubscribeRequest, SubscribeResponse,
};

use super::{
    ManagerDialer, ManagerError, ManagerHandle, StatusSource, StatusStream,
    WorkspaceManagerClient, RPC_TIMEOUT,
};

/// Dialer for real workspace managers.
pub struct TcpDialer;

#[async_trait]
impl ManagerDialer for TcpDialer {
    async fn dial(&self, target: &str) -> Result<ManagerHandle, ManagerError> {
        let stream = connect(target).await?;
        let closed = CancellationToken::new();
        let client = Arc::new(TcpManagerClient {
            target: target.to_string(),
            primary: Mutex::new(Some(stream)),
            closed: closed.clone(),
        });
        Ok(ManagerHandle::new(client, closed))
    }
}

async fn connect(target: &str) -> Result<TcpStream, ManagerError> {
    match tokio::time::timeout(RPC_TIMEOUT, TcpStream::connect(target)).await {
        Ok(Ok(stream)) => Ok(stream),
        Ok(Err(e)) => Err(ManagerError::Connect(e)),
        Err(_) => Err(ManagerError::Timeout),
    }
}

/// Manager client over TCP.
///
/// The connection established at dial time is consumed by the first
/// `subscribe`; snapshot requests use short-lived connections of their own
/// so they never interleave with pushed updates.
struct TcpManagerClient {
    target: String,
    primary: Mutex<Option<TcpStream>>,
    closed: CancellationToken,
}

#[async_trait]
impl WorkspaceManagerClient for TcpManagerClient {
    async fn get_workspaces(
        &self,
        request: GetWorkspacesRequest,
    ) -> Result<GetWorkspacesResponse, ManagerError> {
        if self.closed.is_cancelled() {
            return Err(ManagerError::Closed);
        }

        let mut stream = connect(&self.target).await?;
        write_message(&mut stream, &encode(&Request::GetWorkspaces(request))?).await?;

        let frame = tokio::select! {
            frame = read_message(&mut stream) => frame?,
            _ = self.closed.cancelled() => return Err(ManagerError::Closed),
        };

        match decode::<Response>(&frame)? {
            Response::Workspaces(response) => Ok(response),
            Response::Error { message } => Err(ManagerError::Remote(message)),
            Response::Update(_) => Err(ManagerError::Unexpected("update outside subscription")),
        }
    }

    async fn subscribe(&self, request: SubscribeRequest) -> Result<StatusStream, ManagerError> {
        if self.closed.is_cancelled() {
            return Err(ManagerError::Closed);
        }

        let taken = self.primary.lock().take();
        let mut stream = match taken {
            Some(stream) => stream,
            None => connect(&self.target).await?,
        };

        write_message(&mut stream, &encode(&Request::Subscribe(request))?).await?;
        Ok(StatusStream::new(TcpStatusSource { stream, closed: self.closed.clone() }))
    }
}

struct TcpStatusSource {
    stream: TcpStream,
    closed: CancellationToken,
}

#[async_trait]
impl StatusSource for TcpStatusSource {
    async fn recv(&mut self) -> Result<Option<SubscribeResponse>, ManagerError> {
        let frame = tokio::select! {
            frame = read_message(&mut self.stream) => frame,
            _ = self.closed.cancelled() => return Err(ManagerError::Closed),
        };

        match frame {
            Ok(payload) => match decode::<Response>(&payload)? {
                Response::Update(update) => Ok(Some(update)),
                Response::Error { message } => Err(ManagerError::Remote(message)),
                Response::Workspaces(_) => {
                    Err(ManagerError::Unexpected("snapshot on subscription stream"))
                }
            },
            Err(ProtocolError::ConnectionClosed) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "tcp_tests.rs"]
mod tests;
