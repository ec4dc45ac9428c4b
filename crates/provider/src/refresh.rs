// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Refresh coordinator: coalesces on-demand re-snapshot requests.
//!
//! A single task with no locks. Query callers that miss the index hand
//! over a reply channel and receive the current round's completion
//! receiver; at most one snapshot is fetched per tick, and every caller
//! registered for that round observes the same completion when the round's
//! channel is closed and replaced.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::adapters::WorkspaceManagerClient;
use crate::cache::WorkspaceInfoCache;
use crate::stream::fetch_snapshot;

/// A caller's request to be woken after the next snapshot refresh.
pub(crate) struct RefreshRequest {
    /// Receives the current refresh round; the round is over once the
    /// receiver reports its channel closed.
    pub reply: oneshot::Sender<watch::Receiver<()>>,
}

pub(crate) struct RefreshCoordinator {
    pub interval: Duration,
    pub cache: Arc<WorkspaceInfoCache>,
    pub clients_rx: mpsc::Receiver<Arc<dyn WorkspaceManagerClient>>,
    pub requests_rx: mpsc::Receiver<RefreshRequest>,
    pub shutdown: CancellationToken,
}

impl RefreshCoordinator {
    pub async fn run(mut self) {
        // the stream consumer publishes the first client once connected
        let mut client = tokio::select! {
            client = self.clients_rx.recv() => match client {
                Some(client) => client,
                None => return,
            },
            _ = self.shutdown.cancelled() => return,
        };

        let mut tick = tokio::time::interval(self.interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let (mut round_tx, mut round_rx) = watch::channel(());
        let mut pending = 0usize;

        loop {
            tokio::select! {
                Some(fresh) = self.clients_rx.recv() => {
                    client = fresh;
                }
                Some(request) = self.requests_rx.recv() => {
                    pending += 1;
                    let _ = request.reply.send(round_rx.clone());
                }
                _ = tick.tick() => {
                    if pending == 0 {
                        continue;
                    }

                    info!(pending, "refreshing workspace info from manager");
                    match fetch_snapshot(client.as_ref()).await {
                        Ok(infos) => self.cache.replace_all(infos),
                        Err(e) => warn!(error = %e, "cannot refresh workspace info"),
                    }

                    // complete this round and open the next one; waiters
                    // observe the old channel closing
                    let (fresh_tx, fresh_rx) = watch::channel(());
                    drop(std::mem::replace(&mut round_tx, fresh_tx));
                    round_rx = fresh_rx;
                    pending = 0;
                }
                _ = self.shutdown.cancelled() => return,
            }
        }
    }
}

#[cfg(test)]
#[path = "refresh_tests.rs"]
mod tests;
