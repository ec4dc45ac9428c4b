// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concurrent workspace index with waiter support.
//!
//! Two maps under one lock: workspace infos by id, and coordinates by
//! public port. Waiters are woken only after a mutation is fully applied,
//! and re-check under the lock on every wake.

use std::collections::HashMap;
use std::pin::pin;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use wsgate_core::{WorkspaceCoords, WorkspaceId, WorkspaceInfo};

#[derive(Default)]
struct CacheState {
    /// WorkspaceInfos indexed by workspace id.
    infos: HashMap<WorkspaceId, Arc<WorkspaceInfo>>,
    /// WorkspaceCoords indexed by public (proxy) port.
    coords_by_public_port: HashMap<String, WorkspaceCoords>,
}

/// Index of workspace infos, queryable by id and by public port.
#[derive(Default)]
pub struct WorkspaceInfoCache {
    state: RwLock<CacheState>,
    /// Signals the arrival of new workspace info.
    changed: Notify,
}

impl WorkspaceInfoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard and rebuild both maps from a fresh snapshot, then wake all
    /// waiters. Readers never observe a partial rebuild.
    pub fn replace_all(&self, infos: Vec<WorkspaceInfo>) {
        {
            let mut state = self.state.write();
            state.infos = HashMap::with_capacity(infos.len());
            state.coords_by_public_port = HashMap::with_capacity(infos.len());
            for info in infos {
                Self::apply_insert(&mut state, Arc::new(info));
            }
        }
        self.changed.notify_waiters();
    }

    /// Insert or overwrite one workspace, then wake all waiters.
    pub fn insert(&self, info: WorkspaceInfo) {
        {
            let mut state = self.state.write();
            Self::apply_insert(&mut state, Arc::new(info));
        }
        self.changed.notify_waiters();
    }

    fn apply_insert(state: &mut CacheState, info: Arc<WorkspaceInfo>) {
        // A workspace with an unparseable primary URL has no public port;
        // it stays reachable by id but never under an empty port key.
        if !info.ide_public_port.is_empty() {
            state.coords_by_public_port.insert(
                info.ide_public_port.clone(),
                WorkspaceCoords { id: info.workspace_id.clone(), port: String::new() },
            );
        }

        for port in &info.ports {
            state.coords_by_public_port.insert(
                port.public_port.clone(),
                WorkspaceCoords { id: info.workspace_id.clone(), port: port.spec.port.to_string() },
            );
        }

        state.infos.insert(info.workspace_id.clone(), info);
    }

    /// Remove a workspace and its IDE-port entry. Entries for forwarded
    /// ports linger until the next snapshot rebuild overwrites them. No-op
    /// when absent; waiters are not woken.
    pub fn delete(&self, workspace_id: &WorkspaceId) {
        let mut state = self.state.write();
        let Some(info) = state.infos.remove(workspace_id) else { return };
        state.coords_by_public_port.remove(&info.ide_public_port);
    }

    pub fn get(&self, workspace_id: &WorkspaceId) -> Option<Arc<WorkspaceInfo>> {
        self.state.read().infos.get(workspace_id).cloned()
    }

    pub fn get_coords_by_public_port(&self, public_port: &str) -> Option<WorkspaceCoords> {
        self.state.read().coords_by_public_port.get(public_port).cloned()
    }

    /// Wait until the workspace appears or the token fires.
    ///
    /// The waiter is enabled before each re-check so a broadcast between
    /// check and wait cannot be lost; a spurious wake only causes another
    /// re-check.
    pub async fn wait_for(
        &self,
        cancel: CancellationToken,
        workspace_id: &WorkspaceId,
    ) -> Option<Arc<WorkspaceInfo>> {
        loop {
            let mut notified = pin!(self.changed.notified());
            notified.as_mut().enable();

            if let Some(info) = self.get(workspace_id) {
                return Some(info);
            }

            tokio::select! {
                _ = notified => {}
                _ = cancel.cancelled() => return None,
            }
        }
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
