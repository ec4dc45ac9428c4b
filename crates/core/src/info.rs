// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace info records: what the proxy needs to know per workspace.
//!
//! Records are immutable once built; the provider replaces them wholesale
//! on every status update or snapshot rebuild.

use serde::{Deserialize, Serialize};

use crate::id::{InstanceId, WorkspaceId};
use crate::port::public_port_str;
use crate::status::{PortSpec, WorkspaceAuth, WorkspaceStatus};

/// Everything the proxy needs to know about one running workspace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceInfo {
    pub workspace_id: WorkspaceId,
    pub instance_id: InstanceId,
    /// Upstream URL of the primary IDE endpoint.
    pub url: String,
    pub ide_image: String,
    /// Proxy-facing port of the primary endpoint, derived from `url`.
    /// Empty when `url` does not parse; the workspace then stays reachable
    /// by id only.
    pub ide_public_port: String,
    pub ports: Vec<PortInfo>,
    pub auth: Option<WorkspaceAuth>,
}

/// An exposed workspace port together with its proxy-facing public port.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortInfo {
    pub spec: PortSpec,
    pub public_port: String,
}

/// Coordinates of a workspace endpoint: the workspace plus an optional port.
///
/// An empty `port` addresses the primary IDE endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceCoords {
    pub id: WorkspaceId,
    pub port: String,
}

impl From<&WorkspaceStatus> for WorkspaceInfo {
    fn from(status: &WorkspaceStatus) -> Self {
        let mut ports = Vec::with_capacity(status.spec.exposed_ports.len());
        for spec in &status.spec.exposed_ports {
            let public_port = public_port_str(&spec.url);
            if public_port.is_empty() {
                // Unroutable exposed port; the workspace itself is kept.
                continue;
            }
            ports.push(PortInfo { spec: spec.clone(), public_port });
        }

        WorkspaceInfo {
            workspace_id: status.metadata.meta_id.clone(),
            instance_id: status.id.clone(),
            url: status.spec.url.clone(),
            ide_image: status.spec.ide_image.clone(),
            ide_public_port: public_port_str(&status.spec.url),
            ports,
            auth: status.auth.clone(),
        }
    }
}

#[cfg(test)]
#[path = "info_tests.rs"]
mod tests;
