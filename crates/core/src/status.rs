// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace status records as reported by the workspace manager.
//!
//! All fields default on deserialize so that sparse manager messages are
//! tolerated; the provider decides what to do with incomplete records.

use serde::{Deserialize, Serialize};

use crate::id::{InstanceId, WorkspaceId};
use crate::phase::WorkspacePhase;

/// Full status of one workspace instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceStatus {
    /// Instance id of the current run.
    #[serde(default)]
    pub id: InstanceId,
    #[serde(default)]
    pub metadata: WorkspaceMetadata,
    #[serde(default)]
    pub spec: WorkspaceSpec,
    #[serde(default)]
    pub phase: WorkspacePhase,
    /// Authentication descriptor, forwarded to the proxy layer untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<WorkspaceAuth>,
}

/// Metadata shared by all instances of a workspace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceMetadata {
    /// Stable workspace id, constant across instances.
    #[serde(default)]
    pub meta_id: WorkspaceId,
}

/// Spec of a running instance: endpoint URL and exposed ports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSpec {
    /// Upstream URL of the primary IDE endpoint.
    #[serde(default)]
    pub url: String,
    /// Tag of the IDE image the instance runs.
    #[serde(default)]
    pub ide_image: String,
    #[serde(default)]
    pub exposed_ports: Vec<PortSpec>,
}

/// One port inside the workspace made externally forwardable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortSpec {
    #[serde(default)]
    pub port: u32,
    /// Upstream URL under which the port is reachable.
    #[serde(default)]
    pub url: String,
}

/// Who may access a workspace endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionLevel {
    #[default]
    OwnerOnly,
    Everyone,
}

/// Authentication data the proxy needs to gate access to a workspace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceAuth {
    #[serde(default)]
    pub admission: AdmissionLevel,
    #[serde(default)]
    pub owner_token: String,
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
