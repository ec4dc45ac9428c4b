// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};
use wsgate_core::WorkspaceStatus;

/// Response from the workspace manager.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Response {
    /// Answer to `GetWorkspaces`.
    Workspaces(GetWorkspacesResponse),

    /// One pushed subscription message.
    Update(SubscribeResponse),

    /// Server-side failure for the preceding request.
    Error { message: String },
}

/// Full snapshot of current workspace statuses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GetWorkspacesResponse {
    #[serde(default)]
    pub status: Vec<WorkspaceStatus>,
}

/// One subscription message.
///
/// Messages without `status` carry ancillary log payloads and must be
/// tolerated by consumers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SubscribeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkspaceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<serde_json::Value>,
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
