// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

/// Request from the proxy to the workspace manager.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Request {
    /// Fetch a full snapshot of current workspace statuses.
    GetWorkspaces(GetWorkspacesRequest),

    /// Open a status subscription; the server pushes updates until it
    /// closes the connection.
    Subscribe(SubscribeRequest),
}

/// Snapshot request parameters. Empty today; kept as a struct so fields can
/// be added without breaking the envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GetWorkspacesRequest {}

/// Subscription request parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SubscribeRequest {}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
