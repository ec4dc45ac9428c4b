// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace lifecycle phase as reported by the workspace manager.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of a workspace instance.
///
/// The proxy only acts on `Stopped` (the workspace is dropped from the
/// index); every other phase upserts the workspace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspacePhase {
    #[default]
    Unknown,
    Pending,
    Creating,
    Initializing,
    Running,
    Interrupted,
    Stopping,
    Stopped,
}

impl WorkspacePhase {
    /// The terminal phase after which the workspace leaves the index.
    pub fn is_stopped(&self) -> bool {
        matches!(self, WorkspacePhase::Stopped)
    }
}

impl fmt::Display for WorkspacePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WorkspacePhase::Unknown => "unknown",
            WorkspacePhase::Pending => "pending",
            WorkspacePhase::Creating => "creating",
            WorkspacePhase::Initializing => "initializing",
            WorkspacePhase::Running => "running",
            WorkspacePhase::Interrupted => "interrupted",
            WorkspacePhase::Stopping => "stopping",
            WorkspacePhase::Stopped => "stopped",
        })
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
