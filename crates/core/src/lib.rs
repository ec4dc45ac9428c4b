// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wsgate-core: domain types for the wsgate workspace info provider

pub mod id;
pub mod info;
pub mod phase;
pub mod port;
pub mod status;

pub use id::{InstanceId, WorkspaceId};
pub use info::{PortInfo, WorkspaceCoords, WorkspaceInfo};
pub use phase::WorkspacePhase;
pub use port::public_port_str;
pub use status::{
    AdmissionLevel, PortSpec, WorkspaceAuth, WorkspaceMetadata, WorkspaceSpec, WorkspaceStatus,
};
