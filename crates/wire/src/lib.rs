// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire protocol for the workspace manager.
//!
//! Wire format: 4-byte length prefix (big-endian) + JSON payload.
//! `GetWorkspaces` is one request frame answered by one `Workspaces` frame;
//! `Subscribe` is one request frame after which the server pushes `Update`
//! frames until it closes the connection.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod frame;
mod request;
mod response;

pub use frame::{decode, encode, read_message, write_message, ProtocolError, MAX_MESSAGE_SIZE};
pub use request::{GetWorkspacesRequest, Request, SubscribeRequest};
pub use response::{GetWorkspacesResponse, Response, SubscribeResponse};
