// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use wsgate_core::{WorkspaceMetadata, WorkspacePhase};

fn running_status(meta_id: &str) -> WorkspaceStatus {
    WorkspaceStatus {
        metadata: WorkspaceMetadata { meta_id: meta_id.into() },
        phase: WorkspacePhase::Running,
        ..Default::default()
    }
}

#[test]
fn workspaces_response_roundtrip() {
    let response = Response::Workspaces(GetWorkspacesResponse {
        status: vec![running_status("ws-1"), running_status("ws-2")],
    });

    let json = serde_json::to_string(&response).expect("serialize");
    let parsed: Response = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(parsed, response);
}

#[test]
fn update_without_status_deserializes() {
    // Subscription messages may carry only ancillary log output.
    let parsed: Response =
        serde_json::from_str(r#"{"type":"Update","log":{"message":"hello"}}"#).expect("parse");

    let Response::Update(update) = parsed else { panic!("expected Update") };
    assert!(update.status.is_none());
    assert!(update.log.is_some());
}

#[test]
fn empty_update_deserializes() {
    let parsed: Response = serde_json::from_str(r#"{"type":"Update"}"#).expect("parse");
    let Response::Update(update) = parsed else { panic!("expected Update") };
    assert_eq!(update, SubscribeResponse::default());
}

#[test]
fn error_response_carries_message() {
    let response = Response::Error { message: "no such workspace".to_string() };
    let json = serde_json::to_string(&response).expect("serialize");
    let parsed: Response = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(parsed, response);
}
