// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn workspace_id_display() {
    let id = WorkspaceId::new("amaranth-smelt-9ba20181");
    assert_eq!(id.to_string(), "amaranth-smelt-9ba20181");
}

#[test]
fn workspace_id_equality() {
    let id1 = WorkspaceId::new("ws-1");
    let id2 = WorkspaceId::new("ws-1");
    let id3 = WorkspaceId::new("ws-2");

    assert_eq!(id1, id2);
    assert_ne!(id1, id3);
    assert_eq!(id1, "ws-1");
}

#[test]
fn workspace_id_from_str() {
    let id: WorkspaceId = "test".into();
    assert_eq!(id.as_str(), "test");
}

#[test]
fn workspace_id_serde_transparent() {
    let id = WorkspaceId::new("my-workspace");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"my-workspace\"");

    let parsed: WorkspaceId = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn instance_id_default_is_empty() {
    let id = InstanceId::default();
    assert!(id.is_empty());
    assert_eq!(id.as_str(), "");
}

#[test]
fn workspace_id_borrow_allows_str_lookup() {
    use std::collections::HashMap;

    let mut map: HashMap<WorkspaceId, u32> = HashMap::new();
    map.insert(WorkspaceId::new("ws-1"), 1);
    assert_eq!(map.get("ws-1"), Some(&1));
}
