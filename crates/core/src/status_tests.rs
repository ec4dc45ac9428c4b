// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn status_serde_roundtrip() {
    let status = WorkspaceStatus {
        id: "inst-1".into(),
        metadata: WorkspaceMetadata { meta_id: "ws-1".into() },
        spec: WorkspaceSpec {
            url: "https://ws-1.ws.example.com/".to_string(),
            ide_image: "ide:latest".to_string(),
            exposed_ports: vec![PortSpec {
                port: 3000,
                url: "http://ws-1.ws.example.com:4000/".to_string(),
            }],
        },
        phase: WorkspacePhase::Running,
        auth: Some(WorkspaceAuth {
            admission: AdmissionLevel::Everyone,
            owner_token: "tok".to_string(),
        }),
    };

    let json = serde_json::to_string(&status).unwrap();
    let parsed: WorkspaceStatus = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, status);
}

#[test]
fn sparse_status_deserializes_with_defaults() {
    let parsed: WorkspaceStatus =
        serde_json::from_str(r#"{"metadata":{"meta_id":"ws-2"}}"#).unwrap();

    assert_eq!(parsed.metadata.meta_id, "ws-2");
    assert!(parsed.id.is_empty());
    assert_eq!(parsed.phase, WorkspacePhase::Unknown);
    assert!(parsed.spec.exposed_ports.is_empty());
    assert!(parsed.auth.is_none());
}

#[test]
fn absent_auth_is_not_serialized() {
    let status = WorkspaceStatus::default();
    let json = serde_json::to_string(&status).unwrap();
    assert!(!json.contains("auth"));
}

#[test]
fn admission_level_serde_snake_case() {
    assert_eq!(serde_json::to_string(&AdmissionLevel::OwnerOnly).unwrap(), "\"owner_only\"");
    let parsed: AdmissionLevel = serde_json::from_str("\"everyone\"").unwrap();
    assert_eq!(parsed, AdmissionLevel::Everyone);
}
