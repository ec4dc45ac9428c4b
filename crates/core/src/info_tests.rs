// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::phase::WorkspacePhase;
use crate::status::{AdmissionLevel, WorkspaceMetadata, WorkspaceSpec};

fn status(meta_id: &str, url: &str, exposed: Vec<PortSpec>) -> WorkspaceStatus {
    WorkspaceStatus {
        id: "inst-1".into(),
        metadata: WorkspaceMetadata { meta_id: meta_id.into() },
        spec: WorkspaceSpec {
            url: url.to_string(),
            ide_image: "ide:latest".to_string(),
            exposed_ports: exposed,
        },
        phase: WorkspacePhase::Running,
        auth: None,
    }
}

#[test]
fn maps_ids_url_and_image() {
    let info = WorkspaceInfo::from(&status("ws-1", "https://ws-1.example.com/", vec![]));

    assert_eq!(info.workspace_id, "ws-1");
    assert_eq!(info.instance_id, "inst-1");
    assert_eq!(info.url, "https://ws-1.example.com/");
    assert_eq!(info.ide_image, "ide:latest");
    assert_eq!(info.ide_public_port, "443");
    assert!(info.ports.is_empty());
}

#[test]
fn maps_exposed_ports_with_public_ports() {
    let info = WorkspaceInfo::from(&status(
        "ws-2",
        "http://ws-2.example.com:8080/",
        vec![
            PortSpec { port: 3000, url: "http://ws-2.example.com:4000/".to_string() },
            PortSpec { port: 5000, url: "https://ws-2.example.com/".to_string() },
        ],
    ));

    assert_eq!(info.ide_public_port, "8080");
    assert_eq!(info.ports.len(), 2);
    assert_eq!(info.ports[0].spec.port, 3000);
    assert_eq!(info.ports[0].public_port, "4000");
    assert_eq!(info.ports[1].spec.port, 5000);
    assert_eq!(info.ports[1].public_port, "443");
}

#[test]
fn drops_ports_with_unroutable_urls() {
    let info = WorkspaceInfo::from(&status(
        "ws-3",
        "https://ws-3.example.com/",
        vec![
            PortSpec { port: 3000, url: "://bad".to_string() },
            PortSpec { port: 4000, url: "ftp://ws-3.example.com/".to_string() },
            PortSpec { port: 5000, url: "http://ws-3.example.com:5050/".to_string() },
        ],
    ));

    assert_eq!(info.ports.len(), 1);
    assert_eq!(info.ports[0].spec.port, 5000);
    assert_eq!(info.ports[0].public_port, "5050");
}

#[test]
fn unparseable_primary_url_keeps_workspace() {
    let info = WorkspaceInfo::from(&status(
        "ws-4",
        "://bad",
        vec![PortSpec { port: 3000, url: "http://ws-4.example.com:4000/".to_string() }],
    ));

    assert_eq!(info.workspace_id, "ws-4");
    assert_eq!(info.ide_public_port, "");
    assert_eq!(info.ports.len(), 1);
}

#[test]
fn auth_is_carried_through() {
    let mut st = status("ws-5", "https://ws-5.example.com/", vec![]);
    st.auth = Some(WorkspaceAuth {
        admission: AdmissionLevel::OwnerOnly,
        owner_token: "secret".to_string(),
    });

    let info = WorkspaceInfo::from(&st);
    let auth = info.auth.expect("auth should be mapped");
    assert_eq!(auth.admission, AdmissionLevel::OwnerOnly);
    assert_eq!(auth.owner_token, "secret");
}
