// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::fake::FakeResource;
use std::sync::Mutex;

#[test]
fn attributes_report_package() {
    let attributes = Plugin::attributes();
    assert_eq!(attributes.name, "labbable-core");
    assert!(!attributes.version.is_empty());
}

#[tokio::test]
async fn register_binds_server() {
    let server = Arc::new(FakeResource::new("root"));
    let decorations = Plugin::register(&server).unwrap();

    assert!(decorations.labbable().is_attached());
    assert!(!decorations.is_initialized());

    let srv = decorations
        .labbable_ready(WaitOptions::immediate())
        .await
        .unwrap();
    assert!(Arc::ptr_eq(&srv, &server));
}

#[tokio::test]
async fn decorations_follow_initialization() {
    let server = Arc::new(FakeResource::new("root"));
    let decorations = Plugin::register(&server).unwrap();
    let seen = Arc::new(Mutex::new(None));
    {
        let seen = Arc::clone(&seen);
        decorations.labbable_ready_with(WaitOptions::new(), move |result| {
            *seen.lock().unwrap() = Some(result.is_ok());
        });
    }

    server.initialize();
    assert!(decorations.is_initialized());

    let srv = decorations.labbable_ready(WaitOptions::new()).await.unwrap();
    assert!(Arc::ptr_eq(&srv, &server));
    assert_eq!(*seen.lock().unwrap(), Some(true));
}

#[tokio::test]
async fn register_surfaces_host_errors() {
    let server = Arc::new(FakeResource::new("root").failing_hook("no ext"));
    let err = Plugin::register(&server).unwrap_err();
    assert!(matches!(err, AttachError::Host(_)));
}
