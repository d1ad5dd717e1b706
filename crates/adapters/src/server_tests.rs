// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use labbable_core::{Labbable, LabbableConfig, WaitOptions};
use std::time::Duration;

fn counting_hook(log: &Arc<Mutex<Vec<usize>>>, tag: usize) -> InitHook {
    let log = Arc::clone(log);
    InitHook::new(move |next| {
        log.lock().unwrap().push(tag);
        next.call();
    })
}

#[tokio::test]
async fn initialize_starts_caches_then_runs_hooks_in_order() {
    let server = Server::new("api");
    let flag = server.readiness_flag("_labbable").unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));
    for tag in 0..3 {
        server.on_initialized(counting_hook(&log, tag)).unwrap();
    }

    assert!(!flag.is_ready());
    server.initialize().await.unwrap();

    assert!(flag.is_ready());
    assert!(server.is_initialized());
    assert_eq!(*log.lock().unwrap(), vec![0, 1, 2]);
    assert_eq!(flag.segment(), "_labbable");
    assert_eq!(server.segments(), vec!["_labbable".to_string()]);
}

#[tokio::test]
async fn initialize_twice_fails() {
    let server = Server::new("api");
    server.initialize().await.unwrap();

    assert_eq!(
        server.initialize().await,
        Err(ServerError::AlreadyInitialized("api".to_string()))
    );
}

#[tokio::test]
async fn hook_registered_after_initialize_fires_immediately() {
    let server = Server::new("api");
    server.initialize().await.unwrap();

    let log = Arc::new(Mutex::new(Vec::new()));
    server.on_initialized(counting_hook(&log, 7)).unwrap();
    assert_eq!(*log.lock().unwrap(), vec![7]);
}

#[tokio::test]
async fn dropped_continuation_fails_initialize() {
    let server = Server::new("api");
    server.on_initialized(InitHook::new(drop)).unwrap();

    let err = server.initialize().await.unwrap_err();
    assert_eq!(
        err,
        ServerError::HookAbandoned {
            server: "api".to_string(),
            index: 0
        }
    );
}

#[tokio::test]
async fn initialize_can_be_retried_after_abandoned_hook() {
    let server = Server::new("api");
    let log = Arc::new(Mutex::new(Vec::new()));
    server.on_initialized(InitHook::new(drop)).unwrap();
    server.on_initialized(counting_hook(&log, 1)).unwrap();

    assert!(server.initialize().await.is_err());
    assert!(!server.is_initialized());
    assert!(log.lock().unwrap().is_empty());

    server.initialize().await.unwrap();
    assert!(server.is_initialized());
    assert_eq!(*log.lock().unwrap(), vec![1]);
}

#[tokio::test]
async fn hook_may_finish_later() {
    let server = Server::new("api");
    server
        .on_initialized(InitHook::new(|next| {
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                next.call();
            });
        }))
        .unwrap();

    server.initialize().await.unwrap();
    assert!(server.is_initialized());
}

#[test]
fn empty_segment_is_rejected() {
    let server = Server::new("api");
    assert_eq!(
        server.readiness_flag("").unwrap_err(),
        ServerError::InvalidSegment(String::new())
    );
}

#[tokio::test]
async fn labbable_hands_off_server_once_initialized() {
    let server = Arc::new(Server::new("api"));
    let labbable = Labbable::with_resource(LabbableConfig::default(), Arc::clone(&server)).unwrap();

    let ready = labbable.wait(WaitOptions::new());
    assert!(!labbable.is_ready());

    server.initialize().await.unwrap();
    let srv = ready.await.unwrap();

    assert!(Arc::ptr_eq(&srv, &server));
    assert!(srv.is_initialized());
    assert!(labbable.is_ready());
}

#[tokio::test]
async fn labbable_hands_off_server_that_was_already_initialized() {
    let server = Arc::new(Server::new("api"));
    server.initialize().await.unwrap();

    let labbable = Labbable::new(LabbableConfig::default());
    labbable.attach(Arc::clone(&server)).unwrap();

    let srv = labbable.wait(WaitOptions::new()).await.unwrap();
    assert!(Arc::ptr_eq(&srv, &server));
}

#[tokio::test(start_paused = true)]
async fn uninitialized_server_times_out_init_waiters() {
    let server = Arc::new(Server::new("api"));
    let labbable = Labbable::with_resource(LabbableConfig::default(), server).unwrap();

    let err = labbable.wait(WaitOptions::new()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Labbable timed-out after 2000ms.  Did you forget to call server.initialize() or labbable.attach(server)?"
    );
}
