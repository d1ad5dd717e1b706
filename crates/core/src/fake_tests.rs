// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn flag_follows_set_ready() {
    let resource = FakeResource::new("api");
    let flag = resource.readiness_flag("_labbable").unwrap();

    assert!(!flag.is_ready());
    resource.set_ready(true);
    assert!(flag.is_ready());
    assert_eq!(resource.segments(), vec!["_labbable".to_string()]);
}

#[test]
fn initialize_fires_hooks_once() {
    let resource = FakeResource::new("api");
    let fired = Arc::new(Mutex::new(0));
    for _ in 0..2 {
        let fired = Arc::clone(&fired);
        resource
            .on_initialized(InitHook::new(move |next| {
                *fired.lock().unwrap() += 1;
                next.call();
            }))
            .unwrap();
    }
    assert_eq!(resource.hook_count(), 2);

    assert_eq!(resource.initialize(), 2);
    assert_eq!(resource.initialize(), 0);
    assert_eq!(*fired.lock().unwrap(), 2);
    assert_eq!(resource.continuations(), 2);
    assert_eq!(resource.hook_count(), 0);
}

#[test]
fn configured_failures_are_returned() {
    let resource = FakeResource::new("api")
        .failing_flag("no cache")
        .failing_hook("no ext");

    assert_eq!(
        resource.readiness_flag("_labbable").err(),
        Some(FakeResourceError("no cache".to_string()))
    );
    assert_eq!(
        resource.on_initialized(InitHook::new(|next| next.call())),
        Err(FakeResourceError("no ext".to_string()))
    );
}

#[test]
fn debug_shows_recorded_state() {
    let resource = FakeResource::new("api");
    resource.readiness_flag("_labbable").unwrap();
    resource.set_ready(true);

    let debug = format!("{resource:?}");
    assert!(debug.starts_with("FakeResource { name: \"api\", ready: true"), "{debug}");
    assert!(debug.contains("segments: [\"_labbable\"]"), "{debug}");
}
