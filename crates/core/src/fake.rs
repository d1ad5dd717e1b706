// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake server for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use crate::resource::{InitHook, Next, ReadinessFlag, Resource};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("fake resource error: {0}")]
pub struct FakeResourceError(pub String);

#[derive(Default)]
struct FakeState {
    ready: bool,
    hooks: Vec<InitHook>,
    segments: Vec<String>,
    continuations: usize,
    flag_error: Option<String>,
    hook_error: Option<String>,
}

/// Fake server with a controllable readiness flag and init hooks
#[derive(Clone, Default)]
pub struct FakeResource {
    name: String,
    state: Arc<Mutex<FakeState>>,
}

impl fmt::Debug for FakeResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("FakeResource")
            .field("name", &self.name)
            .field("ready", &state.ready)
            .field("hooks", &state.hooks.len())
            .field("segments", &state.segments)
            .field("continuations", &state.continuations)
            .finish()
    }
}

impl FakeResource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Arc::default(),
        }
    }

    /// Fail `readiness_flag` with `message`
    pub fn failing_flag(self, message: impl Into<String>) -> Self {
        self.lock().flag_error = Some(message.into());
        self
    }

    /// Fail `on_initialized` with `message`
    pub fn failing_hook(self, message: impl Into<String>) -> Self {
        self.lock().hook_error = Some(message.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_ready(&self, ready: bool) {
        self.lock().ready = ready;
    }

    /// Mark ready and fire every registered hook; returns how many fired
    pub fn initialize(&self) -> usize {
        let hooks = {
            let mut state = self.lock();
            state.ready = true;
            std::mem::take(&mut state.hooks)
        };
        let count = hooks.len();
        for hook in hooks {
            let state = Arc::clone(&self.state);
            hook.fire(Next::new(move || {
                state.lock().unwrap_or_else(|e| e.into_inner()).continuations += 1;
            }));
        }
        count
    }

    /// Hooks registered and not yet fired
    pub fn hook_count(&self) -> usize {
        self.lock().hooks.len()
    }

    /// Continuations called by fired hooks
    pub fn continuations(&self) -> usize {
        self.lock().continuations
    }

    /// Segments readiness flags were requested for
    pub fn segments(&self) -> Vec<String> {
        self.lock().segments.clone()
    }
}

/// Readiness flag backed by a [`FakeResource`]
pub struct FakeFlag {
    state: Arc<Mutex<FakeState>>,
}

impl ReadinessFlag for FakeFlag {
    fn is_ready(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).ready
    }
}

impl Resource for FakeResource {
    type Flag = FakeFlag;
    type Error = FakeResourceError;

    fn readiness_flag(&self, segment: &str) -> Result<FakeFlag, FakeResourceError> {
        let mut state = self.lock();
        if let Some(message) = &state.flag_error {
            return Err(FakeResourceError(message.clone()));
        }
        state.segments.push(segment.to_string());
        Ok(FakeFlag {
            state: Arc::clone(&self.state),
        })
    }

    fn on_initialized(&self, hook: InitHook) -> Result<(), FakeResourceError> {
        let mut state = self.lock();
        if let Some(message) = &state.hook_error {
            return Err(FakeResourceError(message.clone()));
        }
        state.hooks.push(hook);
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
