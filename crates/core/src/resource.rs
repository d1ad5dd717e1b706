// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! What a host server must provide to be attached

use std::fmt;

/// Reports whether the attached server has finished initializing
pub trait ReadinessFlag: Send + Sync + 'static {
    fn is_ready(&self) -> bool;
}

/// Continuation handed to an [`InitHook`]; the host's startup stays blocked until it is called
pub struct Next(Box<dyn FnOnce() + Send>);

impl Next {
    pub fn new(f: impl FnOnce() + Send + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn call(self) {
        (self.0)()
    }
}

impl fmt::Debug for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Next")
    }
}

/// One-shot observer fired when the host finishes its initialization phase
pub struct InitHook(Box<dyn FnOnce(Next) + Send>);

impl InitHook {
    pub fn new(f: impl FnOnce(Next) + Send + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn fire(self, next: Next) {
        (self.0)(next)
    }
}

impl fmt::Debug for InitHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("InitHook")
    }
}

/// A host server that can be attached to a [`crate::Labbable`]
pub trait Resource: Send + Sync + 'static {
    type Flag: ReadinessFlag;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a readiness flag scoped to `segment`
    fn readiness_flag(&self, segment: &str) -> Result<Self::Flag, Self::Error>;

    /// Register a hook fired once when initialization completes
    fn on_initialized(&self, hook: InitHook) -> Result<(), Self::Error>;
}
