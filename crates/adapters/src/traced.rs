// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced resource wrapper for consistent observability

use labbable_core::{InitHook, Next, Resource};
use std::time::Instant;

/// Wrapper that adds tracing to any Resource
#[derive(Clone, Debug)]
pub struct TracedResource<R> {
    name: String,
    inner: R,
}

impl<R> TracedResource<R> {
    pub fn new(name: impl Into<String>, inner: R) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: Resource> Resource for TracedResource<R> {
    type Flag = R::Flag;
    type Error = R::Error;

    fn readiness_flag(&self, segment: &str) -> Result<R::Flag, R::Error> {
        let span = tracing::info_span!("resource.readiness_flag", resource = %self.name, segment);
        let _guard = span.enter();

        let result = self.inner.readiness_flag(segment);
        match &result {
            Ok(_) => tracing::debug!("flag created"),
            Err(e) => tracing::error!(error = %e, "flag failed"),
        }
        result
    }

    fn on_initialized(&self, hook: InitHook) -> Result<(), R::Error> {
        let span = tracing::info_span!("resource.on_initialized", resource = %self.name);
        let _guard = span.enter();

        let name = self.name.clone();
        let registered = Instant::now();
        let traced = InitHook::new(move |next| {
            let waited_ms = registered.elapsed().as_millis() as u64;
            tracing::info!(resource = %name, waited_ms, "init hook fired");
            hook.fire(Next::new(move || {
                tracing::debug!(resource = %name, "init hook continued");
                next.call();
            }));
        });

        let result = self.inner.on_initialized(traced);
        match &result {
            Ok(()) => tracing::debug!("hook registered"),
            Err(e) => tracing::error!(error = %e, "hook registration failed"),
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
