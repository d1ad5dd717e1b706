// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process host server
//!
//! A minimal server lifecycle: cache segments that report ready once the
//! server's caches start, and one-shot hooks run in registration order during
//! `initialize`. Each hook must call its continuation before the next runs.

use labbable_core::{InitHook, Next, ReadinessFlag, Resource};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tokio::sync::oneshot;

/// Errors from the host server lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerError {
    #[error("server {0} is already initialized")]
    AlreadyInitialized(String),
    #[error("init hook {index} on server {server} dropped its continuation")]
    HookAbandoned { server: String, index: usize },
    #[error("invalid cache segment name: {0:?}")]
    InvalidSegment(String),
}

#[derive(Default)]
struct Lifecycle {
    initializing: bool,
    initialized: bool,
    hooks: Vec<InitHook>,
    segments: Vec<String>,
}

/// A host server with a start-up phase
pub struct Server {
    name: String,
    caches_started: Arc<AtomicBool>,
    lifecycle: Mutex<Lifecycle>,
}

impl Server {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            caches_started: Arc::new(AtomicBool::new(false)),
            lifecycle: Mutex::new(Lifecycle::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn lock(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().initialized
    }

    /// Cache segments created so far
    pub fn segments(&self) -> Vec<String> {
        self.lock().segments.clone()
    }

    /// Start caches, then run every init hook in order
    ///
    /// Hooks registered while earlier hooks run are picked up before the
    /// server is marked initialized.
    pub async fn initialize(&self) -> Result<(), ServerError> {
        {
            let mut lifecycle = self.lock();
            if lifecycle.initializing || lifecycle.initialized {
                return Err(ServerError::AlreadyInitialized(self.name.clone()));
            }
            lifecycle.initializing = true;
        }

        self.caches_started.store(true, Ordering::SeqCst);
        tracing::debug!(server = %self.name, "caches started");

        let mut index = 0;
        loop {
            let hooks = {
                let mut lifecycle = self.lock();
                if lifecycle.hooks.is_empty() {
                    lifecycle.initializing = false;
                    lifecycle.initialized = true;
                    break;
                }
                std::mem::take(&mut lifecycle.hooks)
            };

            let mut hooks = hooks.into_iter();
            while let Some(hook) = hooks.next() {
                let (tx, rx) = oneshot::channel();
                hook.fire(Next::new(move || {
                    let _ = tx.send(());
                }));
                if rx.await.is_err() {
                    // Unfired hooks stay queued for a retry
                    let mut lifecycle = self.lock();
                    let later = std::mem::take(&mut lifecycle.hooks);
                    lifecycle.hooks = hooks.chain(later).collect();
                    lifecycle.initializing = false;
                    return Err(ServerError::HookAbandoned {
                        server: self.name.clone(),
                        index,
                    });
                }
                index += 1;
            }
        }

        tracing::info!(server = %self.name, hooks = index, "initialized");
        Ok(())
    }
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("name", &self.name)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

/// Readiness flag for one cache segment of a [`Server`]
#[derive(Clone, Debug)]
pub struct CacheSegment {
    segment: String,
    started: Arc<AtomicBool>,
}

impl CacheSegment {
    pub fn segment(&self) -> &str {
        &self.segment
    }
}

impl ReadinessFlag for CacheSegment {
    fn is_ready(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }
}

impl Resource for Server {
    type Flag = CacheSegment;
    type Error = ServerError;

    fn readiness_flag(&self, segment: &str) -> Result<CacheSegment, ServerError> {
        if segment.is_empty() {
            return Err(ServerError::InvalidSegment(segment.to_string()));
        }
        self.lock().segments.push(segment.to_string());
        Ok(CacheSegment {
            segment: segment.to_string(),
            started: Arc::clone(&self.caches_started),
        })
    }

    fn on_initialized(&self, hook: InitHook) -> Result<(), ServerError> {
        let mut lifecycle = self.lock();
        if !lifecycle.initialized {
            lifecycle.hooks.push(hook);
            return Ok(());
        }
        drop(lifecycle);

        // Registered too late to be run by initialize(): fire right away
        tracing::debug!(server = %self.name, "init hook registered after initialization");
        hook.fire(Next::new(|| {}));
        Ok(())
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
