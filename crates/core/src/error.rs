// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for attaching, waiting and configuration

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Which phase a waiter is interested in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interest {
    /// Satisfied as soon as a resource is attached
    Immediate,
    /// Satisfied once the attached resource has finished initializing
    Init,
}

impl Interest {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interest::Immediate => "immediate",
            Interest::Init => "init",
        }
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned synchronously by [`crate::Labbable::attach`]
#[derive(Debug, Error)]
pub enum AttachError<E> {
    /// A resource was already attached to this coordinator
    #[error("can't call labbable.attach(server) more than once")]
    AlreadyAttached,
    /// The host failed to provide a readiness flag or register the init hook
    #[error(transparent)]
    Host(E),
}

impl<E> AttachError<E> {
    pub fn is_already_attached(&self) -> bool {
        matches!(self, AttachError::AlreadyAttached)
    }
}

/// A waiter was not satisfied within its timeout
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{name} timed-out after {}ms.  Did you forget to call {hint}?", .timeout.as_millis())]
pub struct TimeoutError {
    pub name: String,
    pub interest: Interest,
    pub timeout: Duration,
    pub hint: String,
}

/// Errors delivered to a waiter
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WaitError {
    #[error(transparent)]
    TimedOut(#[from] TimeoutError),
    /// The coordinator went away with the waiter still queued
    #[error("labbable was dropped before the server became available")]
    Closed,
}

impl WaitError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, WaitError::TimedOut(_))
    }

    /// Phase that timed out, if this is a timeout
    pub fn interest(&self) -> Option<Interest> {
        match self {
            WaitError::TimedOut(e) => Some(e.interest),
            WaitError::Closed => None,
        }
    }
}

/// Errors loading a [`crate::LabbableConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
