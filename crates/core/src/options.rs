// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Options accepted by a wait call

use crate::error::Interest;
use std::time::Duration;

/// How long a waiter may stay queued
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Timeout {
    /// Use the coordinator's configured default
    #[default]
    Default,
    /// Wait forever
    Never,
    /// Give up after the duration (zero waits forever)
    After(Duration),
}

impl Timeout {
    /// Resolve against the configured default; `None` means no timer is armed
    pub fn resolve(self, default: Option<Duration>) -> Option<Duration> {
        let timeout = match self {
            Timeout::Default => default,
            Timeout::Never => None,
            Timeout::After(d) => Some(d),
        };
        timeout.filter(|d| !d.is_zero())
    }
}

impl From<Duration> for Timeout {
    fn from(d: Duration) -> Self {
        Timeout::After(d)
    }
}

impl From<Option<Duration>> for Timeout {
    fn from(d: Option<Duration>) -> Self {
        d.map_or(Timeout::Never, Timeout::After)
    }
}

/// Options for [`crate::Labbable::wait`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WaitOptions {
    /// Only wait for attachment, not for initialization
    pub immediate: bool,
    pub timeout: Timeout,
}

impl WaitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for attachment only
    pub fn immediate() -> Self {
        Self {
            immediate: true,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: impl Into<Timeout>) -> Self {
        self.timeout = timeout.into();
        self
    }

    pub fn without_timeout(self) -> Self {
        self.with_timeout(Timeout::Never)
    }

    pub fn interest(&self) -> Interest {
        if self.immediate {
            Interest::Immediate
        } else {
            Interest::Init
        }
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
