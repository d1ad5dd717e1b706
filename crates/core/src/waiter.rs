// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deliver-once completion shared by the callback and future styles
//!
//! A [`Completion`] is consumed by [`Completion::deliver`], so a waiter can be
//! resolved at most once. A completion dropped without delivery resolves with
//! [`WaitError::Closed`], so every waiter observes exactly one outcome.

use crate::error::WaitError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Outcome handed to a waiter
pub type WaitResult<R> = Result<Arc<R>, WaitError>;

type Sink<R> = Box<dyn FnOnce(WaitResult<R>) + Send>;

/// Single-fire result sink for one waiter
pub struct Completion<R> {
    sink: Option<Sink<R>>,
}

impl<R: Send + Sync + 'static> Completion<R> {
    /// Callback style: `f` runs exactly once with the outcome
    pub fn callback(f: impl FnOnce(WaitResult<R>) + Send + 'static) -> Self {
        Self {
            sink: Some(Box::new(f)),
        }
    }

    /// Future style: the returned [`Ready`] resolves with the outcome
    pub fn channel() -> (Self, Ready<R>) {
        let (tx, rx) = oneshot::channel();
        let completion = Self::callback(move |result| {
            // Receiver gone means the caller dropped the future
            let _ = tx.send(result);
        });
        (completion, Ready { rx })
    }
}

impl<R> Completion<R> {
    pub fn deliver(mut self, result: WaitResult<R>) {
        if let Some(sink) = self.sink.take() {
            sink(result);
        }
    }
}

impl<R> Drop for Completion<R> {
    fn drop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink(Err(WaitError::Closed));
        }
    }
}

impl<R> fmt::Debug for Completion<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("delivered", &self.sink.is_none())
            .finish()
    }
}

/// Future returned by [`crate::Labbable::wait`]
#[must_use = "futures do nothing unless polled"]
pub struct Ready<R> {
    rx: oneshot::Receiver<WaitResult<R>>,
}

impl<R> Future for Ready<R> {
    type Output = WaitResult<R>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(WaitError::Closed)))
    }
}

impl<R> fmt::Debug for Ready<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Ready")
    }
}

#[cfg(test)]
#[path = "waiter_tests.rs"]
mod tests;
