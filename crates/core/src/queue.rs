// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! FIFO queue of pending waiters
//!
//! Each waiter gets a stable [`WaiterId`] when it is pushed. Ids grow
//! monotonically, so key order is arrival order and a timer can remove its
//! own waiter without searching. Removing an id that is already gone is a
//! no-op returning `None`.

use crate::error::Interest;
use crate::waiter::{Completion, WaitResult};
use std::collections::BTreeMap;
use std::fmt;
use tokio::task::AbortHandle;

/// Handle to a queued waiter
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WaiterId(u64);

impl fmt::Display for WaiterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A pending wait request
pub struct Waiter<R> {
    completion: Completion<R>,
    timer: Option<AbortHandle>,
}

impl<R> Waiter<R> {
    pub fn new(completion: Completion<R>) -> Self {
        Self {
            completion,
            timer: None,
        }
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// Disarm the timer (if any) and hand the outcome to the completion
    pub fn resolve(self, result: WaitResult<R>) {
        if let Some(timer) = self.timer {
            timer.abort();
        }
        self.completion.deliver(result);
    }
}

/// Waiters for one [`Interest`], in arrival order
pub struct WaitQueue<R> {
    interest: Interest,
    entries: BTreeMap<WaiterId, Waiter<R>>,
    next_id: u64,
}

impl<R> WaitQueue<R> {
    pub fn new(interest: Interest) -> Self {
        Self {
            interest,
            entries: BTreeMap::new(),
            next_id: 0,
        }
    }

    #[cfg(test)]
    pub fn interest(&self) -> Interest {
        self.interest
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, id: WaiterId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn push(&mut self, waiter: Waiter<R>) -> WaiterId {
        let id = WaiterId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, waiter);
        id
    }

    /// Attach a timer to a queued waiter; returns false if it is already gone
    pub fn arm(&mut self, id: WaiterId, timer: AbortHandle) -> bool {
        match self.entries.get_mut(&id) {
            Some(waiter) => {
                waiter.timer = Some(timer);
                true
            }
            None => {
                timer.abort();
                false
            }
        }
    }

    pub fn remove(&mut self, id: WaiterId) -> Option<Waiter<R>> {
        self.entries.remove(&id)
    }

    /// Take every waiter, oldest first
    pub fn drain(&mut self) -> Vec<Waiter<R>> {
        std::mem::take(&mut self.entries).into_values().collect()
    }
}

impl<R> fmt::Debug for WaitQueue<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitQueue")
            .field("interest", &self.interest)
            .field("len", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
