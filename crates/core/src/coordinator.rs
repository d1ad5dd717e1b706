// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Labbable` coordinator
//!
//! Binds one server exactly once and hands it to waiters registered before or
//! after that point. Immediate waiters are released when the server is
//! attached; init waiters when the server reports its initialization phase as
//! complete. Every waiter observes exactly one outcome: the queue entry is
//! removed under the state lock by whichever of flush or timer gets there
//! first, and only the remover delivers.
//!
//! Deliveries never run inline in `attach`, `wait`, or the host's init hook.
//! Each coordinator owns one delivery task; batches are sent to it while the
//! state lock is held, so waiters are delivered in the order they were released
//! on any runtime flavor.

use crate::config::LabbableConfig;
use crate::error::{AttachError, Interest, TimeoutError, WaitError};
use crate::options::WaitOptions;
use crate::queue::{WaitQueue, Waiter, WaiterId};
use crate::resource::{InitHook, ReadinessFlag, Resource};
use crate::waiter::{Completion, Ready, WaitResult};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Segment name used when asking the host for a readiness flag
pub const CACHE_SEGMENT: &str = "_labbable";

enum Attachment<R: Resource> {
    Unattached,
    Attached { resource: Arc<R>, flag: R::Flag },
}

struct State<R: Resource> {
    attachment: Attachment<R>,
    immediate: WaitQueue<R>,
    init: WaitQueue<R>,
    /// Set once the init queue has been flushed by the host's init hook
    init_flushed: bool,
}

impl<R: Resource> State<R> {
    fn queue_mut(&mut self, interest: Interest) -> &mut WaitQueue<R> {
        match interest {
            Interest::Immediate => &mut self.immediate,
            Interest::Init => &mut self.init,
        }
    }

    fn resource(&self) -> Option<&Arc<R>> {
        match &self.attachment {
            Attachment::Unattached => None,
            Attachment::Attached { resource, .. } => Some(resource),
        }
    }

    fn is_initialized(&self) -> bool {
        match &self.attachment {
            Attachment::Unattached => false,
            Attachment::Attached { flag, .. } => flag.is_ready(),
        }
    }

    /// The resource, if a waiter with `interest` can be satisfied without queueing
    fn available(&self, interest: Interest) -> Option<Arc<R>> {
        let resource = self.resource()?;
        let satisfied = match interest {
            Interest::Immediate => true,
            Interest::Init => self.init_flushed || self.is_initialized(),
        };
        satisfied.then(|| Arc::clone(resource))
    }
}

/// Waiters released together, and the server they receive
type Batch<R> = (Vec<Waiter<R>>, Arc<R>);

struct Shared<R: Resource> {
    config: LabbableConfig,
    runtime: Handle,
    state: Mutex<State<R>>,
    deliveries: mpsc::UnboundedSender<Batch<R>>,
}

/// Readiness coordinator for a single shared server
///
/// Cloning yields another handle to the same coordinator.
pub struct Labbable<R: Resource> {
    shared: Arc<Shared<R>>,
}

impl<R: Resource> Clone for Labbable<R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<R: Resource> Labbable<R> {
    /// Create an unattached coordinator on the current Tokio runtime
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime; use [`Labbable::new_in`] there.
    pub fn new(config: LabbableConfig) -> Self {
        Self::new_in(config, Handle::current())
    }

    /// Create an unattached coordinator that schedules work on `runtime`
    pub fn new_in(config: LabbableConfig, runtime: Handle) -> Self {
        let (deliveries, rx) = mpsc::unbounded_channel();
        runtime.spawn(deliver_batches(rx));
        Self {
            shared: Arc::new(Shared {
                config,
                runtime,
                deliveries,
                state: Mutex::new(State {
                    attachment: Attachment::Unattached,
                    immediate: WaitQueue::new(Interest::Immediate),
                    init: WaitQueue::new(Interest::Init),
                    init_flushed: false,
                }),
            }),
        }
    }

    /// Create a coordinator already attached to `resource`
    pub fn with_resource(
        config: LabbableConfig,
        resource: Arc<R>,
    ) -> Result<Self, AttachError<R::Error>> {
        let labbable = Self::new(config);
        labbable.attach(resource)?;
        Ok(labbable)
    }

    pub fn config(&self) -> &LabbableConfig {
        &self.shared.config
    }

    fn lock(&self) -> MutexGuard<'_, State<R>> {
        self.shared.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Bind the server. Allowed once per coordinator.
    ///
    /// Immediate waiters are released on the next turn. Init waiters are
    /// released on the turn after the server's init hook fires.
    pub fn attach(&self, resource: Arc<R>) -> Result<(), AttachError<R::Error>> {
        let mut state = self.lock();
        if state.resource().is_some() {
            tracing::warn!("attach called on an already attached labbable");
            return Err(AttachError::AlreadyAttached);
        }

        let flag = resource
            .readiness_flag(CACHE_SEGMENT)
            .map_err(AttachError::Host)?;
        resource
            .on_initialized(self.init_hook())
            .map_err(AttachError::Host)?;

        state.attachment = Attachment::Attached { resource, flag };
        let count = self.release(&mut state, Interest::Immediate);
        drop(state);

        tracing::debug!(count, "attached, flushing immediate waiters");
        Ok(())
    }

    /// Hook handed to the host: schedule the init flush, then unblock the host
    fn init_hook(&self) -> InitHook {
        let weak: Weak<Shared<R>> = Arc::downgrade(&self.shared);
        InitHook::new(move |next| {
            if let Some(shared) = weak.upgrade() {
                let runtime = shared.runtime.clone();
                let labbable = Labbable { shared };
                runtime.spawn(async move {
                    labbable.flush(Interest::Init);
                });
            }
            next.call();
        })
    }

    /// Future style wait: resolves with the server or the error
    pub fn wait(&self, options: WaitOptions) -> Ready<R> {
        let (completion, ready) = Completion::channel();
        self.submit(options, completion);
        ready
    }

    /// Callback style wait: `callback` runs exactly once with the outcome
    pub fn wait_with<F>(&self, options: WaitOptions, callback: F)
    where
        F: FnOnce(WaitResult<R>) + Send + 'static,
    {
        self.submit(options, Completion::callback(callback));
    }

    fn submit(&self, options: WaitOptions, completion: Completion<R>) {
        let interest = options.interest();
        let timeout = options
            .timeout
            .resolve(self.shared.config.effective_default_timeout());

        let mut state = self.lock();
        if interest == Interest::Init && !state.init_flushed && state.is_initialized() {
            // Ready before the hook's flush ran: earlier init waiters go first
            self.release(&mut state, Interest::Init);
        }
        if let Some(resource) = state.available(interest) {
            self.send(vec![Waiter::new(completion)], resource);
            drop(state);
            tracing::trace!(%interest, "server available, no wait");
            return;
        }

        let id = state.queue_mut(interest).push(Waiter::new(completion));
        if let Some(timeout) = timeout {
            let timer = self.arm_timer(interest, id, timeout);
            state.queue_mut(interest).arm(id, timer);
        }
        tracing::debug!(
            %interest,
            waiter = %id,
            timeout_ms = timeout.map(|t| t.as_millis() as u64),
            "queued waiter"
        );
    }

    fn arm_timer(&self, interest: Interest, id: WaiterId, timeout: Duration) -> AbortHandle {
        let labbable = self.clone();
        self.shared
            .runtime
            .spawn(async move {
                tokio::time::sleep(timeout).await;
                labbable.expire(interest, id, timeout);
            })
            .abort_handle()
    }

    fn expire(&self, interest: Interest, id: WaiterId, timeout: Duration) {
        let waiter = self.lock().queue_mut(interest).remove(id);
        // Already flushed: the flush delivered it
        let Some(waiter) = waiter else {
            tracing::trace!(%interest, waiter = %id, "timer fired after delivery");
            return;
        };

        let err = self.timeout_error(interest, timeout);
        tracing::warn!(%interest, waiter = %id, error = %err, "waiter timed out");
        waiter.resolve(Err(WaitError::TimedOut(err)));
    }

    fn timeout_error(&self, interest: Interest, timeout: Duration) -> TimeoutError {
        let config = &self.shared.config;
        let hint = match interest {
            Interest::Immediate => &config.attach_hint,
            Interest::Init => &config.init_hint,
        };
        TimeoutError {
            name: config.name.clone(),
            interest,
            timeout,
            hint: hint.clone(),
        }
    }

    /// Release every waiter queued for `interest`, oldest first
    ///
    /// Does nothing until a server is attached. Flushing the init queue also
    /// marks the server as initialized for later waiters. Released waiters
    /// are delivered on a later turn, after anything released before them.
    /// Returns the number of waiters released.
    pub fn flush(&self, interest: Interest) -> usize {
        let mut state = self.lock();
        let count = self.release(&mut state, interest);
        drop(state);

        tracing::debug!(%interest, count, "flushing waiters");
        count
    }

    /// Drain `interest` into the delivery task. Caller holds the state lock.
    fn release(&self, state: &mut State<R>, interest: Interest) -> usize {
        let Some(resource) = state.resource().cloned() else {
            return 0;
        };
        if interest == Interest::Init {
            state.init_flushed = true;
        }
        let batch = state.queue_mut(interest).drain();
        let count = batch.len();
        self.send(batch, resource);
        count
    }

    /// Queue a batch behind every earlier one. Must be called under the state lock.
    fn send(&self, batch: Vec<Waiter<R>>, resource: Arc<R>) {
        if batch.is_empty() {
            return;
        }
        // A closed channel drops the batch, which closes each waiter
        if self.shared.deliveries.send((batch, resource)).is_err() {
            tracing::debug!("delivery task stopped, closing waiters");
        }
    }

    /// Whether the attached server reports itself initialized
    pub fn is_ready(&self) -> bool {
        self.lock().is_initialized()
    }

    pub fn is_attached(&self) -> bool {
        self.lock().resource().is_some()
    }

    pub fn resource(&self) -> Option<Arc<R>> {
        self.lock().resource().cloned()
    }

    /// Number of waiters still queued for `interest`
    pub fn pending(&self, interest: Interest) -> usize {
        self.lock().queue_mut(interest).len()
    }
}

async fn deliver_batches<R>(mut rx: mpsc::UnboundedReceiver<Batch<R>>) {
    while let Some((batch, resource)) = rx.recv().await {
        for waiter in batch {
            waiter.resolve(Ok(Arc::clone(&resource)));
        }
    }
}

impl<R: Resource> fmt::Debug for Labbable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut state = self.lock();
        let attached = state.resource().is_some();
        let immediate = state.queue_mut(Interest::Immediate).len();
        let init = state.queue_mut(Interest::Init).len();
        f.debug_struct("Labbable")
            .field("name", &self.shared.config.name)
            .field("attached", &attached)
            .field("immediate", &immediate)
            .field("init", &init)
            .finish()
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
