// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! labbable-core: hand a shared server to its waiters once it is ready
//!
//! This crate provides:
//! - The `Labbable` coordinator: a one-shot attachment gate plus two FIFO wait
//!   queues (attached, and attached-and-initialized) with per-waiter timeouts
//! - The `Resource` trait a host server implements to be attached
//! - Callback and future consumption over a single deliver-once completion
//! - Plugin glue exposing the coordinator as server decorations

pub mod config;
pub mod coordinator;
pub mod error;
pub mod options;
pub mod plugin;
pub mod queue;
pub mod resource;
pub mod waiter;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

// Re-exports
pub use config::LabbableConfig;
pub use coordinator::Labbable;
pub use error::{AttachError, ConfigError, Interest, TimeoutError, WaitError};
pub use options::{Timeout, WaitOptions};
pub use plugin::{Decorations, Plugin, PluginAttributes};
pub use queue::{WaitQueue, WaiterId};
pub use resource::{InitHook, Next, ReadinessFlag, Resource};
pub use waiter::{Completion, Ready};

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeFlag, FakeResource, FakeResourceError};
