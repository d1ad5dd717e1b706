// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `labbable simulate`: queue waiters, then attach and initialize a server on a schedule

use anyhow::{bail, Result};
use clap::Args;
use labbable_adapters::{Server, TracedResource};
use labbable_core::{Labbable, LabbableConfig, Timeout, WaitError, WaitOptions};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Number of waiters to register before the server exists
    #[arg(long, default_value = "3")]
    pub waiters: usize,

    /// Wait only for attachment, not initialization
    #[arg(long)]
    pub immediate: bool,

    /// Per-waiter timeout ("never" to wait forever; default from config)
    #[arg(long, value_parser = parse_delay)]
    pub timeout: Option<Delay>,

    /// Delay before attaching the server ("never" to skip)
    #[arg(long, default_value = "0ms", value_parser = parse_delay)]
    pub attach_after: Delay,

    /// Delay after attaching before initializing the server ("never" to skip)
    #[arg(long, default_value = "0ms", value_parser = parse_delay)]
    pub init_after: Delay,
}

/// A duration, or never
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delay {
    After(Duration),
    Never,
}

impl Delay {
    fn duration(self) -> Option<Duration> {
        match self {
            Delay::After(d) => Some(d),
            Delay::Never => None,
        }
    }
}

pub fn parse_delay(s: &str) -> Result<Delay, String> {
    if s.eq_ignore_ascii_case("never") {
        return Ok(Delay::Never);
    }
    humantime::parse_duration(s)
        .map(Delay::After)
        .map_err(|e| format!("invalid duration '{}': {}", s, e))
}

impl SimulateArgs {
    fn options(&self) -> WaitOptions {
        let timeout = match self.timeout {
            None => Timeout::Default,
            Some(Delay::Never) => Timeout::Never,
            Some(Delay::After(d)) => Timeout::After(d),
        };
        WaitOptions {
            immediate: self.immediate,
            timeout,
        }
    }

    /// Whether the waiters could ever be satisfied by this schedule
    fn server_arrives(&self) -> bool {
        self.attach_after != Delay::Never && (self.immediate || self.init_after != Delay::Never)
    }
}

/// How one waiter was resolved
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub waiter: usize,
    pub elapsed_ms: u64,
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            None => write!(f, "waiter {}: ready after {}ms", self.waiter, self.elapsed_ms),
            Some(error) => write!(
                f,
                "waiter {}: failed after {}ms: {}",
                self.waiter, self.elapsed_ms, error
            ),
        }
    }
}

/// Outcomes in delivery order
#[derive(Debug, Default)]
pub struct Report {
    pub outcomes: Vec<Outcome>,
}

impl Report {
    pub fn all_ready(&self) -> bool {
        self.outcomes.iter().all(|o| o.ready)
    }
}

pub async fn run(args: SimulateArgs, config: LabbableConfig) -> Result<Report> {
    let options = args.options();
    let bounded = options
        .timeout
        .resolve(config.effective_default_timeout())
        .is_some();
    if !bounded && !args.server_arrives() {
        bail!("waiters have no timeout and the server never becomes available; they would wait forever");
    }

    let server = Arc::new(TracedResource::new("server", Server::new("server")));
    let labbable = Labbable::new(config);
    let start = Instant::now();

    let (tx, mut rx) = mpsc::unbounded_channel();
    for waiter in 0..args.waiters {
        let tx = tx.clone();
        labbable.wait_with(options, move |result| {
            let error = result.err().map(|e: WaitError| e.to_string());
            let _ = tx.send(Outcome {
                waiter,
                elapsed_ms: start.elapsed().as_millis() as u64,
                ready: error.is_none(),
                error,
            });
        });
    }
    drop(tx);

    let lifecycle = tokio::spawn(drive_server(
        labbable.clone(),
        server,
        args.attach_after.duration(),
        args.init_after.duration(),
    ));

    let mut report = Report::default();
    while report.outcomes.len() < args.waiters {
        match rx.recv().await {
            Some(outcome) => report.outcomes.push(outcome),
            None => break,
        }
    }

    if lifecycle.is_finished() {
        lifecycle.await??;
    } else {
        lifecycle.abort();
    }
    Ok(report)
}

async fn drive_server(
    labbable: Labbable<TracedResource<Server>>,
    server: Arc<TracedResource<Server>>,
    attach_after: Option<Duration>,
    init_after: Option<Duration>,
) -> Result<()> {
    let Some(attach_after) = attach_after else {
        return Ok(());
    };
    tokio::time::sleep(attach_after).await;
    labbable.attach(Arc::clone(&server))?;
    tracing::info!("server attached");

    let Some(init_after) = init_after else {
        return Ok(());
    };
    tokio::time::sleep(init_after).await;
    server.inner().initialize().await?;
    Ok(())
}

#[cfg(test)]
#[path = "simulate_tests.rs"]
mod tests;
