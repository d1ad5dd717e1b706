// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plugin glue: expose a coordinator as decorations on the host server

use crate::config::LabbableConfig;
use crate::coordinator::Labbable;
use crate::error::AttachError;
use crate::options::WaitOptions;
use crate::resource::Resource;
use crate::waiter::{Ready, WaitResult};
use std::sync::Arc;

/// Package metadata reported at registration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PluginAttributes {
    pub name: &'static str,
    pub version: &'static str,
}

pub struct Plugin;

impl Plugin {
    pub fn attributes() -> PluginAttributes {
        PluginAttributes {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    /// Register against `server` with the default configuration
    pub fn register<R: Resource>(
        server: &Arc<R>,
    ) -> Result<Decorations<R>, AttachError<R::Error>> {
        Self::register_with(server, LabbableConfig::default())
    }

    pub fn register_with<R: Resource>(
        server: &Arc<R>,
        config: LabbableConfig,
    ) -> Result<Decorations<R>, AttachError<R::Error>> {
        let attributes = Self::attributes();
        tracing::info!(
            plugin = attributes.name,
            version = attributes.version,
            "registering"
        );
        let labbable = Labbable::with_resource(config, Arc::clone(server))?;
        Ok(Decorations { labbable })
    }
}

/// Server decorations backed by a coordinator pre-bound to the server
pub struct Decorations<R: Resource> {
    labbable: Labbable<R>,
}

impl<R: Resource> Clone for Decorations<R> {
    fn clone(&self) -> Self {
        Self {
            labbable: self.labbable.clone(),
        }
    }
}

impl<R: Resource> std::fmt::Debug for Decorations<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decorations")
            .field("labbable", &self.labbable)
            .finish()
    }
}

impl<R: Resource> Decorations<R> {
    pub fn is_initialized(&self) -> bool {
        self.labbable.is_ready()
    }

    pub fn labbable_ready(&self, options: WaitOptions) -> Ready<R> {
        self.labbable.wait(options)
    }

    pub fn labbable_ready_with<F>(&self, options: WaitOptions, callback: F)
    where
        F: FnOnce(WaitResult<R>) + Send + 'static,
    {
        self.labbable.wait_with(options, callback)
    }

    pub fn labbable(&self) -> &Labbable<R> {
        &self.labbable
    }
}

#[cfg(test)]
#[path = "plugin_tests.rs"]
mod tests;
