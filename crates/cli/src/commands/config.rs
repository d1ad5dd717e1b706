// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `labbable config`

use crate::output::{self, OutputFormat};
use labbable_core::LabbableConfig;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

struct ConfigView<'a>(&'a LabbableConfig);

/// JSON shape: a disabled default timeout is `null`, as text shows `never`
#[derive(Serialize)]
struct ConfigJson<'a> {
    name: &'a str,
    #[serde(with = "humantime_serde")]
    default_timeout: Option<Duration>,
    attach_hint: &'a str,
    init_hint: &'a str,
}

impl Serialize for ConfigView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ConfigJson {
            name: &self.0.name,
            default_timeout: self.0.effective_default_timeout(),
            attach_hint: &self.0.attach_hint,
            init_hint: &self.0.init_hint,
        }
        .serialize(serializer)
    }
}

impl fmt::Display for ConfigView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let default_timeout = match self.0.effective_default_timeout() {
            Some(timeout) => humantime::format_duration(timeout).to_string(),
            None => "never".to_string(),
        };
        writeln!(f, "name:            {}", self.0.name)?;
        writeln!(f, "default_timeout: {}", default_timeout)?;
        writeln!(f, "attach_hint:     {}", self.0.attach_hint)?;
        write!(f, "init_hint:       {}", self.0.init_hint)
    }
}

pub fn show(config: &LabbableConfig, format: OutputFormat) {
    output::print(&ConfigView(config), format);
}
