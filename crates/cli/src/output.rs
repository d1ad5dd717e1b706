// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text/JSON rendering for command results

use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Render one value; JSON is pretty-printed
pub fn render<T: Serialize + Display + ?Sized>(value: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => value.to_string(),
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
        }
    }
}

/// Render items one per line as text, or as a single JSON array
pub fn render_list<T: Serialize + Display>(items: &[T], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(items)
            .unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}")),
    }
}

pub fn print<T: Serialize + Display>(value: &T, format: OutputFormat) {
    println!("{}", render(value, format));
}

pub fn print_list<T: Serialize + Display>(items: &[T], format: OutputFormat) {
    if items.is_empty() && format == OutputFormat::Text {
        return;
    }
    println!("{}", render_list(items, format));
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
