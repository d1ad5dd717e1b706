// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! labbable - watch a server get attached and initialized

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{config, simulate};
use labbable_core::LabbableConfig;
use output::OutputFormat;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "labbable",
    version,
    about = "Hand a server to waiters once it is attached and initialized"
)]
struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run waiters against a simulated server lifecycle
    Simulate(simulate::SimulateArgs),
    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();
    let labbable_config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Simulate(args) => {
            let report = simulate::run(args, labbable_config).await?;
            output::print_list(&report.outcomes, cli.format);
            if !report.all_ready() {
                std::process::exit(1);
            }
        }
        Commands::Config => config::show(&labbable_config, cli.format),
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<LabbableConfig> {
    match path {
        Some(path) => LabbableConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(LabbableConfig::default()),
    }
}

/// Log to stderr, filtered by RUST_LOG (default: warn)
fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
