// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! cw - claimwatch CLI
//!
//! Watches chess game sources and reports positions where a draw can be
//! claimed.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, scan, sources};
use cw_core::{DataDir, Settings};
use error::CwError;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "cw",
    version,
    about = "claimwatch - spot claimable draws in live chess games"
)]
struct Cli {
    /// Mirror logs to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage game sources
    Sources(sources::SourcesArgs),
    /// Check whether a remote source is reachable
    Check(check::CheckArgs),
    /// Watch the sources and report draw claims
    Scan(scan::ScanArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<CwError>() {
                Some(err) => eprint!("{}", err),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let data_dir = DataDir::resolve();
    data_dir
        .ensure()
        .map_err(|e| CwError::data_dir_unusable(data_dir.root(), e))?;
    let _log_guard = setup_logging(&data_dir, cli.verbose);
    let settings = Settings::load(&data_dir.settings())?;

    match cli.command {
        Commands::Sources(args) => sources::handle(args, &data_dir)?,
        Commands::Check(args) => return check::handle(args, &settings).await,
        Commands::Scan(args) => scan::handle(args, data_dir, settings).await?,
    }
    Ok(ExitCode::SUCCESS)
}

fn setup_logging(
    data_dir: &DataDir,
    verbose: bool,
) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let file_appender = tracing_appender::rolling::never(data_dir.root(), cw_core::paths::LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr = verbose.then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .with(stderr)
        .init();

    guard
}
