// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Probe a single remote source

use anyhow::Result;
use clap::Args;
use cw_adapters::{HttpFetcher, SourceFetcher, TracedFetcher};
use cw_core::Settings;
use std::process::ExitCode;

#[derive(Args)]
pub struct CheckArgs {
    /// URL of a .pgn file
    pub url: String,
}

pub async fn handle(args: CheckArgs, settings: &Settings) -> Result<ExitCode> {
    let fetcher = TracedFetcher::new(HttpFetcher::new(
        settings.check_timeout,
        settings.fetch_timeout,
    ));

    if fetcher.check(&args.url).await {
        println!("ok");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("error");
        Ok(ExitCode::FAILURE)
    }
}
