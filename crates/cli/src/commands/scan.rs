// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scan command: watch the sources and print claims as they appear

use crate::error::CwError;
use crate::output::EventRenderer;
use anyhow::Result;
use clap::Args;
use cw_adapters::{HttpFetcher, TracedFetcher};
use cw_core::{DataDir, EventSender, PipelineEvent, Settings, SourceList};
use cw_engine::LifecycleCoordinator;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;

#[derive(Args)]
pub struct ScanArgs {
    /// Only check games that are still being played
    #[arg(long)]
    live: bool,

    /// Pause between passes (e.g. "4s", "500ms")
    #[arg(long, value_parser = humantime::parse_duration)]
    interval: Option<Duration>,

    /// Run a single download, merge and scan pass, then exit
    #[arg(long)]
    once: bool,
}

pub async fn handle(args: ScanArgs, data_dir: DataDir, mut settings: Settings) -> Result<()> {
    if args.live {
        settings.live_only = true;
    }
    if let Some(interval) = args.interval {
        settings.poll_interval = interval;
    }

    let sources = SourceList::load(&data_dir.sources());
    if sources.is_empty() {
        return Err(CwError::no_sources(&data_dir.sources()).into());
    }

    let fetcher = TracedFetcher::new(HttpFetcher::new(
        settings.check_timeout,
        settings.fetch_timeout,
    ));
    let (events, rx) = EventSender::channel();
    let renderer = tokio::spawn(render(rx));
    let mut coordinator = LifecycleCoordinator::new(fetcher, data_dir, settings, events);

    let validated = coordinator.validate(&sources).await;
    if !validated.has_valid_sources() {
        drop(coordinator);
        let _ = renderer.await;
        return Err(CwError::no_valid_sources().into());
    }

    if args.once {
        let summary = coordinator.run_once(&sources, &validated).await?;
        drop(coordinator);
        let _ = renderer.await;
        match summary {
            Some(summary) => println!(
                "{} games read, {} checked, {} claims",
                summary.games, summary.checked, summary.claims
            ),
            None => println!("nothing to scan"),
        }
        return Ok(());
    }

    coordinator.prepare(&sources, &validated).await?;

    let interrupted = CancellationToken::new();
    let token = interrupted.clone();
    ctrlc::set_handler(move || token.cancel())?;

    coordinator.start(&validated)?;
    tracing::info!(
        files = validated.filepaths.len(),
        downloads = validated.downloads.len(),
        "watching"
    );
    println!("Watching {} files (Ctrl-C to stop)", validated.filepaths.len());

    interrupted.cancelled().await;
    tracing::info!("interrupted, stopping");
    coordinator.stop().await;

    drop(coordinator);
    let _ = renderer.await;
    Ok(())
}

/// Print every event until the coordinator drops its sender
async fn render(mut rx: UnboundedReceiver<PipelineEvent>) {
    let mut renderer = EventRenderer::new();
    while let Some(event) = rx.recv().await {
        for line in renderer.render(event) {
            println!("{}", line);
        }
    }
}
