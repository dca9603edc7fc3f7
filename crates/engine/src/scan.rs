// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watches the combined file and checks its games for claims
//!
//! The scheduler polls the combined file's size. Whenever it is non-zero and
//! differs from the size seen at the end of the previous pass, a full read
//! pass runs on the blocking pool while holding the combined-file lock.
//! New claims are streamed out as they are found.

use crate::{CombinedLock, EngineError};
use cw_core::{ClaimRegistry, EventSender, GameReader, PipelineEvent, Status};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Scanner lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Waiting for the combined file to change
    Idle,
    /// Reading the combined file
    Active,
    Stopped,
}

/// Counters for one read pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Size of the combined file that was read
    pub size: u64,
    pub games: usize,
    pub checked: usize,
    pub skipped_live: usize,
    pub skipped_suppressed: usize,
    pub claims: usize,
    /// The stop signal ended the pass early
    pub cancelled: bool,
}

/// One synchronous pass over a stream of game records
pub struct ScanPass<'a> {
    registry: &'a mut ClaimRegistry,
    events: &'a EventSender,
    live_only: bool,
    stop: &'a CancellationToken,
}

impl<'a> ScanPass<'a> {
    pub fn new(
        registry: &'a mut ClaimRegistry,
        events: &'a EventSender,
        live_only: bool,
        stop: &'a CancellationToken,
    ) -> Self {
        Self {
            registry,
            events,
            live_only,
            stop,
        }
    }

    /// Check every game until end of input, a read error, or the stop signal
    pub fn run<R: Read>(self, mut reader: GameReader<R>) -> PassSummary {
        let mut summary = PassSummary::default();
        loop {
            if self.stop.is_cancelled() {
                summary.cancelled = true;
                break;
            }

            let game = match reader.next_game() {
                Ok(Some(game)) => game,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(games = summary.games, error = %e, "read pass ended early");
                    break;
                }
            };
            summary.games += 1;

            if self.live_only && !game.is_in_progress() {
                summary.skipped_live += 1;
                continue;
            }
            if self.registry.is_suppressed(&game.players()) {
                summary.skipped_suppressed += 1;
                continue;
            }

            summary.checked += 1;
            for entry in self.registry.check_game(&game) {
                tracing::info!(claim = %entry, "claim found");
                summary.claims += 1;
                self.events.emit(PipelineEvent::Claim(entry));
            }
        }
        summary
    }
}

fn scan_file(
    path: &Path,
    registry: &mut ClaimRegistry,
    events: &EventSender,
    live_only: bool,
    stop: &CancellationToken,
) -> std::io::Result<PassSummary> {
    let size = std::fs::metadata(path)?.len();
    let reader = GameReader::open(path)?;
    let mut summary = ScanPass::new(registry, events, live_only, stop).run(reader);
    summary.size = size;
    Ok(summary)
}

/// Polls the combined file and runs read passes when it changes
pub struct ScanScheduler {
    combined: PathBuf,
    lock: CombinedLock,
    registry: ClaimRegistry,
    live_only: Arc<AtomicBool>,
    events: EventSender,
    interval: Duration,
    start_delay: Duration,
    last_size: u64,
    state: ScanState,
}

impl ScanScheduler {
    pub fn new(
        combined: PathBuf,
        lock: CombinedLock,
        registry: ClaimRegistry,
        live_only: Arc<AtomicBool>,
        events: EventSender,
    ) -> Self {
        Self {
            combined,
            lock,
            registry,
            live_only,
            events,
            interval: Duration::from_secs(4),
            start_delay: Duration::ZERO,
            last_size: 0,
            state: ScanState::Idle,
        }
    }

    /// Poll interval and the offset before the first poll
    pub fn with_timing(mut self, interval: Duration, start_delay: Duration) -> Self {
        self.interval = interval;
        self.start_delay = start_delay;
        self
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Size of the combined file at the end of the last pass
    pub fn last_size(&self) -> u64 {
        self.last_size
    }

    pub fn registry(&self) -> &ClaimRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> ClaimRegistry {
        self.registry
    }

    /// Run a pass if the combined file changed since the last one
    pub async fn poll(
        &mut self,
        stop: &CancellationToken,
    ) -> Result<Option<PassSummary>, EngineError> {
        let size = match tokio::fs::metadata(&self.combined).await {
            Ok(meta) => meta.len(),
            Err(_) => 0,
        };
        if size == 0 || size == self.last_size {
            return Ok(None);
        }

        self.enter(ScanState::Active);
        let result = self.read_pass(stop).await;
        if let Ok(summary) = &result {
            self.last_size = summary.size;
            tracing::debug!(
                games = summary.games,
                checked = summary.checked,
                skipped_live = summary.skipped_live,
                skipped_suppressed = summary.skipped_suppressed,
                claims = summary.claims,
                "scan pass finished"
            );
        }
        self.enter(ScanState::Idle);
        result.map(Some)
    }

    /// Poll until `stop` is cancelled, then hand the scheduler back
    pub async fn run(mut self, stop: CancellationToken) -> Self {
        tracing::info!(path = %self.combined.display(), "scan worker started");
        tokio::select! {
            _ = stop.cancelled() => {}
            _ = tokio::time::sleep(self.start_delay) => {}
        }

        while !stop.is_cancelled() {
            if let Err(e) = self.poll(&stop).await {
                tracing::warn!(error = %e, "scan pass failed");
            }

            tokio::select! {
                _ = stop.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        self.state = ScanState::Stopped;
        tracing::info!("scan worker stopped");
        self
    }

    async fn read_pass(&mut self, stop: &CancellationToken) -> Result<PassSummary, EngineError> {
        let guard = self.lock.clone().lock_owned().await;
        let path = self.combined.clone();
        let events = self.events.clone();
        let live_only = self.live_only.load(Ordering::Relaxed);
        let stop = stop.clone();
        let mut registry = std::mem::take(&mut self.registry);

        let joined = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            let result = scan_file(&path, &mut registry, &events, live_only, &stop);
            (registry, result)
        })
        .await;

        match joined {
            Ok((registry, result)) => {
                self.registry = registry;
                Ok(result?)
            }
            Err(e) => {
                tracing::error!(error = %e, "scan task failed, registry lost");
                Err(e.into())
            }
        }
    }

    fn enter(&mut self, state: ScanState) {
        if self.state == state {
            return;
        }
        self.state = state;
        let status = match state {
            ScanState::Active => Status::Active,
            ScanState::Idle => Status::Wait,
            ScanState::Stopped => Status::Stop,
        };
        tracing::info!(%status, "scan state changed");
        self.events.emit(PipelineEvent::Scan(status));
    }
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
