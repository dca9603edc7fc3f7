// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Starts and stops the download, merge and scan workers as one session

use crate::download::DownloadScheduler;
use crate::merge::{MergeScheduler, MergeSummary};
use crate::scan::{PassSummary, ScanScheduler};
use crate::validate::validate_sources;
use crate::{CombinedLock, EngineError};
use cw_adapters::SourceFetcher;
use cw_core::{
    ClaimRegistry, DataDir, EventSender, PipelineEvent, Settings, SourceList, Status,
    ValidatedSources,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handles of one running session
struct Session {
    stop: CancellationToken,
    download: Option<JoinHandle<()>>,
    merge: JoinHandle<()>,
    scan: JoinHandle<ScanScheduler>,
}

/// Owns the shared lock, the stop signal and the claim registry
pub struct LifecycleCoordinator<F> {
    fetcher: F,
    data_dir: DataDir,
    settings: Settings,
    live_only: Arc<AtomicBool>,
    events: EventSender,
    lock: CombinedLock,
    /// Handed to the scan worker for the length of a session
    registry: ClaimRegistry,
    session: Option<Session>,
}

impl<F: SourceFetcher> LifecycleCoordinator<F> {
    pub fn new(fetcher: F, data_dir: DataDir, settings: Settings, events: EventSender) -> Self {
        Self {
            fetcher,
            data_dir,
            live_only: Arc::new(AtomicBool::new(settings.live_only)),
            settings,
            events,
            lock: Arc::new(tokio::sync::Mutex::new(())),
            registry: ClaimRegistry::new(),
            session: None,
        }
    }

    /// Shared live-only switch, read by the scanner on every pass
    pub fn live_only(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.live_only)
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// The registry between sessions. Always empty once `stop` returns.
    pub fn registry(&self) -> &ClaimRegistry {
        &self.registry
    }

    pub async fn validate(&self, sources: &SourceList) -> ValidatedSources {
        validate_sources(sources, &self.fetcher, &self.data_dir, &self.events).await
    }

    /// Save the source list, then download and merge once so the combined
    /// file exists before the first scan
    pub async fn prepare(
        &self,
        sources: &SourceList,
        validated: &ValidatedSources,
    ) -> Result<MergeSummary, EngineError> {
        self.data_dir.ensure()?;
        sources.save(&self.data_dir.sources())?;

        if validated.has_downloads() {
            let ok = self.downloader(validated).pass().await;
            tracing::info!(ok, total = validated.downloads.len(), "initial download");
        }
        self.merger(validated).pass().await
    }

    /// Launch the workers. A no-op while a session is running.
    pub fn start(&mut self, validated: &ValidatedSources) -> Result<(), EngineError> {
        if self.is_running() {
            tracing::debug!("start ignored, session already running");
            return Ok(());
        }
        if !validated.has_valid_sources() {
            return Err(EngineError::NoValidSources);
        }
        self.data_dir.ensure()?;

        let stop = CancellationToken::new();
        let download = validated
            .has_downloads()
            .then(|| tokio::spawn(self.downloader(validated).run(stop.clone())));
        let merge = tokio::spawn(self.merger(validated).run(stop.clone()));
        let scanner = ScanScheduler::new(
            self.data_dir.combined(),
            Arc::clone(&self.lock),
            std::mem::take(&mut self.registry),
            self.live_only(),
            self.events.clone(),
        )
        .with_timing(self.settings.poll_interval, self.settings.scan_start_delay);
        let scan = tokio::spawn(scanner.run(stop.clone()));

        tracing::info!(
            files = validated.filepaths.len(),
            downloads = validated.downloads.len(),
            "session started"
        );
        self.session = Some(Session {
            stop,
            download,
            merge,
            scan,
        });
        Ok(())
    }

    /// Signal every worker, wait for all of them, then clear the registry.
    /// A no-op when nothing is running.
    pub async fn stop(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.events.emit(PipelineEvent::ControlsDisabled);
        session.stop.cancel();

        if let Some(download) = session.download {
            if let Err(e) = download.await {
                tracing::error!(error = %e, "download worker failed");
            }
        }
        // Scan first: it may hold the lock the merge worker waits on
        self.registry = match session.scan.await {
            Ok(scanner) => scanner.into_registry(),
            Err(e) => {
                tracing::error!(error = %e, "scan worker failed");
                ClaimRegistry::new()
            }
        };
        if let Err(e) = session.merge.await {
            tracing::error!(error = %e, "merge worker failed");
        }

        self.registry.reset();
        tracing::info!("session stopped");
        self.events.emit(PipelineEvent::Download(Status::Stop));
        self.events.emit(PipelineEvent::Scan(Status::Stop));
        self.events.emit(PipelineEvent::ControlsEnabled);
    }

    /// A single download, merge and scan pass without starting workers
    pub async fn run_once(
        &mut self,
        sources: &SourceList,
        validated: &ValidatedSources,
    ) -> Result<Option<PassSummary>, EngineError> {
        if self.is_running() {
            tracing::debug!("single pass ignored, session already running");
            return Ok(None);
        }
        if !validated.has_valid_sources() {
            return Err(EngineError::NoValidSources);
        }
        self.prepare(sources, validated).await?;

        let mut scanner = ScanScheduler::new(
            self.data_dir.combined(),
            Arc::clone(&self.lock),
            std::mem::take(&mut self.registry),
            self.live_only(),
            self.events.clone(),
        );
        let summary = scanner.poll(&CancellationToken::new()).await;
        self.registry = scanner.into_registry();
        self.registry.reset();
        summary
    }

    fn downloader(&self, validated: &ValidatedSources) -> DownloadScheduler<F> {
        DownloadScheduler::new(
            self.fetcher.clone(),
            validated.downloads.clone(),
            self.settings.poll_interval,
            self.events.clone(),
        )
    }

    fn merger(&self, validated: &ValidatedSources) -> MergeScheduler {
        MergeScheduler::new(
            validated.filepaths.clone(),
            self.data_dir.combined(),
            Arc::clone(&self.lock),
            self.settings.poll_interval,
        )
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
