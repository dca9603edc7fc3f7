// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Keeps downloaded copies of remote sources fresh

use cw_adapters::SourceFetcher;
use cw_core::{Download, EventSender, PipelineEvent, Status};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Downloads every mapped URL to its destination, once or on an interval
pub struct DownloadScheduler<F> {
    fetcher: F,
    downloads: Vec<Download>,
    interval: Duration,
    events: EventSender,
}

impl<F: SourceFetcher> DownloadScheduler<F> {
    pub fn new(fetcher: F, downloads: Vec<Download>, interval: Duration, events: EventSender) -> Self {
        Self {
            fetcher,
            downloads,
            interval,
            events,
        }
    }

    /// One attempt per URL, in mapping order. Returns how many succeeded.
    pub async fn pass(&self) -> usize {
        self.pass_until(&CancellationToken::new()).await
    }

    /// Repeat passes until `stop` is cancelled
    pub async fn run(self, stop: CancellationToken) {
        tracing::info!(sources = self.downloads.len(), "download worker started");
        while !stop.is_cancelled() {
            let ok = self.pass_until(&stop).await;
            tracing::debug!(ok, total = self.downloads.len(), "download pass finished");

            tokio::select! {
                _ = stop.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
        tracing::info!("download worker stopped");
    }

    async fn pass_until(&self, stop: &CancellationToken) -> usize {
        let mut ok = 0;
        for download in &self.downloads {
            let body = tokio::select! {
                _ = stop.cancelled() => break,
                body = self.fetcher.fetch(&download.url) => body,
            };
            let status = self.store(download, body).await;
            if status == Status::Ok {
                ok += 1;
            }
            self.events.emit(PipelineEvent::Download(status));
        }
        ok
    }

    /// Write a fetched body over the destination. A failed or empty
    /// download leaves the previous copy in place.
    async fn store(
        &self,
        download: &Download,
        body: Result<Vec<u8>, cw_adapters::FetchError>,
    ) -> Status {
        let body = match body {
            Ok(body) if !body.is_empty() => body,
            Ok(_) => {
                tracing::warn!(url = %download.url, "empty download");
                return Status::Error;
            }
            Err(e) => {
                tracing::warn!(url = %download.url, error = %e, "download failed");
                return Status::Error;
            }
        };

        match tokio::fs::write(&download.destination, &body).await {
            Ok(()) => Status::Ok,
            Err(e) => {
                tracing::warn!(
                    destination = %download.destination.display(),
                    error = %e,
                    "failed to write download"
                );
                Status::Error
            }
        }
    }
}

#[cfg(test)]
#[path = "download_tests.rs"]
mod tests;
