// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concatenates all sources into the combined file

use crate::{CombinedLock, EngineError};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Separator placed between two sources in the combined file
pub const SOURCE_DELIMITER: &[u8] = b"\n\n";

/// What one merge pass wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeSummary {
    pub files: usize,
    pub bytes: usize,
}

/// Rewrites the combined file from the ordered source files
pub struct MergeScheduler {
    filepaths: Vec<PathBuf>,
    combined: PathBuf,
    lock: CombinedLock,
    interval: Duration,
}

impl MergeScheduler {
    pub fn new(
        filepaths: Vec<PathBuf>,
        combined: PathBuf,
        lock: CombinedLock,
        interval: Duration,
    ) -> Self {
        Self {
            filepaths,
            combined,
            lock,
            interval,
        }
    }

    /// Read every source in order and replace the combined file with their
    /// concatenation. Sources that cannot be read are skipped.
    pub async fn pass(&self) -> Result<MergeSummary, EngineError> {
        let mut data = Vec::new();
        let mut files = 0;
        for path in &self.filepaths {
            let contents = match tokio::fs::read(path).await {
                Ok(contents) => contents,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(path = %path.display(), "source missing, skipped");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "source unreadable, skipped");
                    continue;
                }
            };
            if files > 0 {
                data.extend_from_slice(SOURCE_DELIMITER);
            }
            data.extend_from_slice(&contents);
            files += 1;
        }

        let _guard = self.lock.lock().await;
        tokio::fs::write(&self.combined, &data).await?;

        Ok(MergeSummary {
            files,
            bytes: data.len(),
        })
    }

    /// Repeat passes until `stop` is cancelled
    pub async fn run(self, stop: CancellationToken) {
        tracing::info!(sources = self.filepaths.len(), "merge worker started");
        while !stop.is_cancelled() {
            match self.pass().await {
                Ok(summary) => {
                    tracing::debug!(files = summary.files, bytes = summary.bytes, "merged")
                }
                Err(e) => tracing::warn!(error = %e, "merge failed"),
            }

            tokio::select! {
                _ = stop.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
        tracing::info!("merge worker stopped");
    }
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
