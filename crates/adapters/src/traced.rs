// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::fetch::{has_game_extension, FetchError, SourceFetcher};
use async_trait::async_trait;
use tracing::Instrument;

/// Wrapper that adds tracing to any SourceFetcher
#[derive(Clone)]
pub struct TracedFetcher<F> {
    inner: F,
}

impl<F> TracedFetcher<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

#[async_trait]
impl<F: SourceFetcher> SourceFetcher for TracedFetcher<F> {
    async fn check(&self, url: &str) -> bool {
        let span = tracing::info_span!("fetch.check", url);
        async {
            if !has_game_extension(url) {
                tracing::info!("rejected: not a game file");
                return false;
            }

            let start = std::time::Instant::now();
            let ok = self.inner.check(url).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            if ok {
                tracing::info!(elapsed_ms, "reachable");
            } else {
                tracing::warn!(elapsed_ms, "unreachable");
            }
            ok
        }
        .instrument(span)
        .await
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let span = tracing::info_span!("fetch.get", url);
        async {
            tracing::debug!("downloading");

            let start = std::time::Instant::now();
            let result = self.inner.fetch(url).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(body) => tracing::debug!(bytes = body.len(), elapsed_ms, "downloaded"),
                Err(e) => tracing::warn!(elapsed_ms, error = %e, "download failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
