// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP fetcher backed by ureq

use super::{has_game_extension, FetchError, SourceFetcher};
use async_trait::async_trait;
use std::time::Duration;
use ureq::Agent;

/// Largest body accepted from a remote source
const MAX_BODY_BYTES: u64 = 256 * 1024 * 1024;

/// Blocking HTTP client run on the blocking pool
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    probe: Agent,
    download: Agent,
}

impl HttpFetcher {
    pub fn new(check_timeout: Duration, fetch_timeout: Duration) -> Self {
        Self {
            probe: agent(check_timeout),
            download: agent(fetch_timeout),
        }
    }
}

fn agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .into()
}

#[async_trait]
impl SourceFetcher for HttpFetcher {
    async fn check(&self, url: &str) -> bool {
        if !has_game_extension(url) {
            return false;
        }
        let agent = self.probe.clone();
        let url = url.to_string();
        let probe = tokio::task::spawn_blocking(move || agent.get(&url).call().map(|_| ()));
        match probe.await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "probe failed");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "probe task failed");
                false
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let agent = self.download.clone();
        let url = url.to_string();
        tokio::task::spawn_blocking(move || {
            let mut response = agent
                .get(&url)
                .call()
                .map_err(|e| FetchError::Request(e.to_string()))?;
            response
                .body_mut()
                .with_config()
                .limit(MAX_BODY_BYTES)
                .read_to_vec()
                .map_err(|e| FetchError::Body(e.to_string()))
        })
        .await
        .map_err(|e| FetchError::Task(e.to_string()))?
    }
}
