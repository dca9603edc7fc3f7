// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake fetcher for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{has_game_extension, FetchError, SourceFetcher};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Recorded fetcher call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchCall {
    Check { url: String },
    Fetch { url: String },
}

/// In-memory fetcher serving bodies registered with [`FakeFetcher::serve`]
#[derive(Clone, Default)]
pub struct FakeFetcher {
    bodies: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    calls: Arc<Mutex<Vec<FetchCall>>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `url` reachable, serving `body`
    pub fn serve(&self, url: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.bodies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(url.into(), body.into());
    }

    /// Make `url` unreachable again
    pub fn take_down(&self, url: &str) {
        self.bodies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(url);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of downloads attempted for `url`
    pub fn fetch_count(&self, url: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, FetchCall::Fetch { url: u } if u == url))
            .count()
    }

    fn record(&self, call: FetchCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }

    fn body(&self, url: &str) -> Option<Vec<u8>> {
        self.bodies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(url)
            .cloned()
    }
}

#[async_trait]
impl SourceFetcher for FakeFetcher {
    async fn check(&self, url: &str) -> bool {
        self.record(FetchCall::Check {
            url: url.to_string(),
        });
        has_game_extension(url) && self.body(url).is_some()
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.record(FetchCall::Fetch {
            url: url.to_string(),
        });
        self.body(url)
            .ok_or_else(|| FetchError::Request(format!("{url}: connection refused")))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
