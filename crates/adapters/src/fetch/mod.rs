// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote game source fetching

mod http;

pub use http::HttpFetcher;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeFetcher, FetchCall};

use async_trait::async_trait;
use thiserror::Error;

/// File extension a remote source must carry
pub const GAME_EXTENSION: &str = ".pgn";

/// Errors from fetch operations
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("not a game file: {0}")]
    NotGameFile(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("failed to read response: {0}")]
    Body(String),
    #[error("fetch task failed: {0}")]
    Task(String),
}

/// Adapter for reaching remote game files
#[async_trait]
pub trait SourceFetcher: Clone + Send + Sync + 'static {
    /// Whether `url` names a game file that answers a short probe.
    ///
    /// Never errors: an unreachable source is simply not valid.
    async fn check(&self, url: &str) -> bool;

    /// Download the full contents of `url`
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Lexical check on the URL, done before any network probe
pub fn has_game_extension(url: &str) -> bool {
    url.ends_with(GAME_EXTENSION)
}
