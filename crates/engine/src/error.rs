// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the claim pipeline

use cw_core::SourceError;
use thiserror::Error;

/// Errors that can occur while preparing or running a session
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no valid sources to scan")]
    NoValidSources,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("source list error: {0}")]
    Sources(#[from] SourceError),
    #[error("worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
