// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! claimwatch pipeline workers

mod download;
mod error;
mod lifecycle;
mod merge;
mod scan;
mod validate;

pub use download::DownloadScheduler;
pub use error::EngineError;
pub use lifecycle::LifecycleCoordinator;
pub use merge::{MergeScheduler, MergeSummary, SOURCE_DELIMITER};
pub use scan::{PassSummary, ScanPass, ScanScheduler, ScanState};
pub use validate::validate_sources;

/// Guards the combined file between the merge and scan workers
pub type CombinedLock = std::sync::Arc<tokio::sync::Mutex<()>>;
