// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events the pipeline streams to its presentation layer

use crate::claim::ClaimEntry;
use crate::source::Source;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc;

/// Indicator state shown for sources, downloads and the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Ok,
    Error,
    Stop,
    Active,
    Wait,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Ok => "ok",
            Status::Error => "error",
            Status::Stop => "stopped",
            Status::Active => "active",
            Status::Wait => "waiting",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// A configured source was checked
    SourceValidated { source: Source, status: Status },
    /// Outcome of one download attempt, or `Stop` when the session ends
    Download(Status),
    /// Scanner moved between active and waiting, or stopped
    Scan(Status),
    /// A claim not reported before in this session
    Claim(ClaimEntry),
    /// Stop sequence started; controls should not be used until re-enabled
    ControlsDisabled,
    /// Stop sequence finished
    ControlsEnabled,
}

/// Sending half of the event stream.
///
/// Sends never fail from the worker's point of view: once the receiver is
/// gone, events are dropped.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<PipelineEvent>,
}

impl EventSender {
    pub fn new(tx: mpsc::UnboundedSender<PipelineEvent>) -> Self {
        Self { tx }
    }

    /// A connected sender/receiver pair
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PipelineEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    pub fn emit(&self, event: PipelineEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("event receiver gone, dropping event");
        }
    }
}
