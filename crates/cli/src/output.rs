// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use cw_core::{ClaimRow, ClaimTable, PipelineEvent, Status, TableChange};
use serde::Serialize;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print a list of items
pub fn print_list<T: Serialize + std::fmt::Display>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for item in items {
                println!("{}", item);
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(items) {
                println!("{}", json);
            }
        }
    }
}

/// One claim table row as a fixed-width line; terminal claims are starred
pub fn format_row(row: &ClaimRow) -> String {
    let marker = if row.is_critical() { '*' } else { ' ' };
    format!(
        "{:>3}{} {}  {:<18} {:<6} {:<47} {}",
        row.number,
        marker,
        row.time_label(),
        row.entry.claim_type.label(),
        row.entry.board,
        row.entry.players,
        row.entry.move_label
    )
}

pub fn format_change(change: &TableChange) -> String {
    match change {
        TableChange::Added(row) => format_row(row),
        TableChange::Removed(row) => format!(
            "  - #{} {} {} superseded",
            row.number,
            row.entry.claim_type.label(),
            row.entry.players
        ),
    }
}

/// Turns the event stream into terminal lines, keeping the claim table
#[derive(Default)]
pub struct EventRenderer {
    table: ClaimTable,
    download: Option<Status>,
    scan: Option<Status>,
}

impl EventRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines to print for `event`. Repeated statuses print nothing.
    pub fn render(&mut self, event: PipelineEvent) -> Vec<String> {
        match event {
            PipelineEvent::SourceValidated { source, status } => {
                vec![format!("source {:<5} {}", status.to_string(), source.value())]
            }
            PipelineEvent::Download(status) => {
                changed(&mut self.download, status, "download")
            }
            PipelineEvent::Scan(status) => changed(&mut self.scan, status, "scan"),
            PipelineEvent::Claim(entry) => self.table.apply(entry).iter().map(format_change).collect(),
            PipelineEvent::ControlsDisabled => vec!["stopping...".to_string()],
            PipelineEvent::ControlsEnabled => {
                self.table.clear();
                self.download = None;
                self.scan = None;
                vec!["stopped".to_string()]
            }
        }
    }

    #[cfg(test)]
    pub fn table(&self) -> &ClaimTable {
        &self.table
    }
}

fn changed(last: &mut Option<Status>, status: Status, label: &str) -> Vec<String> {
    if *last == Some(status) {
        return Vec::new();
    }
    *last = Some(status);
    vec![format!("{label}: {status}")]
}
