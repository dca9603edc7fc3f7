// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Displayed claims, as a presentation layer would keep them
//!
//! Each player pair shows at most one row per claim family: a newer entry of
//! the same type replaces the old row, and a terminal claim replaces the
//! weaker claim it supersedes.

use crate::claim::ClaimEntry;
use chrono::{Local, NaiveTime};

/// One displayed row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRow {
    /// 1-based position in the table
    pub number: usize,
    /// Wall-clock time the claim was first displayed
    pub time: NaiveTime,
    pub entry: ClaimEntry,
}

impl ClaimRow {
    /// Terminal claims are highlighted
    pub fn is_critical(&self) -> bool {
        self.entry.claim_type.is_terminal()
    }

    pub fn time_label(&self) -> String {
        self.time.format("%H:%M:%S").to_string()
    }
}

/// A change to apply to the displayed table, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableChange {
    Removed(ClaimRow),
    Added(ClaimRow),
}

#[derive(Debug, Default)]
pub struct ClaimTable {
    rows: Vec<ClaimRow>,
}

impl ClaimTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry stamped with the current local time
    pub fn apply(&mut self, entry: ClaimEntry) -> Vec<TableChange> {
        self.apply_at(entry, Local::now().time())
    }

    /// Add an entry, removing the row it replaces first
    pub fn apply_at(&mut self, entry: ClaimEntry, time: NaiveTime) -> Vec<TableChange> {
        let mut changes = Vec::with_capacity(2);

        if let Some(index) = self.rows.iter().position(|row| replaces(&entry, &row.entry)) {
            let removed = self.rows.remove(index);
            self.renumber();
            changes.push(TableChange::Removed(removed));
        }

        let row = ClaimRow {
            number: self.rows.len() + 1,
            time,
            entry,
        };
        self.rows.push(row.clone());
        changes.push(TableChange::Added(row));
        changes
    }

    pub fn rows(&self) -> &[ClaimRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    fn renumber(&mut self) {
        for (index, row) in self.rows.iter_mut().enumerate() {
            row.number = index + 1;
        }
    }
}

fn replaces(new: &ClaimEntry, shown: &ClaimEntry) -> bool {
    if new.players != shown.players {
        return false;
    }
    new.claim_type == shown.claim_type || new.claim_type.supersedes() == Some(shown.claim_type)
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
