// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session memory of reported claims
//!
//! The combined file is re-read from the start on every pass, so the same
//! games are evaluated again and again. The registry turns each evaluation
//! into a delta: only entries never reported before in this session.

use crate::claim::ClaimEntry;
use crate::game::GameRecord;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct ClaimRegistry {
    reported: HashSet<ClaimEntry>,
    suppressed_pairs: HashSet<String>,
}

impl ClaimRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate a game and return the claims not reported before, in the
    /// order they occur in the game.
    ///
    /// A terminal claim also suppresses the game's player pair; callers
    /// should consult [`is_suppressed`](Self::is_suppressed) before checking
    /// a game again.
    pub fn check_game(&mut self, game: &GameRecord) -> Vec<ClaimEntry> {
        let evaluator = match game.evaluate() {
            Ok(evaluator) => evaluator,
            Err(e) => {
                tracing::debug!(players = %game.players(), error = %e, "game skipped");
                return Vec::new();
            }
        };

        let players = game.players();
        let board = game.board_id();
        let mut fresh = Vec::new();

        for report in evaluator {
            for claim_type in report.claims {
                if claim_type.is_terminal() {
                    self.suppressed_pairs.insert(players.clone());
                }
                let entry = ClaimEntry::new(claim_type, board, players.clone(), &report.label);
                if self.reported.insert(entry.clone()) {
                    fresh.push(entry);
                }
            }
        }

        fresh
    }

    pub fn is_suppressed(&self, players: &str) -> bool {
        self.suppressed_pairs.contains(players)
    }

    pub fn is_reported(&self, entry: &ClaimEntry) -> bool {
        self.reported.contains(entry)
    }

    pub fn reported_count(&self) -> usize {
        self.reported.len()
    }

    pub fn suppressed_count(&self) -> usize {
        self.suppressed_pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reported.is_empty() && self.suppressed_pairs.is_empty()
    }

    /// Forget everything; only between sessions, never mid-scan
    pub fn reset(&mut self) {
        self.reported.clear();
        self.suppressed_pairs.clear();
    }

    #[cfg(any(test, feature = "test-support"))]
    pub fn suppress(&mut self, players: impl Into<String>) {
        self.suppressed_pairs.insert(players.into());
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
