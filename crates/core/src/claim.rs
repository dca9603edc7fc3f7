// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Draw claims: the rule that applies, and the entry shown for it
//!
//! A [`ClaimEntry`] is the de-duplication key for everything downstream: the
//! registry remembers which entries were already reported, and the claim
//! table uses the player pair to decide which displayed row an entry replaces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of characters kept from each player's name
pub const PLAYER_NAME_LIMIT: usize = 22;

/// The draw rule a claim refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClaimType {
    ThreefoldRepetition,
    FivefoldRepetition,
    FiftyMoveRule,
    SeventyFiveMoveRule,
}

impl ClaimType {
    /// Human-readable name, as shown in the claims table
    pub fn label(self) -> &'static str {
        match self {
            ClaimType::ThreefoldRepetition => "3 Fold Repetition",
            ClaimType::FivefoldRepetition => "5 Fold Repetition",
            ClaimType::FiftyMoveRule => "50 Moves Rule",
            ClaimType::SeventyFiveMoveRule => "75 Moves Rule",
        }
    }

    /// Whether this is the maximal claim of its family.
    ///
    /// Once a game reaches a terminal claim there is nothing left to find
    /// in it, so its player pair is excluded from further scanning.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ClaimType::FivefoldRepetition | ClaimType::SeventyFiveMoveRule
        )
    }

    /// The weaker claim this one replaces for the same player pair, if any
    pub fn supersedes(self) -> Option<ClaimType> {
        match self {
            ClaimType::FivefoldRepetition => Some(ClaimType::ThreefoldRepetition),
            ClaimType::SeventyFiveMoveRule => Some(ClaimType::FiftyMoveRule),
            ClaimType::ThreefoldRepetition | ClaimType::FiftyMoveRule => None,
        }
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One reported claim: which rule, on which board, between whom, at which move
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimEntry {
    pub claim_type: ClaimType,
    pub board: String,
    pub players: String,
    pub move_label: String,
}

impl ClaimEntry {
    pub fn new(
        claim_type: ClaimType,
        board: impl Into<String>,
        players: impl Into<String>,
        move_label: impl Into<String>,
    ) -> Self {
        Self {
            claim_type,
            board: board.into(),
            players: players.into(),
            move_label: move_label.into(),
        }
    }
}

impl fmt::Display for ClaimEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | board {} | {} | {}",
            self.claim_type, self.board, self.players, self.move_label
        )
    }
}

/// Builds the `"White - Black"` label identifying a player pair
pub fn player_pair_label(white: &str, black: &str) -> String {
    format!("{} - {}", truncate_name(white), truncate_name(black))
}

fn truncate_name(name: &str) -> String {
    name.chars().take(PLAYER_NAME_LIMIT).collect()
}

/// Formats a move for display from its 1-based ply number and SAN.
///
/// White's moves read `"12.Nf3"`, Black's `"12...Nf6"`.
pub fn move_label(ply: usize, san: &str) -> String {
    let number = ply.div_ceil(2);
    if ply % 2 == 0 {
        format!("{number}...{san}")
    } else {
        format!("{number}.{san}")
    }
}

#[cfg(test)]
#[path = "claim_tests.rs"]
mod tests;
