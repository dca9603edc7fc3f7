// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Draw-rule evaluation over a game's moves
//!
//! The board itself comes from the rules engine. What the engine does not
//! track is position history, so repetition counting lives here: a run of
//! position keys since the last irreversible move.

use crate::claim::{move_label, ClaimType};
use shakmaty::san::{San, SanPlus};
use shakmaty::{Bitboard, Board, Chess, Color, EnPassantMode, Move, Position, Square};

/// Half-move clock at which the fifty-move rule may be claimed
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Half-move clock at which the seventy-five-move rule applies
pub const SEVENTY_FIVE_MOVE_HALFMOVES: u32 = 150;

/// Move-count draw queries on any rules-engine position
pub trait DrawRules: Position {
    /// Fifty-move rule: clock reached 100 plies and the side to move is not
    /// mated or stalemated
    fn is_fifty_moves(&self) -> bool {
        self.halfmoves() >= FIFTY_MOVE_HALFMOVES && !self.legal_moves().is_empty()
    }

    /// Seventy-five-move rule, with the same legal-move requirement
    fn is_seventyfive_moves(&self) -> bool {
        self.halfmoves() >= SEVENTY_FIVE_MOVE_HALFMOVES && !self.legal_moves().is_empty()
    }
}

impl<P: Position> DrawRules for P {}

/// Identity of a position for repetition purposes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionKey {
    board: Board,
    turn: Color,
    castling_rights: Bitboard,
    ep_square: Option<Square>,
}

impl PositionKey {
    pub fn of<P: Position>(position: &P) -> Self {
        Self {
            board: position.board().clone(),
            turn: position.turn(),
            castling_rights: position.castles().castling_rights(),
            ep_square: position.ep_square(EnPassantMode::Legal),
        }
    }
}

/// Claims found after one ply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlyReport {
    /// 1-based ply number
    pub ply: usize,
    /// Display label such as `"23...Kf7"`
    pub label: String,
    /// Claims triggered by the position after this ply, in check order
    pub claims: Vec<ClaimType>,
}

/// Lazily replays moves and reports draw claims after every ply.
///
/// Stops after a terminal claim (fivefold or seventy-five), or at the first
/// move the rules engine rejects.
pub struct RuleEvaluator<'a> {
    position: Chess,
    moves: std::slice::Iter<'a, San>,
    history: Vec<PositionKey>,
    ply: usize,
    finished: bool,
}

impl<'a> RuleEvaluator<'a> {
    pub fn new(start: Chess, moves: &'a [San]) -> Self {
        let history = vec![PositionKey::of(&start)];
        Self {
            position: start,
            moves: moves.iter(),
            history,
            ply: 0,
            finished: false,
        }
    }

    fn claims_for(&self, repetitions: usize) -> Vec<ClaimType> {
        if repetitions >= 5 {
            return vec![ClaimType::FivefoldRepetition];
        }
        if self.position.is_seventyfive_moves() {
            return vec![ClaimType::SeventyFiveMoveRule];
        }

        let mut claims = Vec::new();
        if self.position.is_fifty_moves() {
            claims.push(ClaimType::FiftyMoveRule);
        }
        if repetitions >= 3 {
            claims.push(ClaimType::ThreefoldRepetition);
        }
        claims
    }

    /// Record the new position and return how often it has occurred in the
    /// current reversible run (including now)
    fn record(&mut self, irreversible: bool) -> usize {
        let key = PositionKey::of(&self.position);
        if irreversible {
            self.history.clear();
        }
        let repetitions = self.history.iter().filter(|k| **k == key).count() + 1;
        self.history.push(key);
        repetitions
    }

    fn play(&mut self, m: &Move) -> (SanPlus, bool) {
        let rights_before = self.position.castles().castling_rights();
        let had_ep = self.position.ep_square(EnPassantMode::Legal).is_some();
        let zeroing = m.is_zeroing();

        let san_plus = SanPlus::from_move_and_play_unchecked(&mut self.position, m);

        let rights_changed = self.position.castles().castling_rights() != rights_before;
        (san_plus, zeroing || had_ep || rights_changed)
    }
}

impl Iterator for RuleEvaluator<'_> {
    type Item = PlyReport;

    fn next(&mut self) -> Option<PlyReport> {
        if self.finished {
            return None;
        }
        let san = self.moves.next()?;

        let m = match san.to_move(&self.position) {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!(ply = self.ply + 1, san = %san, error = %e, "move rejected, ending game");
                self.finished = true;
                return None;
            }
        };

        let (san_plus, irreversible) = self.play(&m);
        self.ply += 1;
        let repetitions = self.record(irreversible);

        let claims = self.claims_for(repetitions);
        if claims.iter().any(|c| c.is_terminal()) {
            self.finished = true;
        }

        Some(PlyReport {
            ply: self.ply,
            label: move_label(self.ply, &san_plus.to_string()),
            claims,
        })
    }
}

/// Evaluate a move sequence from `start`
pub fn evaluate(start: Chess, moves: &[San]) -> RuleEvaluator<'_> {
    RuleEvaluator::new(start, moves)
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
