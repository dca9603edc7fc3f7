// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Game records read from PGN text
//!
//! Parsing is delegated to the PGN reader; a record keeps only the headers
//! and the mainline moves. Variations are skipped.

use crate::claim::player_pair_label;
use crate::rules::RuleEvaluator;
use pgn_reader::{BufferedReader, RawHeader, Skip, Visitor};
use shakmaty::fen::Fen;
use shakmaty::san::{San, SanPlus};
use shakmaty::{CastlingMode, Chess};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use thiserror::Error;

/// Result marker of a game still being played
pub const IN_PROGRESS: &str = "*";

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid FEN header {fen:?}: {message}")]
    InvalidFen { fen: String, message: String },
}

/// One game: its headers and mainline moves
#[derive(Debug, Clone, Default)]
pub struct GameRecord {
    headers: BTreeMap<String, String>,
    moves: Vec<San>,
}

impl GameRecord {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    pub fn white(&self) -> &str {
        self.header("White").unwrap_or("?")
    }

    pub fn black(&self) -> &str {
        self.header("Black").unwrap_or("?")
    }

    /// `"White - Black"`, names truncated
    pub fn players(&self) -> String {
        player_pair_label(self.white(), self.black())
    }

    /// Board number, falling back to the round, then `"-"`
    pub fn board_id(&self) -> &str {
        self.header("Board")
            .or_else(|| self.header("Round"))
            .unwrap_or("-")
    }

    /// Result header; a game without one counts as in progress
    pub fn result(&self) -> &str {
        self.header("Result").unwrap_or(IN_PROGRESS)
    }

    pub fn is_in_progress(&self) -> bool {
        self.result() == IN_PROGRESS
    }

    pub fn moves(&self) -> &[San] {
        &self.moves
    }

    /// Starting position: the `FEN` header if present, else the standard one
    pub fn start_position(&self) -> Result<Chess, GameError> {
        let Some(fen) = self.header("FEN") else {
            return Ok(Chess::default());
        };
        let invalid = |message: String| GameError::InvalidFen {
            fen: fen.to_string(),
            message,
        };
        let parsed: Fen = fen.parse().map_err(|e| invalid(format!("{e}")))?;
        parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(format!("{e}")))
    }

    /// Replay the mainline through the draw rules
    pub fn evaluate(&self) -> Result<RuleEvaluator<'_>, GameError> {
        Ok(RuleEvaluator::new(self.start_position()?, &self.moves))
    }

    #[cfg(test)]
    pub(crate) fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }
}

#[derive(Default)]
struct RecordVisitor {
    record: GameRecord,
}

impl Visitor for RecordVisitor {
    type Result = GameRecord;

    fn begin_game(&mut self) {
        self.record = GameRecord::default();
    }

    fn header(&mut self, key: &[u8], value: RawHeader<'_>) {
        let key = String::from_utf8_lossy(key).into_owned();
        let value = String::from_utf8_lossy(&value.decode()).into_owned();
        self.record.headers.insert(key, value);
    }

    fn san(&mut self, san_plus: SanPlus) {
        self.record.moves.push(san_plus.san);
    }

    fn begin_variation(&mut self) -> Skip {
        Skip(true)
    }

    fn end_game(&mut self) -> GameRecord {
        std::mem::take(&mut self.record)
    }
}

/// Sequential reader of game records
pub struct GameReader<R: Read> {
    inner: BufferedReader<R>,
    visitor: RecordVisitor,
}

impl<R: Read> GameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: BufferedReader::new(reader),
            visitor: RecordVisitor::default(),
        }
    }

    /// Next game, or `None` at end of input
    pub fn next_game(&mut self) -> io::Result<Option<GameRecord>> {
        self.inner.read_game(&mut self.visitor)
    }
}

impl GameReader<File> {
    pub fn open(path: &Path) -> io::Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> Iterator for GameReader<R> {
    type Item = io::Result<GameRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_game().transpose()
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod tests;
