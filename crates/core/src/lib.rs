// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cw-core: draw-claim detection for the claimwatch pipeline
//!
//! This crate provides:
//! - Rule evaluation over a game's move sequence (repetition, 50/75 moves)
//! - PGN game records and a streaming reader
//! - The per-session claim registry and the displayed claim table
//! - Sources, settings, data-dir layout and pipeline events

pub mod claim;
pub mod event;
pub mod game;
pub mod paths;
pub mod registry;
pub mod rules;
pub mod settings;
pub mod source;
pub mod table;

pub use claim::{ClaimEntry, ClaimType};
pub use event::{EventSender, PipelineEvent, Status};
pub use game::{GameError, GameReader, GameRecord};
pub use paths::DataDir;
pub use registry::ClaimRegistry;
pub use rules::{evaluate, PlyReport, RuleEvaluator};
pub use settings::{ConfigError, Settings};
pub use source::{Download, Source, SourceError, SourceList, ValidatedSources};
pub use table::{ClaimRow, ClaimTable, TableChange};
