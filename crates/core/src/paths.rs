// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Layout of the data directory

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "CLAIMWATCH_DATA_DIR";

/// Log file name inside the data directory
pub const LOG_FILE: &str = "claimwatch.log";

/// Root of every file the pipeline reads or writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$CLAIMWATCH_DATA_DIR`, else the platform data dir, else the
    /// working directory
    pub fn resolve() -> Self {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            return Self::new(dir);
        }
        match dirs::data_dir() {
            Some(dir) => Self::new(dir.join("claimwatch")),
            None => Self::new("."),
        }
    }

    pub fn ensure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The merged file the scanner reads
    pub fn combined(&self) -> PathBuf {
        self.root.join("games.pgn")
    }

    /// Destination of the `index`-th remote source
    pub fn download(&self, index: usize) -> PathBuf {
        self.root.join(format!("games{index}.pgn"))
    }

    pub fn sources(&self) -> PathBuf {
        self.root.join("sources.json")
    }

    pub fn settings(&self) -> PathBuf {
        self.root.join("claimwatch.toml")
    }

    pub fn log(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }
}
