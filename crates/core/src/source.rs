// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Game sources and where their games land on disk
//!
//! The configured list is persisted as `sources.json`. Validation (done by
//! the engine) turns it into [`ValidatedSources`]: the ordered files the
//! merger concatenates, and the remote URLs the downloader keeps fresh.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("source already configured: {0}")]
    Duplicate(String),
    #[error("source not configured: {0}")]
    NotFound(String),
}

/// A place games come from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Source {
    Remote(String),
    Local(PathBuf),
}

impl Source {
    /// The URL or path as entered by the user
    pub fn value(&self) -> String {
        match self {
            Source::Remote(url) => url.clone(),
            Source::Local(path) => path.display().to_string(),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Source::Remote(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Source::Remote(_) => "remote",
            Source::Local(_) => "local",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<6} {}", self.kind(), self.value())
    }
}

/// The ordered, user-edited list of sources
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceList {
    sources: Vec<Source>,
}

impl SourceList {
    pub fn new(sources: Vec<Source>) -> Self {
        Self { sources }
    }

    /// Load from disk. A missing or unreadable file is an empty list.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(list) => list,
            Err(e) => {
                if path.exists() {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable source list");
                }
                Self::default()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self, SourceError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), SourceError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn add(&mut self, source: Source) -> Result<(), SourceError> {
        if self.sources.contains(&source) {
            return Err(SourceError::Duplicate(source.value()));
        }
        self.sources.push(source);
        Ok(())
    }

    /// Remove the source whose URL or path equals `value`
    pub fn remove(&mut self, value: &str) -> Result<Source, SourceError> {
        let index = self
            .sources
            .iter()
            .position(|s| s.value() == value)
            .ok_or_else(|| SourceError::NotFound(value.to_string()))?;
        Ok(self.sources.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// A remote source and the local file it is downloaded to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub url: String,
    pub destination: PathBuf,
}

/// Outcome of validating a [`SourceList`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedSources {
    /// Files to merge, in configuration order
    pub filepaths: Vec<PathBuf>,
    /// Remote sources to download, in configuration order
    pub downloads: Vec<Download>,
}

impl ValidatedSources {
    pub fn has_valid_sources(&self) -> bool {
        !self.filepaths.is_empty()
    }

    pub fn has_downloads(&self) -> bool {
        !self.downloads.is_empty()
    }

    /// Append a local file, ignoring repeats
    pub fn add_local(&mut self, path: PathBuf) {
        if !self.filepaths.contains(&path) {
            self.filepaths.push(path);
        }
    }

    /// Map a URL to its destination and merge that destination, ignoring
    /// repeats of either
    pub fn add_download(&mut self, url: String, destination: PathBuf) {
        if self.downloads.iter().any(|d| d.url == url) {
            return;
        }
        self.add_local(destination.clone());
        self.downloads.push(Download { url, destination });
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
