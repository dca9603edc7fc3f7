// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.

use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CwError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CwError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for CwError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CwError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Common error builders for typical failure scenarios.
impl CwError {
    pub fn no_sources(sources_file: &Path) -> Self {
        CwError::new("No sources configured")
            .with_context(format!("{} is missing or empty", sources_file.display()))
            .with_suggestion("Add a live broadcast: cw sources add-remote <url>")
            .with_suggestion("Add a local file: cw sources add-local <path>")
    }

    pub fn no_valid_sources() -> Self {
        CwError::new("None of the configured sources is usable")
            .with_context("Local files must exist")
            .with_context("Remote URLs must end in .pgn and answer within the check timeout")
            .with_suggestion("Review the list: cw sources list")
            .with_suggestion("Probe a URL: cw check <url>")
    }

    pub fn data_dir_unusable(path: &Path, source: std::io::Error) -> Self {
        CwError::new(format!("Cannot use data directory {}", path.display()))
            .with_context(source.to_string())
            .with_suggestion("Point CLAIMWATCH_DATA_DIR at a writable directory")
            .with_source(source)
    }

    pub fn source_not_found(value: &str) -> Self {
        CwError::new(format!("Source '{}' is not configured", value))
            .with_suggestion("List configured sources: cw sources list")
    }
}
