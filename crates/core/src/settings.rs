// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline settings (`claimwatch.toml`)

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Timing and filtering knobs for one pipeline session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pause between passes of every worker
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
    /// Timeout for the reachability probe of a remote source
    #[serde(with = "humantime_serde")]
    pub check_timeout: Duration,
    /// Timeout for a full download
    #[serde(with = "humantime_serde")]
    pub fetch_timeout: Duration,
    /// Only check games whose result is still open
    pub live_only: bool,
    /// Offset before the first scan so the first merge can land
    #[serde(with = "humantime_serde")]
    pub scan_start_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(4),
            check_timeout: Duration::from_secs(4),
            fetch_timeout: Duration::from_secs(10),
            live_only: false,
            scan_start_delay: Duration::from_millis(1200),
        }
    }
}

impl Settings {
    /// Load from a TOML file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
