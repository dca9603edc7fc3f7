// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turns the configured source list into files to merge and URLs to download

use cw_adapters::SourceFetcher;
use cw_core::{DataDir, EventSender, PipelineEvent, Source, SourceList, Status, ValidatedSources};
use tokio::task::JoinSet;

/// Check every source, in configuration order.
///
/// Local files are valid when they exist. Remote URLs are probed
/// concurrently; the k-th reachable URL is downloaded to `games{k}.pgn`.
/// One `SourceValidated` event is emitted per source.
pub async fn validate_sources<F: SourceFetcher>(
    sources: &SourceList,
    fetcher: &F,
    data_dir: &DataDir,
    events: &EventSender,
) -> ValidatedSources {
    let mut probes = JoinSet::new();
    for (index, source) in sources.iter().enumerate() {
        if let Source::Remote(url) = source {
            let fetcher = fetcher.clone();
            let url = url.clone();
            probes.spawn(async move { (index, fetcher.check(&url).await) });
        }
    }

    let mut reachable = vec![false; sources.len()];
    while let Some(joined) = probes.join_next().await {
        match joined {
            Ok((index, ok)) => {
                if let Some(slot) = reachable.get_mut(index) {
                    *slot = ok;
                }
            }
            Err(e) => tracing::warn!(error = %e, "source probe failed"),
        }
    }

    let mut validated = ValidatedSources::default();
    for (source, reachable) in sources.iter().zip(reachable) {
        let ok = match source {
            Source::Local(path) => {
                let exists = path.exists();
                if exists {
                    validated.add_local(path.clone());
                }
                exists
            }
            Source::Remote(url) => {
                if reachable {
                    let destination = data_dir.download(validated.downloads.len());
                    validated.add_download(url.clone(), destination);
                }
                reachable
            }
        };

        let status = if ok { Status::Ok } else { Status::Error };
        tracing::info!(source = %source.value(), %status, "source validated");
        events.emit(PipelineEvent::SourceValidated {
            source: source.clone(),
            status,
        });
    }
    validated
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
