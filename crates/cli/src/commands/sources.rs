// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Editing the configured source list

use crate::error::CwError;
use crate::output::{print_list, OutputFormat};
use anyhow::Result;
use clap::{Args, Subcommand};
use cw_core::{DataDir, Source, SourceError, SourceList};
use std::path::PathBuf;

#[derive(Args)]
pub struct SourcesArgs {
    #[command(subcommand)]
    pub command: SourcesCommand,
}

#[derive(Subcommand)]
pub enum SourcesCommand {
    /// List configured sources
    List {
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Add a remote .pgn URL, downloaded on every pass
    AddRemote { url: String },
    /// Add a local .pgn file
    AddLocal { path: PathBuf },
    /// Remove a source by its URL or path
    Remove { value: String },
}

pub fn handle(args: SourcesArgs, data_dir: &DataDir) -> Result<()> {
    let path = data_dir.sources();
    let mut sources = SourceList::load(&path);

    match args.command {
        SourcesCommand::List { format } => {
            let items: Vec<Source> = sources.iter().cloned().collect();
            if items.is_empty() && matches!(format, OutputFormat::Text) {
                println!("No sources");
            } else {
                print_list(&items, format);
            }
            return Ok(());
        }
        SourcesCommand::AddRemote { url } => {
            let source = Source::Remote(url);
            sources.add(source.clone())?;
            println!("Added {}", source);
        }
        SourcesCommand::AddLocal { path } => {
            let source = Source::Local(std::path::absolute(&path)?);
            sources.add(source.clone())?;
            println!("Added {}", source);
        }
        SourcesCommand::Remove { value } => {
            let removed = sources.remove(&value).map_err(|e| match e {
                SourceError::NotFound(value) => CwError::source_not_found(&value).into(),
                other => anyhow::Error::from(other),
            })?;
            println!("Removed {}", removed);
        }
    }

    sources.save(&path)?;
    Ok(())
}
