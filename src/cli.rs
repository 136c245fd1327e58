//! CLI argument parsing for the onbit-worker binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::services::decoder::SourceEncoding;
use crate::services::profile::SchemaKind;

#[derive(Parser)]
#[command(name = "onbit-worker", about = "Onbit CRM customer import worker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a customer spreadsheet and submit it to the backend
    Import {
        /// Path to the exported CSV file
        file: PathBuf,
        /// Input layout of the file
        #[arg(long, value_enum, default_value_t = SchemaKind::Template)]
        schema: SchemaKind,
        /// Declared character encoding of the file
        #[arg(long, value_enum, default_value_t = SourceEncoding::Utf8)]
        encoding: SourceEncoding,
        /// Override the configured records-per-chunk
        #[arg(long)]
        chunk_size: Option<usize>,
        /// Override the configured inter-chunk delay (milliseconds)
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Parse and map only; submit nothing
        #[arg(long)]
        dry_run: bool,
    },
    /// Write the downloadable import template CSV
    Template {
        /// Output path
        #[arg(long, default_value = "고객등록_양식.csv")]
        out: PathBuf,
    },
}
