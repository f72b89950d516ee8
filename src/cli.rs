//! Command-line arguments.

use clap::{Parser, Subcommand};
use url::Url;

use crate::types::CircuitPurpose;

/// Normalize and reconcile ISP provider names between DSR and ARIN records.
#[derive(Debug, Parser)]
#[command(name = "provmatch", version, about)]
pub struct Cli {
    /// Endpoint serving `{ "mappings": { ... } }` to merge over the built-in aliases
    #[arg(long, global = true)]
    pub mappings_url: Option<Url>,

    /// Bound on the mapping fetch, in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the comparison key for a raw provider name
    Normalize { raw: String },

    /// Compare a DSR provider with an ARIN provider and print the verdict as JSON
    Match {
        dsr: String,
        arin: String,
        #[arg(long, default_value_t = CircuitPurpose::Primary)]
        purpose: CircuitPurpose,
    },

    /// Print the canonical provider name for a raw provider
    Canonical { raw: String },

    /// List canonical providers matching a query, best first
    Search {
        query: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Read a JSON array of `{dsr, arin, purpose}` from stdin and print a report
    Reconcile,
}
