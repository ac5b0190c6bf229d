//! Command-line interface for precalc-reconciler.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **reconcile**: Attach matches from a lookup dump to a set of proteins
//! - **catalog**: List or show signatures in a catalog file
//!
//! ## Usage
//!
//! ```text
//! # Accept every release the lookup store has
//! precalc-reconciler reconcile --proteins proteins.fasta --hits lookup.tsv --catalog signatures.json
//!
//! # Only Pfam 32.0 and TIGRFAM 15.0, JSON output
//! precalc-reconciler reconcile -p proteins.fasta --hits lookup.tsv.gz -c signatures.json \
//!     --job pfam=32.0 --job tigrfam=15.0 --format json
//!
//! # Inspect the catalog
//! precalc-reconciler catalog list --catalog signatures.json
//! ```

use clap::{Parser, Subcommand};

pub mod catalog;
pub mod reconcile;

#[derive(Parser)]
#[command(name = "precalc-reconciler")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Attach precalculated signature matches to proteins")]
#[command(
    long_about = "precalc-reconciler takes hits from a precalculated match lookup store and attaches them to proteins.\n\nHits are kept only when:\n- their library is not one that must be computed locally\n- their library release is the one selected for the run\n- the local signature catalog holds exactly one matching signature"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Attach precalculated matches to proteins
    Reconcile(reconcile::ReconcileArgs),

    /// Inspect a signature catalog
    Catalog(catalog::CatalogArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
