//! # precalc-reconciler
//!
//! A library for attaching precalculated protein signature matches to proteins.
//!
//! Annotation pipelines avoid rescanning proteins they have seen before by
//! asking a lookup store for matches computed earlier, keyed by the MD5 of the
//! protein sequence. Those hits were computed against whatever member database
//! releases the store had at the time, so they cannot be used blindly.
//!
//! `precalc-reconciler` filters the hits to the releases selected for the
//! current run, checks each against the local signature catalog, converts the
//! survivors into matches and attaches them to the right protein.
//!
//! ## Features
//!
//! - **Release negotiation**: hits are used only when their library release
//!   is exactly the one requested
//! - **Local-only libraries**: signal peptide predictors, CDD and SFLD are
//!   never taken from the lookup store
//! - **Catalog consistency**: hits whose signature is missing from the
//!   catalog, or present more than once, are dropped and reported
//! - **Per-library converters**: a strategy map from library to converter
//!
//! ## Modules
//!
//! - [`catalog`]: Signature catalog storage and resolution
//! - [`core`]: Core data types for libraries, signatures, hits, proteins and matches
//! - [`matching`]: Eligibility, conversion and the reconciliation engine
//! - [`parsing`]: Parsers for raw hits, lookup dumps and protein files
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::store::{InMemoryCatalog, SignatureCatalog};
pub use core::hit::{HitRecord, SequenceHits};
pub use core::library::{SignatureLibrary, SignatureLibraryRelease};
pub use core::matches::{Match, MatchLocation};
pub use core::protein::Protein;
pub use core::signature::Signature;
pub use matching::converter::{ConverterRegistry, LookupMatchConverter};
pub use matching::engine::{ReconcileError, ReconcileSummary, ReconciliationEngine};
pub use matching::jobs::JobRequest;
