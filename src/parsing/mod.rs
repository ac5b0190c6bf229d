//! Parsers for pipeline inputs.
//!
//! - **Raw hits** ([`hit`]): one lookup-store hit string into a [`HitRecord`]
//! - **Lookup dumps** ([`hits`]): `checksum<TAB>raw-hit` lines grouped into
//!   per-protein [`SequenceHits`] containers
//! - **Protein FASTA** ([`fasta`]): sequences, checksummed on read
//! - **Protein tables** ([`tsv`]): `id<TAB>checksum` rows
//!
//! File readers accept gzip-compressed input (`.gz`, `.bgz`).
//!
//! ## Example
//!
//! ```rust
//! use precalc_reconciler::parsing::hit::parse_hit;
//! use precalc_reconciler::core::library::SignatureLibrary;
//!
//! let hit = parse_hit("PFAM,32.0,PF00001,AAAA1111,,,10,120").unwrap();
//! assert_eq!(hit.library, SignatureLibrary::Pfam);
//! assert_eq!(hit.location.unwrap().end, 120);
//! ```
//!
//! [`HitRecord`]: crate::core::hit::HitRecord
//! [`SequenceHits`]: crate::core::hit::SequenceHits

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;

use crate::core::protein::Protein;

pub mod fasta;
pub mod hit;
pub mod hits;
pub mod tsv;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Too many records: {0} exceeds the maximum allowed")]
    TooManyRecords(usize),
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub(crate) fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Read a text file, decompressing it first if gzipped
pub(crate) fn read_to_string(path: &Path) -> Result<String, ParseError> {
    if is_gzipped(path) {
        let mut content = String::new();
        GzDecoder::new(std::fs::File::open(path)?).read_to_string(&mut content)?;
        Ok(content)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Read proteins from FASTA, TSV or CSV, chosen by extension.
///
/// # Errors
///
/// Returns the underlying parser's error.
pub fn parse_protein_file(path: &Path) -> Result<Vec<Protein>, ParseError> {
    if fasta::is_fasta_file(path) {
        return fasta::parse_fasta_file(path);
    }

    let name = path.to_string_lossy().to_lowercase();
    let name = name
        .strip_suffix(".gz")
        .or_else(|| name.strip_suffix(".bgz"))
        .unwrap_or(&name);

    if name.ends_with(".csv") {
        tsv::parse_tsv_file(path, ',')
    } else {
        tsv::parse_tsv_file(path, '\t')
    }
}
