//! Core data types for precalculated match reconciliation.
//!
//! - [`SignatureLibrary`](library::SignatureLibrary): closed set of member databases,
//!   with the locally-computed and lookup-convertible lists
//! - [`Signature`](signature::Signature): a catalog entry keyed by
//!   (library, version, accession)
//! - [`HitRecord`](hit::HitRecord): one parsed hit from the lookup store
//! - [`Protein`](protein::Protein): a protein keyed by sequence checksum, owning its matches
//! - [`Match`](matches::Match): a converted match with its locations
//!
//! ## Checksums
//!
//! Proteins and hits are correlated by the MD5 of the upper-cased protein
//! sequence. The lookup store is not consistent about hex case, so checksums
//! are canonicalized to uppercase before comparison.

pub mod hit;
pub mod library;
pub mod matches;
pub mod protein;
pub mod signature;
pub mod types;
