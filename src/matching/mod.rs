//! Reconciliation of precalculated hits into protein matches.
//!
//! - [`ReconciliationEngine`](engine::ReconciliationEngine): entry point; runs
//!   every hit through the pipeline below and attaches the results
//! - [`JobVersionIndex`](jobs::JobVersionIndex): library releases selected for the run
//! - [`classify`](eligibility::classify): in-scope check for a single hit
//! - [`ConverterRegistry`](converter::ConverterRegistry): per-library match converters
//!
//! ## Pipeline
//!
//! Each raw hit goes through these steps and stops at the first one that
//! drops it:
//!
//! 1. **Parse** the raw hit string
//! 2. **Eligibility**: locally-computed libraries are excluded; with a job
//!    selection, the library must be selected at exactly the hit's release
//! 3. **Resolve** the signature in the catalog; zero or several results drop
//!    the hit
//! 4. **Convert** with the library's converter, only for lookup-convertible
//!    libraries
//! 5. **Attach** to the protein with the hit's checksum
//!
//! Only a missing converter registry or an unrecognised job selection fail
//! the call.
//!
//! ## Example
//!
//! ```rust
//! use precalc_reconciler::catalog::store::InMemoryCatalog;
//! use precalc_reconciler::core::hit::SequenceHits;
//! use precalc_reconciler::core::library::SignatureLibrary;
//! use precalc_reconciler::core::protein::Protein;
//! use precalc_reconciler::core::signature::Signature;
//! use precalc_reconciler::matching::converter::ConverterRegistry;
//! use precalc_reconciler::matching::engine::ReconciliationEngine;
//!
//! let mut catalog = InMemoryCatalog::new();
//! catalog.add_signature(Signature::new("PF00001", SignatureLibrary::Pfam, "32.0"));
//!
//! let engine = ReconciliationEngine::new(&catalog).with_converters(ConverterRegistry::standard());
//!
//! let mut proteins = vec![Protein::new("AAAA1111")];
//! let hits = vec![SequenceHits::new("AAAA1111").with_hit("PFAM,32.0,PF00001,AAAA1111,,,10,100")];
//!
//! engine.populate_protein_matches(&mut proteins, &hits, None).unwrap();
//! assert_eq!(proteins[0].matches.len(), 1);
//! ```

pub mod converter;
pub mod eligibility;
pub mod engine;
pub mod jobs;
