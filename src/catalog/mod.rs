//! Local signature catalog storage and resolution.
//!
//! The catalog is the authority on which signatures exist in which library
//! release. Hits from the lookup store are only kept when the catalog holds
//! their signature.
//!
//! - [`SignatureCatalog`](store::SignatureCatalog): the query interface the
//!   pipeline consumes
//! - [`InMemoryCatalog`](store::InMemoryCatalog): a JSON-backed implementation
//! - [`SignatureResolver`](resolver::SignatureResolver): turns a query into
//!   NotFound, Unique or Ambiguous
//!
//! ## Catalog file
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "created_at": "2024-01-01T00:00:00Z",
//!   "releases": [
//!     {
//!       "library": "PFAM",
//!       "version": "32.0",
//!       "signatures": [{"accession": "PF00001", "name": "7tm_1"}]
//!     }
//!   ]
//! }
//! ```

pub mod resolver;
pub mod store;
