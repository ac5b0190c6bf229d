use crate::catalog::store::SignatureCatalog;
use crate::core::library::SignatureLibrary;
use crate::core::signature::Signature;

/// Outcome of resolving a hit against the catalog
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The catalog does not hold this signature for the release
    NotFound,
    /// Exactly one signature matched
    Unique(Signature),
    /// The catalog holds the same signature this many times
    Ambiguous(usize),
}

/// Resolves (library, version, accession) to a single catalog signature
pub struct SignatureResolver<'a, C: SignatureCatalog + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: SignatureCatalog + ?Sized> SignatureResolver<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    pub fn resolve(&self, library: SignatureLibrary, version: &str, accession: &str) -> Resolution {
        let mut signatures = self.catalog.find_signatures(accession, library, version);
        match signatures.len() {
            0 => Resolution::NotFound,
            1 => Resolution::Unique(signatures.remove(0)),
            n => Resolution::Ambiguous(n),
        }
    }
}
