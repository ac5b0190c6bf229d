use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;

use crate::core::library::{SignatureLibrary, SignatureLibraryRelease};
use crate::core::signature::Signature;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Query interface over the local signature catalog.
///
/// Implementations must be side-effect free: the same query always returns
/// the same signatures, so callers may cache or batch lookups.
pub trait SignatureCatalog {
    /// All signatures with this accession in the given library release.
    ///
    /// Normally zero or one; more than one means the catalog holds the same
    /// signature twice.
    fn find_signatures(
        &self,
        accession: &str,
        library: SignatureLibrary,
        version: &str,
    ) -> Vec<Signature>;
}

impl<T: SignatureCatalog + ?Sized> SignatureCatalog for &T {
    fn find_signatures(
        &self,
        accession: &str,
        library: SignatureLibrary,
        version: &str,
    ) -> Vec<Signature> {
        (**self).find_signatures(accession, library, version)
    }
}

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub releases: Vec<ReleaseData>,
}

/// One library release and its signatures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseData {
    pub library: SignatureLibrary,
    pub version: String,
    pub signatures: Vec<SignatureData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureData {
    pub accession: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

type SignatureKey = (SignatureLibrary, String, String);

/// Signature catalog held in memory and indexed by (library, version, accession)
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    /// All signatures, in load order
    pub signatures: Vec<Signature>,

    /// Index: (library, version, accession) -> indices in signatures vec.
    /// Duplicates are kept so that lookups can report them.
    key_to_indices: HashMap<SignatureKey, Vec<usize>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load catalog from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse catalog from JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            tracing::warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION,
                data.version
            );
        }

        let mut catalog = Self::new();
        for release in data.releases {
            for sig in release.signatures {
                catalog.add_signature(Signature {
                    accession: sig.accession,
                    name: sig.name,
                    description: sig.description,
                    release: SignatureLibraryRelease::new(release.library, release.version.clone()),
                });
            }
        }

        Ok(catalog)
    }

    /// Add a signature to the catalog. Duplicates are not rejected.
    pub fn add_signature(&mut self, signature: Signature) {
        let index = self.signatures.len();
        let key = (
            signature.library(),
            signature.version().to_string(),
            signature.accession.clone(),
        );
        self.key_to_indices.entry(key).or_default().push(index);
        self.signatures.push(signature);
    }

    /// Distinct releases held, with their signature counts
    pub fn releases(&self) -> Vec<(SignatureLibraryRelease, usize)> {
        let mut counts: BTreeMap<(SignatureLibrary, &str), usize> = BTreeMap::new();
        for sig in &self.signatures {
            *counts.entry((sig.library(), sig.version())).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|((library, version), n)| (SignatureLibraryRelease::new(library, version), n))
            .collect()
    }

    /// All signatures with the given accession, across libraries and releases
    pub fn find_by_accession(&self, accession: &str) -> Vec<&Signature> {
        self.signatures
            .iter()
            .filter(|s| s.accession == accession)
            .collect()
    }

    /// Export catalog to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let mut grouped: BTreeMap<(SignatureLibrary, String), Vec<SignatureData>> = BTreeMap::new();
        for sig in &self.signatures {
            grouped
                .entry((sig.library(), sig.version().to_string()))
                .or_default()
                .push(SignatureData {
                    accession: sig.accession.clone(),
                    name: sig.name.clone(),
                    description: sig.description.clone(),
                });
        }

        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            releases: grouped
                .into_iter()
                .map(|((library, version), signatures)| ReleaseData {
                    library,
                    version,
                    signatures,
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of signatures in catalog
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

impl SignatureCatalog for InMemoryCatalog {
    fn find_signatures(
        &self,
        accession: &str,
        library: SignatureLibrary,
        version: &str,
    ) -> Vec<Signature> {
        self.key_to_indices
            .get(&(library, version.to_string(), accession.to_string()))
            .map(|indices| {
                indices
                    .iter()
                    .map(|&idx| self.signatures[idx].clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}
