use serde::{Deserialize, Serialize};

use crate::core::library::{SignatureLibrary, SignatureLibraryRelease};

/// A signature (model) from one release of a member database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    /// Accession within the library (e.g. `PF00001`)
    pub accession: String,

    /// Short name (e.g. `7tm_1`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Library release this signature was loaded from
    pub release: SignatureLibraryRelease,
}

impl Signature {
    pub fn new(
        accession: impl Into<String>,
        library: SignatureLibrary,
        version: impl Into<String>,
    ) -> Self {
        Self {
            accession: accession.into(),
            name: None,
            description: None,
            release: SignatureLibraryRelease::new(library, version),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn library(&self) -> SignatureLibrary {
        self.release.library
    }

    pub fn version(&self) -> &str {
        &self.release.version
    }
}
