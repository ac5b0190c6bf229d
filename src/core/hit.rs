use serde::{Deserialize, Serialize};

use crate::core::library::SignatureLibrary;
use crate::core::types::HmmBounds;

/// One precalculated hit, as parsed from the lookup store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitRecord {
    pub library: SignatureLibrary,

    /// Release version the lookup store computed this hit against
    pub version: String,

    /// Signature accession (e.g. `PF00001`)
    pub accession: String,

    /// MD5 of the protein sequence, as given by the lookup store
    pub protein_checksum: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_evalue: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<HitLocation>,
}

/// Location payload carried by a hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitLocation {
    pub start: u32,
    pub end: u32,
    pub score: Option<f64>,
    pub evalue: Option<f64>,
    pub hmm_start: Option<u32>,
    pub hmm_end: Option<u32>,
    pub hmm_bounds: Option<HmmBounds>,
    pub envelope_start: Option<u32>,
    pub envelope_end: Option<u32>,
}

/// Raw hits the lookup store returned for one protein
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceHits {
    /// Checksum of the protein the hits were looked up for
    pub checksum: String,

    /// Raw hit strings, in the order received
    pub hits: Vec<String>,
}

impl SequenceHits {
    pub fn new(checksum: impl Into<String>) -> Self {
        Self {
            checksum: checksum.into(),
            hits: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_hit(mut self, hit: impl Into<String>) -> Self {
        self.hits.push(hit.into());
        self
    }
}
