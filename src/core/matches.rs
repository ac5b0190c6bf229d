use serde::{Deserialize, Serialize};

use crate::core::signature::Signature;
use crate::core::types::HmmBounds;

/// A signature match attached to a protein
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub signature: Signature,

    /// Model the match was scored against; usually the signature accession
    pub model_accession: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_evalue: Option<f64>,

    pub locations: Vec<MatchLocation>,
}

/// Where on the protein a match lies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchLocation {
    pub start: u32,
    pub end: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evalue: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hmm_start: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hmm_end: Option<u32>,

    pub hmm_bounds: HmmBounds,

    pub envelope_start: u32,
    pub envelope_end: u32,
}

impl Match {
    pub fn accession(&self) -> &str {
        &self.signature.accession
    }
}
