use serde::{Deserialize, Serialize};

use crate::core::matches::Match;
use crate::utils::validation::{canonical_checksum, sequence_checksum};

/// A protein awaiting annotation
///
/// Proteins are keyed by the MD5 of their upper-cased residue sequence. The
/// checksum is stored uppercase so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Protein {
    /// Uppercase hex MD5 of the sequence
    pub checksum: String,

    /// Identifier from the input file (FASTA name, TSV id column)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<String>,

    #[serde(default)]
    pub matches: Vec<Match>,
}

impl Protein {
    /// Create a protein from a known checksum
    pub fn new(checksum: impl AsRef<str>) -> Self {
        Self {
            checksum: canonical_checksum(checksum.as_ref()),
            id: None,
            sequence: None,
            matches: Vec::new(),
        }
    }

    /// Create a protein from its sequence, computing the checksum
    pub fn from_sequence(sequence: impl Into<String>) -> Self {
        let sequence = sequence.into();
        let mut protein = Self::new(sequence_checksum(sequence.as_bytes()));
        protein.sequence = Some(sequence);
        protein
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Label for reports: the id if known, else the checksum
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.checksum)
    }

    /// Append a match. No deduplication is done.
    pub fn add_match(&mut self, m: Match) {
        self.matches.push(m);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_is_uppercased() {
        let protein = Protein::new("5d41402abc4b2a76b9719d911017c592");
        assert_eq!(protein.checksum, "5D41402ABC4B2A76B9719D911017C592");
    }

    #[test]
    fn test_from_sequence_ignores_residue_case() {
        let upper = Protein::from_sequence("MKVLA");
        let lower = Protein::from_sequence("mkvla");
        assert_eq!(upper.checksum, lower.checksum);
        assert_eq!(upper.checksum.len(), 32);
        assert_eq!(upper.checksum, upper.checksum.to_uppercase());
    }

    #[test]
    fn test_label() {
        let protein = Protein::new("AAAA1111");
        assert_eq!(protein.label(), "AAAA1111");
        let protein = protein.with_id("sp|P12345|TEST");
        assert_eq!(protein.label(), "sp|P12345|TEST");
    }
}
