//! Centralized validation and helper functions.

/// Maximum number of raw hits read from a single dump (DOS protection)
pub const MAX_HITS: usize = 5_000_000;

/// Maximum number of proteins read from a single input file
pub const MAX_PROTEINS: usize = 1_000_000;

/// Validate that a string is a valid MD5 checksum (32 hex characters).
///
/// # Examples
///
/// ```
/// use precalc_reconciler::utils::validation::is_valid_md5;
///
/// assert!(is_valid_md5("6aef897c3d6ff0c78aff06ac189178dd"));
/// assert!(is_valid_md5("6AEF897C3D6FF0C78AFF06AC189178DD"));
/// assert!(!is_valid_md5("not-an-md5"));
/// assert!(!is_valid_md5("6aef897c3d6ff0c78aff06ac189178d")); // 31 chars
/// ```
#[must_use]
pub fn is_valid_md5(s: &str) -> bool {
    s.len() == 32 && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Canonical form of a protein checksum: trimmed and uppercase.
///
/// Checksums are not required to be well-formed MD5s here; the lookup store
/// is trusted and short synthetic checksums are common in fixtures.
#[must_use]
pub fn canonical_checksum(s: &str) -> String {
    s.trim().to_ascii_uppercase()
}

/// Compute the checksum of a protein sequence.
///
/// The MD5 is taken over the upper-cased residues, matching the lookup
/// store's convention, and returned as uppercase hex.
#[must_use]
pub fn sequence_checksum(sequence: &[u8]) -> String {
    let uppercase: Vec<u8> = sequence.iter().map(u8::to_ascii_uppercase).collect();
    let digest = md5::compute(&uppercase);
    format!("{digest:X}")
}

/// Check if reading another hit would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new hit.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_hit_limit(count: usize) -> Option<String> {
    if count >= MAX_HITS {
        Some(format!(
            "Too many hits: adding another would exceed maximum of {MAX_HITS}"
        ))
    } else {
        None
    }
}

/// Same as [`check_hit_limit`], for proteins.
#[must_use]
pub fn check_protein_limit(count: usize) -> Option<String> {
    if count >= MAX_PROTEINS {
        Some(format!(
            "Too many proteins: adding another would exceed maximum of {MAX_PROTEINS}"
        ))
    } else {
        None
    }
}
