use crate::core::hit::HitRecord;
use crate::matching::jobs::JobVersionIndex;

/// Whether a hit is in scope for the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// Library is computed locally; lookup hits are never used
    Excluded,
    /// In scope: resolve and convert
    Accepted,
    /// Library not selected, or selected at a different release
    Rejected,
}

/// Classify a hit against the locally-computed list and the job selection
pub fn classify(record: &HitRecord, index: &JobVersionIndex) -> Eligibility {
    if record.library.is_locally_computed() {
        Eligibility::Excluded
    } else if index.accepts(record.library, &record.version) {
        Eligibility::Accepted
    } else {
        Eligibility::Rejected
    }
}
