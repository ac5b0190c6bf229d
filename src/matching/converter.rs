use std::collections::HashMap;

use crate::core::hit::{HitLocation, HitRecord};
use crate::core::library::SignatureLibrary;
use crate::core::matches::{Match, MatchLocation};
use crate::core::signature::Signature;

/// Turns a lookup hit for a resolved signature into a match.
///
/// Returning `None` means the hit does not warrant a match; it is not an
/// error.
pub trait LookupMatchConverter: Send + Sync {
    fn convert_match(&self, record: &HitRecord, signature: &Signature) -> Option<Match>;
}

/// Converter for HMMER3-scored libraries (Pfam, TIGRFAM, PIRSF)
///
/// A hit without a location payload becomes a match with no locations. The
/// envelope defaults to the alignment coordinates when the hit carries none.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hmmer3MatchConverter;

impl LookupMatchConverter for Hmmer3MatchConverter {
    fn convert_match(&self, record: &HitRecord, signature: &Signature) -> Option<Match> {
        let locations = match &record.location {
            None => Vec::new(),
            Some(loc) => vec![build_location(
                loc,
                loc.envelope_start.unwrap_or(loc.start),
                loc.envelope_end.unwrap_or(loc.end),
            )?],
        };
        Some(build_match(record, signature, locations))
    }
}

/// Converter for Gene3D, whose domain boundaries come from the envelope.
/// A location without both envelope coordinates is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gene3dMatchConverter;

impl LookupMatchConverter for Gene3dMatchConverter {
    fn convert_match(&self, record: &HitRecord, signature: &Signature) -> Option<Match> {
        let locations = match &record.location {
            None => Vec::new(),
            Some(loc) => vec![build_location(loc, loc.envelope_start?, loc.envelope_end?)?],
        };
        Some(build_match(record, signature, locations))
    }
}

fn build_location(loc: &HitLocation, envelope_start: u32, envelope_end: u32) -> Option<MatchLocation> {
    if loc.start > loc.end || envelope_start > envelope_end {
        return None;
    }
    Some(MatchLocation {
        start: loc.start,
        end: loc.end,
        score: loc.score,
        evalue: loc.evalue,
        hmm_start: loc.hmm_start,
        hmm_end: loc.hmm_end,
        hmm_bounds: loc.hmm_bounds.unwrap_or_default(),
        envelope_start,
        envelope_end,
    })
}

fn build_match(record: &HitRecord, signature: &Signature, locations: Vec<MatchLocation>) -> Match {
    Match {
        signature: signature.clone(),
        model_accession: record.accession.clone(),
        sequence_score: record.sequence_score,
        sequence_evalue: record.sequence_evalue,
        locations,
    }
}

/// Converters keyed by signature library
#[derive(Default)]
pub struct ConverterRegistry {
    converters: HashMap<SignatureLibrary, Box<dyn LookupMatchConverter>>,
}

impl ConverterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a converter for every lookup-convertible library
    pub fn standard() -> Self {
        Self::new()
            .with_converter(SignatureLibrary::Pfam, Hmmer3MatchConverter)
            .with_converter(SignatureLibrary::Tigrfam, Hmmer3MatchConverter)
            .with_converter(SignatureLibrary::Pirsf, Hmmer3MatchConverter)
            .with_converter(SignatureLibrary::Gene3d, Gene3dMatchConverter)
    }

    #[must_use]
    pub fn with_converter(
        mut self,
        library: SignatureLibrary,
        converter: impl LookupMatchConverter + 'static,
    ) -> Self {
        self.register(library, converter);
        self
    }

    /// Register a converter, replacing any previous one for the library
    pub fn register(
        &mut self,
        library: SignatureLibrary,
        converter: impl LookupMatchConverter + 'static,
    ) {
        self.converters.insert(library, Box::new(converter));
    }

    pub fn converter_for(&self, library: SignatureLibrary) -> Option<&dyn LookupMatchConverter> {
        self.converters.get(&library).map(|c| &**c)
    }

    /// Lookup-convertible libraries with no registered converter
    pub fn missing_allow_listed(&self) -> Vec<SignatureLibrary> {
        SignatureLibrary::LOOKUP_CONVERTIBLE
            .iter()
            .copied()
            .filter(|lib| !self.converters.contains_key(lib))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl std::fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut libraries: Vec<_> = self.converters.keys().collect();
        libraries.sort();
        f.debug_struct("ConverterRegistry")
            .field("libraries", &libraries)
            .finish()
    }
}
