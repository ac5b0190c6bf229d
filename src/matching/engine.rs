use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::resolver::{Resolution, SignatureResolver};
use crate::catalog::store::SignatureCatalog;
use crate::core::hit::SequenceHits;
use crate::core::protein::Protein;
use crate::matching::converter::ConverterRegistry;
use crate::matching::eligibility::{classify, Eligibility};
use crate::matching::jobs::{JobMappingError, JobRequest, JobVersionIndex};
use crate::parsing::hit::parse_hit;
use crate::utils::validation::canonical_checksum;

/// Faults that abort a whole reconciliation call
#[derive(Error, Debug, PartialEq)]
pub enum ReconcileError {
    #[error("The match converter registry has not been populated")]
    ConverterRegistryUnset,

    #[error("Invalid analysis job selection: {0}")]
    JobMapping(#[from] JobMappingError),
}

/// What happened to a single raw hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordOutcome {
    /// Converted and appended to its protein
    Attached,
    /// The raw hit could not be parsed
    Unparseable,
    /// Library is computed locally
    Excluded,
    /// Library not selected, or selected at another release
    VersionRejected,
    /// Catalog holds no such signature for the release
    NotInCatalog,
    /// Catalog holds the signature more than once
    Ambiguous,
    /// Library is not on the lookup-convertible list
    NotConvertible,
    /// Library is convertible but no converter is registered
    NoConverter,
    /// Converter chose not to produce a match
    Declined,
    /// No protein in the batch has the hit's checksum
    UnknownProtein,
}

/// Per-outcome record counts for one call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    pub records: usize,
    pub attached: usize,
    pub unparseable: usize,
    pub excluded: usize,
    pub version_rejected: usize,
    pub not_in_catalog: usize,
    pub ambiguous: usize,
    pub not_convertible: usize,
    pub no_converter: usize,
    pub declined: usize,
    pub unknown_protein: usize,
}

impl ReconcileSummary {
    pub fn record(&mut self, outcome: RecordOutcome) {
        self.records += 1;
        let counter = match outcome {
            RecordOutcome::Attached => &mut self.attached,
            RecordOutcome::Unparseable => &mut self.unparseable,
            RecordOutcome::Excluded => &mut self.excluded,
            RecordOutcome::VersionRejected => &mut self.version_rejected,
            RecordOutcome::NotInCatalog => &mut self.not_in_catalog,
            RecordOutcome::Ambiguous => &mut self.ambiguous,
            RecordOutcome::NotConvertible => &mut self.not_convertible,
            RecordOutcome::NoConverter => &mut self.no_converter,
            RecordOutcome::Declined => &mut self.declined,
            RecordOutcome::UnknownProtein => &mut self.unknown_protein,
        };
        *counter += 1;
    }

    /// Records that did not end up attached
    pub fn dropped(&self) -> usize {
        self.records - self.attached
    }
}

/// Upper-cased protein checksum -> index into the protein batch
struct ChecksumIndex(HashMap<String, usize>);

impl ChecksumIndex {
    fn build(proteins: &[Protein]) -> Self {
        let mut index = HashMap::with_capacity(proteins.len());
        for (i, protein) in proteins.iter().enumerate() {
            if index.insert(canonical_checksum(&protein.checksum), i).is_some() {
                warn!(
                    "Protein checksum {} appears more than once in the batch; using the last",
                    protein.checksum
                );
            }
        }
        Self(index)
    }

    fn get(&self, checksum: &str) -> Option<usize> {
        self.0.get(&canonical_checksum(checksum)).copied()
    }
}

/// Reconciles lookup-store hits with the signature catalog and attaches the
/// resulting matches to proteins
pub struct ReconciliationEngine<'a, C: SignatureCatalog + ?Sized> {
    catalog: &'a C,
    converters: Option<ConverterRegistry>,
}

impl<'a, C: SignatureCatalog + ?Sized> ReconciliationEngine<'a, C> {
    /// Create an engine with no converters. A registry must be installed with
    /// [`with_converters`](Self::with_converters) before any hit can be
    /// processed.
    pub fn new(catalog: &'a C) -> Self {
        Self {
            catalog,
            converters: None,
        }
    }

    /// Install the converter registry
    #[must_use]
    pub fn with_converters(mut self, registry: ConverterRegistry) -> Self {
        if registry.is_empty() {
            warn!("Match converter registry is empty; no lookup hits can be converted");
        } else {
            debug!("Installed match converters for {} libraries", registry.len());
        }
        for library in registry.missing_allow_listed() {
            warn!("No match converter registered for {library}; its lookup hits will be dropped");
        }
        self.converters = Some(registry);
        self
    }

    /// Attach matches from precalculated hits to a batch of proteins.
    ///
    /// `jobs` selects the library releases in scope. `None` means every
    /// library at any version; an empty slice means nothing is in scope.
    ///
    /// Hits that are filtered out or cannot be resolved or converted are
    /// logged and dropped without affecting the rest of the batch. Matches are
    /// only ever appended, so running twice attaches twice.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::ConverterRegistryUnset` if no registry is
    /// installed and there is at least one hit, or `ReconcileError::JobMapping`
    /// if a job does not name a known library. Both are raised before any
    /// protein is modified.
    pub fn populate_protein_matches(
        &self,
        proteins: &mut [Protein],
        entries: &[SequenceHits],
        jobs: Option<&[JobRequest]>,
    ) -> Result<ReconcileSummary, ReconcileError> {
        let has_hits = entries.iter().any(|e| !e.hits.is_empty());
        let registry = match &self.converters {
            Some(registry) => registry,
            None if has_hits => return Err(ReconcileError::ConverterRegistryUnset),
            None => return Ok(ReconcileSummary::default()),
        };

        let job_index = JobVersionIndex::build(jobs)?;
        if job_index.is_restricted() {
            debug!("Libraries to analyse: {}", job_index.describe());
        } else {
            debug!("No analysis jobs selected; accepting hits from every library release");
        }

        let checksum_index = ChecksumIndex::build(proteins);
        let resolver = SignatureResolver::new(self.catalog);

        let mut summary = ReconcileSummary::default();
        for entry in entries {
            for raw in &entry.hits {
                let outcome = self.process_hit(
                    raw,
                    &job_index,
                    &resolver,
                    registry,
                    &checksum_index,
                    proteins,
                );
                summary.record(outcome);
            }
        }

        info!(
            "Reconciled {} lookup hits: {} attached, {} dropped",
            summary.records,
            summary.attached,
            summary.dropped()
        );
        Ok(summary)
    }

    /// Single-protein form of [`populate_protein_matches`](Self::populate_protein_matches)
    ///
    /// # Errors
    ///
    /// Same as `populate_protein_matches`.
    pub fn populate_protein_match(
        &self,
        protein: &mut Protein,
        entries: &[SequenceHits],
        jobs: Option<&[JobRequest]>,
    ) -> Result<ReconcileSummary, ReconcileError> {
        self.populate_protein_matches(std::slice::from_mut(protein), entries, jobs)
    }

    fn process_hit(
        &self,
        raw: &str,
        job_index: &JobVersionIndex,
        resolver: &SignatureResolver<'_, C>,
        registry: &ConverterRegistry,
        checksum_index: &ChecksumIndex,
        proteins: &mut [Protein],
    ) -> RecordOutcome {
        let record = match parse_hit(raw) {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping unparseable lookup hit '{}': {}", raw, e);
                return RecordOutcome::Unparseable;
            }
        };

        match classify(&record, job_index) {
            Eligibility::Accepted => {}
            Eligibility::Excluded => {
                debug!(
                    "Skipping {} hit {}: library is computed locally",
                    record.library, record.accession
                );
                return RecordOutcome::Excluded;
            }
            Eligibility::Rejected => {
                debug!(
                    "Skipping {} hit {}: release {} not requested (requested: {})",
                    record.library,
                    record.accession,
                    record.version,
                    job_index
                        .requested_version(record.library)
                        .unwrap_or("none")
                );
                return RecordOutcome::VersionRejected;
            }
        }

        let signature = match resolver.resolve(record.library, &record.version, &record.accession) {
            Resolution::Unique(signature) => signature,
            Resolution::NotFound => {
                debug!(
                    "Signature {} not in catalog for {}-{}",
                    record.accession, record.library, record.version
                );
                return RecordOutcome::NotInCatalog;
            }
            Resolution::Ambiguous(n) => {
                warn!(
                    "Data inconsistency: the catalog contains signature {} {} times; library: {} sequence md5: {}",
                    record.accession, n, record.library, record.protein_checksum
                );
                return RecordOutcome::Ambiguous;
            }
        };

        if !record.library.is_lookup_convertible() {
            debug!(
                "Not converting {} hit {}: library is not sourced from the lookup store",
                record.library, record.accession
            );
            return RecordOutcome::NotConvertible;
        }

        let Some(converter) = registry.converter_for(record.library) else {
            warn!(
                "Unable to persist match {} as there is no available conversion for signature library {}",
                record.accession, record.library
            );
            return RecordOutcome::NoConverter;
        };

        let Some(m) = converter.convert_match(&record, &signature) else {
            debug!(
                "Converter produced no match for {} on {}",
                record.accession, record.protein_checksum
            );
            return RecordOutcome::Declined;
        };

        match checksum_index.get(&record.protein_checksum) {
            Some(idx) => {
                proteins[idx].add_match(m);
                RecordOutcome::Attached
            }
            None => {
                warn!(
                    "Cannot store match {} for sequence md5 {}: no such protein in this batch",
                    record.accession, record.protein_checksum
                );
                RecordOutcome::UnknownProtein
            }
        }
    }
}
