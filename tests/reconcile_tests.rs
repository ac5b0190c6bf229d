//! End-to-end behaviour of the reconciliation pipeline
//!
//! These tests drive the public API with an instrumented catalog so that the
//! number of catalog queries made for each kind of hit can be checked.

use std::cell::Cell;

use precalc_reconciler::matching::converter::{Hmmer3MatchConverter, LookupMatchConverter};
use precalc_reconciler::matching::jobs::JobMappingError;
use precalc_reconciler::{
    ConverterRegistry, HitRecord, InMemoryCatalog, JobRequest, Match, Protein, ReconcileError,
    ReconciliationEngine, SequenceHits, Signature, SignatureCatalog, SignatureLibrary,
};

const PFAM_HIT: &str = "PFAM,32.0,PF00001,AAAA1111,40.1,1e-10,10,100,38.2,2e-9,1,90,[]";

/// Catalog wrapper that counts lookups
struct CountingCatalog {
    inner: InMemoryCatalog,
    calls: Cell<usize>,
}

impl CountingCatalog {
    fn new(signatures: Vec<Signature>) -> Self {
        let mut inner = InMemoryCatalog::new();
        for sig in signatures {
            inner.add_signature(sig);
        }
        Self {
            inner,
            calls: Cell::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl SignatureCatalog for CountingCatalog {
    fn find_signatures(
        &self,
        accession: &str,
        library: SignatureLibrary,
        version: &str,
    ) -> Vec<Signature> {
        self.calls.set(self.calls.get() + 1);
        self.inner.find_signatures(accession, library, version)
    }
}

/// Converter that never produces a match
struct DecliningConverter;

impl LookupMatchConverter for DecliningConverter {
    fn convert_match(&self, _record: &HitRecord, _signature: &Signature) -> Option<Match> {
        None
    }
}

fn standard_catalog() -> CountingCatalog {
    CountingCatalog::new(vec![
        Signature::new("PF00001", SignatureLibrary::Pfam, "32.0").with_name("7tm_1"),
        Signature::new("PF00002", SignatureLibrary::Pfam, "32.0"),
        Signature::new("SM00001", SignatureLibrary::Smart, "7.1"),
        Signature::new("SIGNALP_EUK", SignatureLibrary::SignalpEuk, "4.1"),
        Signature::new("TIGR00001", SignatureLibrary::Tigrfam, "15.0"),
    ])
}

fn engine(catalog: &CountingCatalog) -> ReconciliationEngine<'_, CountingCatalog> {
    ReconciliationEngine::new(catalog).with_converters(ConverterRegistry::standard())
}

fn hits(checksum: &str, raw: &[&str]) -> Vec<SequenceHits> {
    let entry = raw
        .iter()
        .fold(SequenceHits::new(checksum), |entry, hit| entry.with_hit(*hit));
    vec![entry]
}

#[test]
fn test_single_pfam_hit_is_attached() {
    let catalog = standard_catalog();
    let mut proteins = vec![Protein::new("AAAA1111")];

    let summary = engine(&catalog)
        .populate_protein_matches(&mut proteins, &hits("AAAA1111", &[PFAM_HIT]), None)
        .unwrap();

    assert_eq!(summary.attached, 1);
    assert_eq!(proteins[0].matches.len(), 1);
    let m = &proteins[0].matches[0];
    assert_eq!(m.accession(), "PF00001");
    assert_eq!(m.signature.name.as_deref(), Some("7tm_1"));
    assert_eq!(m.signature.version(), "32.0");
    assert_eq!((m.locations[0].start, m.locations[0].end), (10, 100));
}

#[test]
fn test_hit_without_location_is_attached() {
    let catalog = standard_catalog();
    let mut proteins = vec![Protein::new("AAAA1111")];

    let summary = engine(&catalog)
        .populate_protein_matches(
            &mut proteins,
            &hits("AAAA1111", &["PFAM,32.0,PF00001,AAAA1111"]),
            None,
        )
        .unwrap();

    assert_eq!(summary.attached, 1);
    assert_eq!(summary.declined, 0);
    assert_eq!(proteins[0].matches.len(), 1);
    assert_eq!(proteins[0].matches[0].accession(), "PF00001");
    assert!(proteins[0].matches[0].locations.is_empty());
}

#[test]
fn test_unlocated_hit_at_other_release_is_rejected() {
    let catalog = standard_catalog();
    let mut proteins = vec![Protein::new("AAAA1111")];
    let jobs = vec![JobRequest::new("pfam-scan", "31.0")];

    let summary = engine(&catalog)
        .populate_protein_matches(
            &mut proteins,
            &hits("AAAA1111", &["PFAM,32.0,PF00001,AAAA1111"]),
            Some(jobs.as_slice()),
        )
        .unwrap();

    assert_eq!(summary.version_rejected, 1);
    assert!(proteins[0].matches.is_empty());
}

#[test]
fn test_job_at_other_release_rejects_hit() {
    let catalog = standard_catalog();
    let mut proteins = vec![Protein::new("AAAA1111")];
    let jobs = vec![JobRequest::new("pfam-scan", "31.0")];

    let summary = engine(&catalog)
        .populate_protein_matches(
            &mut proteins,
            &hits("AAAA1111", &[PFAM_HIT]),
            Some(jobs.as_slice()),
        )
        .unwrap();

    assert_eq!(summary.version_rejected, 1);
    assert!(proteins[0].matches.is_empty());
    assert_eq!(catalog.calls(), 0);
}

#[test]
fn test_job_at_matching_release_accepts_hit() {
    let catalog = standard_catalog();
    let mut proteins = vec![Protein::new("AAAA1111")];
    let jobs = vec![JobRequest::new("pfam-scan", "32.0")];

    let summary = engine(&catalog)
        .populate_protein_matches(
            &mut proteins,
            &hits("AAAA1111", &[PFAM_HIT]),
            Some(jobs.as_slice()),
        )
        .unwrap();

    assert_eq!(summary.attached, 1);
    assert_eq!(proteins[0].matches.len(), 1);
}

#[test]
fn test_library_missing_from_jobs_is_rejected_without_catalog_call() {
    let catalog = standard_catalog();
    let mut proteins = vec![Protein::new("AAAA1111")];
    let jobs = vec![JobRequest::new("tigrfam", "15.0")];

    let summary = engine(&catalog)
        .populate_protein_matches(
            &mut proteins,
            &hits("AAAA1111", &[PFAM_HIT]),
            Some(jobs.as_slice()),
        )
        .unwrap();

    assert_eq!(summary.version_rejected, 1);
    assert_eq!(catalog.calls(), 0);
}

#[test]
fn test_empty_job_selection_accepts_nothing() {
    let catalog = standard_catalog();
    let mut proteins = vec![Protein::new("AAAA1111")];

    let summary = engine(&catalog)
        .populate_protein_matches(
            &mut proteins,
            &hits("AAAA1111", &[PFAM_HIT]),
            Some(&[] as &[JobRequest]),
        )
        .unwrap();

    assert_eq!(summary.version_rejected, 1);
    assert!(proteins[0].matches.is_empty());
    assert_eq!(catalog.calls(), 0);
}

#[test]
fn test_locally_computed_libraries_never_reach_catalog() {
    let catalog = standard_catalog();
    let mut proteins = vec![Protein::new("AAAA1111")];
    let raw = [
        "SIGNALP_EUK,4.1,SIGNALP_EUK,AAAA1111,,,1,22",
        "CDD,3.16,cd00001,AAAA1111,,,5,60",
        "SFLD,4,SFLDS00001,AAAA1111,,,5,60",
        "SIGNALP_GRAM_POSITIVE,4.1,SIGNALP_GRAM_POSITIVE,AAAA1111,,,1,30",
        "SIGNALP_GRAM_NEGATIVE,4.1,SIGNALP_GRAM_NEGATIVE,AAAA1111,,,1,30",
    ];
    let entries = hits("AAAA1111", &raw);

    let selections: Vec<Option<Vec<JobRequest>>> = vec![
        None,
        Some(vec![]),
        Some(vec![JobRequest::new("signalp_euk", "4.1")]),
        Some(vec![
            JobRequest::new("signalp_euk", "4.1"),
            JobRequest::new("cdd", "3.16"),
            JobRequest::new("sfld", "4"),
        ]),
    ];

    for jobs in &selections {
        let summary = engine(&catalog)
            .populate_protein_matches(&mut proteins, &entries, jobs.as_deref())
            .unwrap();
        assert_eq!(summary.excluded, raw.len());
    }

    assert_eq!(catalog.calls(), 0);
    assert!(proteins[0].matches.is_empty());
}

#[test]
fn test_ambiguous_signature_does_not_stop_batch() {
    let mut catalog = standard_catalog();
    catalog
        .inner
        .add_signature(Signature::new("PF00001", SignatureLibrary::Pfam, "32.0"));
    let mut proteins = vec![Protein::new("AAAA1111")];
    let raw = [PFAM_HIT, "PFAM,32.0,PF00002,AAAA1111,,,120,200"];

    let summary = engine(&catalog)
        .populate_protein_matches(&mut proteins, &hits("AAAA1111", &raw), None)
        .unwrap();

    assert_eq!(summary.ambiguous, 1);
    assert_eq!(summary.attached, 1);
    assert_eq!(proteins[0].matches.len(), 1);
    assert_eq!(proteins[0].matches[0].accession(), "PF00002");
}

#[test]
fn test_unset_registry_fails_before_any_record() {
    let catalog = standard_catalog();
    let engine = ReconciliationEngine::new(&catalog);
    let mut proteins = vec![Protein::new("AAAA1111")];

    let result = engine.populate_protein_matches(&mut proteins, &hits("AAAA1111", &[PFAM_HIT]), None);

    assert_eq!(result, Err(ReconcileError::ConverterRegistryUnset));
    assert_eq!(catalog.calls(), 0);
    assert!(proteins[0].matches.is_empty());
}

#[test]
fn test_unknown_job_name_is_fatal() {
    let catalog = standard_catalog();
    let mut proteins = vec![Protein::new("AAAA1111")];
    let jobs = vec![
        JobRequest::new("pfam", "32.0"),
        JobRequest::new("blastp", "2.0"),
    ];

    let result = engine(&catalog).populate_protein_matches(
        &mut proteins,
        &hits("AAAA1111", &[PFAM_HIT]),
        Some(jobs.as_slice()),
    );

    assert_eq!(
        result,
        Err(ReconcileError::JobMapping(JobMappingError::UnknownJob(
            "blastp".to_string()
        )))
    );
    assert_eq!(catalog.calls(), 0);
    assert!(proteins[0].matches.is_empty());
}

#[test]
fn test_reconciling_twice_attaches_twice() {
    let catalog = standard_catalog();
    let engine = engine(&catalog);
    let mut proteins = vec![Protein::new("AAAA1111")];
    let entries = hits("AAAA1111", &[PFAM_HIT]);

    engine
        .populate_protein_matches(&mut proteins, &entries, None)
        .unwrap();
    engine
        .populate_protein_matches(&mut proteins, &entries, None)
        .unwrap();

    assert_eq!(proteins[0].matches.len(), 2);
    assert_eq!(proteins[0].matches[0], proteins[0].matches[1]);
}

#[test]
fn test_registered_but_not_allow_listed_library_is_dropped() {
    let catalog = standard_catalog();
    let registry =
        ConverterRegistry::standard().with_converter(SignatureLibrary::Smart, Hmmer3MatchConverter);
    let engine = ReconciliationEngine::new(&catalog).with_converters(registry);
    let mut proteins = vec![Protein::new("AAAA1111")];

    let summary = engine
        .populate_protein_matches(
            &mut proteins,
            &hits("AAAA1111", &["SMART,7.1,SM00001,AAAA1111,,,3,50"]),
            None,
        )
        .unwrap();

    assert_eq!(summary.not_convertible, 1);
    assert_eq!(catalog.calls(), 1);
    assert!(proteins[0].matches.is_empty());
}

#[test]
fn test_allow_listed_library_without_converter_is_dropped() {
    let catalog = standard_catalog();
    let registry = ConverterRegistry::new().with_converter(SignatureLibrary::Pfam, Hmmer3MatchConverter);
    let engine = ReconciliationEngine::new(&catalog).with_converters(registry);
    let mut proteins = vec![Protein::new("AAAA1111")];
    let raw = ["TIGRFAM,15.0,TIGR00001,AAAA1111,,,3,50", PFAM_HIT];

    let summary = engine
        .populate_protein_matches(&mut proteins, &hits("AAAA1111", &raw), None)
        .unwrap();

    assert_eq!(summary.no_converter, 1);
    assert_eq!(summary.attached, 1);
    assert_eq!(proteins[0].matches[0].accession(), "PF00001");
}

#[test]
fn test_declined_conversion_is_not_an_error() {
    let catalog = standard_catalog();
    let registry = ConverterRegistry::new().with_converter(SignatureLibrary::Pfam, DecliningConverter);
    let engine = ReconciliationEngine::new(&catalog).with_converters(registry);
    let mut proteins = vec![Protein::new("AAAA1111")];

    let summary = engine
        .populate_protein_matches(&mut proteins, &hits("AAAA1111", &[PFAM_HIT]), None)
        .unwrap();

    assert_eq!(summary.declined, 1);
    assert!(proteins[0].matches.is_empty());
}

#[test]
fn test_hit_for_unknown_protein_is_dropped() {
    let catalog = standard_catalog();
    let mut proteins = vec![Protein::new("BBBB2222")];

    let summary = engine(&catalog)
        .populate_protein_matches(&mut proteins, &hits("AAAA1111", &[PFAM_HIT]), None)
        .unwrap();

    assert_eq!(summary.unknown_protein, 1);
    assert!(proteins[0].matches.is_empty());
}

#[test]
fn test_checksums_match_case_insensitively() {
    let catalog = standard_catalog();
    let mut proteins = vec![Protein::new("aaaa1111"), Protein::new("BBBB2222")];
    let raw = "PFAM,32.0,PF00001,aaaa1111,,,10,100";

    let summary = engine(&catalog)
        .populate_protein_matches(&mut proteins, &hits("aaaa1111", &[raw]), None)
        .unwrap();

    assert_eq!(summary.attached, 1);
    assert_eq!(proteins[0].matches.len(), 1);
    assert!(proteins[1].matches.is_empty());
}

#[test]
fn test_hits_are_routed_by_their_own_checksum() {
    let catalog = standard_catalog();
    let mut proteins = vec![Protein::new("AAAA1111"), Protein::new("BBBB2222")];
    let entries = vec![
        SequenceHits::new("AAAA1111").with_hit(PFAM_HIT),
        SequenceHits::new("BBBB2222").with_hit("PFAM,32.0,PF00002,BBBB2222,,,5,50"),
    ];

    let summary = engine(&catalog)
        .populate_protein_matches(&mut proteins, &entries, None)
        .unwrap();

    assert_eq!(summary.attached, 2);
    assert_eq!(proteins[0].matches[0].accession(), "PF00001");
    assert_eq!(proteins[1].matches[0].accession(), "PF00002");
}

#[test]
fn test_signature_from_other_release_is_not_in_catalog() {
    let catalog = standard_catalog();
    let mut proteins = vec![Protein::new("AAAA1111")];

    let summary = engine(&catalog)
        .populate_protein_matches(
            &mut proteins,
            &hits("AAAA1111", &["PFAM,33.1,PF00001,AAAA1111,,,10,100"]),
            None,
        )
        .unwrap();

    assert_eq!(summary.not_in_catalog, 1);
    assert!(proteins[0].matches.is_empty());
}
