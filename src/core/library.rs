use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Member database a signature belongs to
///
/// The set is closed: every raw hit and every catalog entry must name one of
/// these. Two libraries are equal iff their canonical names are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureLibrary {
    Pfam,
    Pirsf,
    Gene3d,
    Tigrfam,
    Cdd,
    Sfld,
    SignalpEuk,
    SignalpGramPositive,
    SignalpGramNegative,
    Smart,
    PrositePatterns,
    PrositeProfiles,
    Prints,
    Panther,
    Hamap,
    Superfamily,
    Prodom,
    Coils,
    Phobius,
    Tmhmm,
    MobidbLite,
}

impl SignatureLibrary {
    /// Every known library, in declaration order
    pub const ALL: &'static [SignatureLibrary] = &[
        Self::Pfam,
        Self::Pirsf,
        Self::Gene3d,
        Self::Tigrfam,
        Self::Cdd,
        Self::Sfld,
        Self::SignalpEuk,
        Self::SignalpGramPositive,
        Self::SignalpGramNegative,
        Self::Smart,
        Self::PrositePatterns,
        Self::PrositeProfiles,
        Self::Prints,
        Self::Panther,
        Self::Hamap,
        Self::Superfamily,
        Self::Prodom,
        Self::Coils,
        Self::Phobius,
        Self::Tmhmm,
        Self::MobidbLite,
    ];

    /// Libraries that must be computed locally and are never taken from the
    /// lookup store (signal peptide predictors, and domain libraries whose
    /// site data the lookup store does not carry).
    pub const LOCALLY_COMPUTED: &'static [SignatureLibrary] = &[
        Self::Cdd,
        Self::Sfld,
        Self::SignalpEuk,
        Self::SignalpGramPositive,
        Self::SignalpGramNegative,
    ];

    /// Libraries whose lookup hits may be converted into matches
    pub const LOOKUP_CONVERTIBLE: &'static [SignatureLibrary] =
        &[Self::Pfam, Self::Pirsf, Self::Gene3d, Self::Tigrfam];

    /// Canonical upper snake case name (e.g. `SIGNALP_EUK`)
    pub fn name(self) -> &'static str {
        match self {
            Self::Pfam => "PFAM",
            Self::Pirsf => "PIRSF",
            Self::Gene3d => "GENE3D",
            Self::Tigrfam => "TIGRFAM",
            Self::Cdd => "CDD",
            Self::Sfld => "SFLD",
            Self::SignalpEuk => "SIGNALP_EUK",
            Self::SignalpGramPositive => "SIGNALP_GRAM_POSITIVE",
            Self::SignalpGramNegative => "SIGNALP_GRAM_NEGATIVE",
            Self::Smart => "SMART",
            Self::PrositePatterns => "PROSITE_PATTERNS",
            Self::PrositeProfiles => "PROSITE_PROFILES",
            Self::Prints => "PRINTS",
            Self::Panther => "PANTHER",
            Self::Hamap => "HAMAP",
            Self::Superfamily => "SUPERFAMILY",
            Self::Prodom => "PRODOM",
            Self::Coils => "COILS",
            Self::Phobius => "PHOBIUS",
            Self::Tmhmm => "TMHMM",
            Self::MobidbLite => "MOBIDB_LITE",
        }
    }

    /// Alternative spellings seen in lookup dumps and job names
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Pfam => &["PFAMA"],
            Self::Tigrfam => &["TIGRFAMS"],
            Self::Gene3d => &["CATHGENE3D"],
            Self::SignalpEuk => &["SIGNALPEUKARYOTES"],
            Self::SignalpGramPositive => &["SIGNALPGRAMPOS"],
            Self::SignalpGramNegative => &["SIGNALPGRAMNEG"],
            Self::MobidbLite => &["MOBIDB"],
            _ => &[],
        }
    }

    /// True if hits for this library must never be sourced from the lookup store
    pub fn is_locally_computed(self) -> bool {
        Self::LOCALLY_COMPUTED.contains(&self)
    }

    /// True if lookup hits for this library may be converted into matches
    pub fn is_lookup_convertible(self) -> bool {
        Self::LOOKUP_CONVERTIBLE.contains(&self)
    }

    /// Look up a library by exact name, ignoring case and punctuation.
    ///
    /// `"signalp-euk"`, `"SIGNALP_EUK"` and `"SignalP_EUK"` all resolve to
    /// [`SignatureLibrary::SignalpEuk`].
    pub fn lookup(name: &str) -> Option<Self> {
        let key = normalize_name(name);
        if key.is_empty() {
            return None;
        }
        Self::ALL
            .iter()
            .copied()
            .find(|lib| lib.normalized_names().any(|n| n == key))
    }

    /// Look up the library an analysis job name refers to.
    ///
    /// Job names carry decoration around the library name (`pfam-scan`,
    /// `jobPfamA`, `tigrfam_15.0`), so the library whose name is the longest
    /// prefix of the normalized job name wins. A leading `job` marker is
    /// ignored.
    pub fn lookup_job(job_name: &str) -> Option<Self> {
        let key = normalize_name(job_name);
        longest_prefix_match(&key).or_else(|| {
            key.strip_prefix("JOB")
                .and_then(longest_prefix_match)
        })
    }

    fn normalized_names(self) -> impl Iterator<Item = String> {
        std::iter::once(normalize_name(self.name()))
            .chain(self.aliases().iter().map(|a| normalize_name(a)))
    }
}

fn longest_prefix_match(key: &str) -> Option<SignatureLibrary> {
    if key.is_empty() {
        return None;
    }
    SignatureLibrary::ALL
        .iter()
        .copied()
        .flat_map(|lib| lib.normalized_names().map(move |n| (lib, n)))
        .filter(|(_, n)| key.starts_with(n.as_str()))
        .max_by_key(|(_, n)| n.len())
        .map(|(lib, _)| lib)
}

/// Uppercase and drop everything but ASCII letters and digits
fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

impl fmt::Display for SignatureLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SignatureLibrary {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| format!("Unknown signature library: '{s}'"))
    }
}

/// A specific release of a signature library held by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignatureLibraryRelease {
    pub library: SignatureLibrary,
    pub version: String,
}

impl SignatureLibraryRelease {
    pub fn new(library: SignatureLibrary, version: impl Into<String>) -> Self {
        Self {
            library,
            version: version.into(),
        }
    }
}

impl fmt::Display for SignatureLibraryRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.library, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case_and_punctuation() {
        assert_eq!(SignatureLibrary::lookup("PFAM"), Some(SignatureLibrary::Pfam));
        assert_eq!(SignatureLibrary::lookup("pfam"), Some(SignatureLibrary::Pfam));
        assert_eq!(
            SignatureLibrary::lookup("signalp-euk"),
            Some(SignatureLibrary::SignalpEuk)
        );
        assert_eq!(
            SignatureLibrary::lookup("SIGNALP_GRAM_POSITIVE"),
            Some(SignatureLibrary::SignalpGramPositive)
        );
        assert_eq!(SignatureLibrary::lookup("TIGRFAMs"), Some(SignatureLibrary::Tigrfam));
        assert_eq!(SignatureLibrary::lookup("nonsense"), None);
        assert_eq!(SignatureLibrary::lookup(""), None);
    }

    #[test]
    fn test_lookup_is_exact_not_prefix() {
        // "PFAMSCAN" is a job name, not a library name
        assert_eq!(SignatureLibrary::lookup("pfam-scan"), None);
    }

    #[test]
    fn test_lookup_job() {
        assert_eq!(
            SignatureLibrary::lookup_job("pfam-scan"),
            Some(SignatureLibrary::Pfam)
        );
        assert_eq!(
            SignatureLibrary::lookup_job("jobPfamA"),
            Some(SignatureLibrary::Pfam)
        );
        assert_eq!(
            SignatureLibrary::lookup_job("tigrfam_15.0"),
            Some(SignatureLibrary::Tigrfam)
        );
        assert_eq!(
            SignatureLibrary::lookup_job("prosite_profiles"),
            Some(SignatureLibrary::PrositeProfiles)
        );
        assert_eq!(
            SignatureLibrary::lookup_job("signalp_gram_negative"),
            Some(SignatureLibrary::SignalpGramNegative)
        );
        assert_eq!(SignatureLibrary::lookup_job("blast"), None);
        assert_eq!(SignatureLibrary::lookup_job("  "), None);
    }

    #[test]
    fn test_lists_are_disjoint() {
        for lib in SignatureLibrary::LOCALLY_COMPUTED {
            assert!(!lib.is_lookup_convertible(), "{lib} is in both lists");
        }
        assert!(SignatureLibrary::SignalpEuk.is_locally_computed());
        assert!(SignatureLibrary::Pfam.is_lookup_convertible());
        assert!(!SignatureLibrary::Smart.is_lookup_convertible());
        assert!(!SignatureLibrary::Smart.is_locally_computed());
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        let json = serde_json::to_string(&SignatureLibrary::SignalpGramPositive).unwrap();
        assert_eq!(json, "\"SIGNALP_GRAM_POSITIVE\"");
        for lib in SignatureLibrary::ALL {
            let json = serde_json::to_string(lib).unwrap();
            assert_eq!(json, format!("\"{}\"", lib.name()));
        }
    }

    #[test]
    fn test_release_display() {
        let release = SignatureLibraryRelease::new(SignatureLibrary::Pfam, "32.0");
        assert_eq!(release.to_string(), "PFAM-32.0");
    }
}
