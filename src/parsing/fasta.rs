//! Protein FASTA parser using noodles.
//!
//! Each record becomes a [`Protein`] keyed by the MD5 of its upper-cased
//! residues. Supports both uncompressed and gzip/bgzip compressed files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.faa` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.faa.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.faa.bgz` (bgzip compressed)

use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use noodles::fasta;

use crate::core::protein::Protein;
use crate::parsing::{is_gzipped, ParseError};
use crate::utils::validation::check_protein_limit;

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    for ext in ["fa", "fasta", "faa"] {
        if path_str.ends_with(&format!(".{ext}.gz")) || path_str.ends_with(&format!(".{ext}.bgz"))
        {
            return true;
        }
    }

    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "faa")
    )
}

/// Parse a protein FASTA file, computing a checksum per sequence.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, `ParseError::InvalidFormat` if no sequences are found, or
/// `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_fasta_file(path: &Path) -> Result<Vec<Protein>, ParseError> {
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        let reader = BufReader::new(GzDecoder::new(file));
        parse_fasta_reader(&mut fasta::io::Reader::new(reader))
    } else {
        let reader = BufReader::new(file);
        parse_fasta_reader(&mut fasta::io::Reader::new(reader))
    }
}

/// Parse protein FASTA from text
///
/// # Errors
///
/// See [`parse_fasta_file`].
pub fn parse_fasta_text(text: &str) -> Result<Vec<Protein>, ParseError> {
    parse_fasta_reader(&mut fasta::io::Reader::new(text.as_bytes()))
}

fn parse_fasta_reader<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<Vec<Protein>, ParseError> {
    let mut proteins = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        if check_protein_limit(proteins.len()).is_some() {
            return Err(ParseError::TooManyRecords(proteins.len()));
        }

        let name = String::from_utf8_lossy(record.name()).to_string();
        let sequence = String::from_utf8_lossy(record.sequence().as_ref()).to_string();

        proteins.push(Protein::from_sequence(sequence).with_id(name));
    }

    if proteins.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(proteins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::sequence_checksum;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_is_fasta_file() {
        assert!(is_fasta_file(Path::new("test.fa")));
        assert!(is_fasta_file(Path::new("test.fasta")));
        assert!(is_fasta_file(Path::new("test.faa")));
        assert!(is_fasta_file(Path::new("test.faa.gz")));
        assert!(is_fasta_file(Path::new("test.fasta.bgz")));
        assert!(is_fasta_file(Path::new("/path/to/Proteins.FA")));

        assert!(!is_fasta_file(Path::new("proteins.tsv")));
        assert!(!is_fasta_file(Path::new("hits.txt.gz")));
    }

    #[test]
    fn test_parse_fasta_text() {
        let proteins = parse_fasta_text(">p1 first\nMKVL\nAG\n>p2\nmkvlag\n").unwrap();
        assert_eq!(proteins.len(), 2);
        assert_eq!(proteins[0].id.as_deref(), Some("p1"));
        assert_eq!(proteins[0].sequence.as_deref(), Some("MKVLAG"));
        assert_eq!(proteins[0].checksum, sequence_checksum(b"MKVLAG"));
        // Residue case does not change the checksum
        assert_eq!(proteins[0].checksum, proteins[1].checksum);
    }

    #[test]
    fn test_parse_fasta_gzipped() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut temp = NamedTempFile::with_suffix(".faa.gz").unwrap();
        {
            let mut encoder = GzEncoder::new(temp.as_file_mut(), Compression::default());
            encoder.write_all(b">p1\nMKV\n").unwrap();
            encoder.finish().unwrap();
        }

        let proteins = parse_fasta_file(temp.path()).unwrap();
        assert_eq!(proteins.len(), 1);
        assert_eq!(proteins[0].checksum, sequence_checksum(b"MKV"));
    }

    #[test]
    fn test_parse_empty_fasta() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b"").unwrap();
        temp.flush().unwrap();

        assert!(parse_fasta_file(temp.path()).is_err());
    }
}
