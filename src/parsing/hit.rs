use std::str::FromStr;
use thiserror::Error;

use crate::core::hit::{HitLocation, HitRecord};
use crate::core::library::SignatureLibrary;
use crate::core::types::HmmBounds;

/// Field separator within a raw hit string
pub const HIT_DELIMITER: char = ',';

/// Number of leading fields every raw hit must carry
pub const REQUIRED_FIELDS: usize = 4;

// Field positions in a raw hit
const LIBRARY: usize = 0;
const VERSION: usize = 1;
const ACCESSION: usize = 2;
const CHECKSUM: usize = 3;
const SEQ_SCORE: usize = 4;
const SEQ_EVALUE: usize = 5;
const LOC_START: usize = 6;
const LOC_END: usize = 7;
const LOC_SCORE: usize = 8;
const LOC_EVALUE: usize = 9;
const HMM_START: usize = 10;
const HMM_END: usize = 11;
const HMM_BOUNDS: usize = 12;
const ENV_START: usize = 13;
const ENV_END: usize = 14;

#[derive(Error, Debug, PartialEq)]
pub enum RecordParseError {
    #[error("Hit has {0} fields, expected at least {REQUIRED_FIELDS}")]
    TooFewFields(usize),

    #[error("Hit has an empty {0} field")]
    EmptyField(&'static str),

    #[error("Unknown signature library '{0}'")]
    UnknownLibrary(String),

    #[error("Invalid value '{value}' for {field}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid HMM bounds '{0}'")]
    InvalidHmmBounds(String),
}

/// Parse one raw hit string from the lookup store.
///
/// Layout (comma separated):
/// `library,version,accession,checksum[,seq_score,seq_evalue,start,end,score,evalue,hmm_start,hmm_end,hmm_bounds,env_start,env_end]`
///
/// Trailing payload fields may be omitted or left empty. A location is only
/// recorded when both start and end are present.
///
/// # Errors
///
/// Returns `RecordParseError` when a required field is missing or empty, the
/// library is unknown, or a numeric field does not parse.
pub fn parse_hit(raw: &str) -> Result<HitRecord, RecordParseError> {
    let fields: Vec<&str> = raw.trim().split(HIT_DELIMITER).map(str::trim).collect();
    if fields.len() < REQUIRED_FIELDS {
        return Err(RecordParseError::TooFewFields(fields.len()));
    }

    let library_name = required(&fields, LIBRARY, "library")?;
    let library = SignatureLibrary::lookup(library_name)
        .ok_or_else(|| RecordParseError::UnknownLibrary(library_name.to_string()))?;

    let start = optional::<u32>(&fields, LOC_START, "location start")?;
    let end = optional::<u32>(&fields, LOC_END, "location end")?;

    let location = match (start, end) {
        (Some(start), Some(end)) => Some(HitLocation {
            start,
            end,
            score: optional(&fields, LOC_SCORE, "location score")?,
            evalue: optional(&fields, LOC_EVALUE, "location evalue")?,
            hmm_start: optional(&fields, HMM_START, "hmm start")?,
            hmm_end: optional(&fields, HMM_END, "hmm end")?,
            hmm_bounds: field(&fields, HMM_BOUNDS)
                .map(|s| {
                    s.parse::<HmmBounds>()
                        .map_err(|_| RecordParseError::InvalidHmmBounds(s.to_string()))
                })
                .transpose()?,
            envelope_start: optional(&fields, ENV_START, "envelope start")?,
            envelope_end: optional(&fields, ENV_END, "envelope end")?,
        }),
        _ => None,
    };

    Ok(HitRecord {
        library,
        version: required(&fields, VERSION, "version")?.to_string(),
        accession: required(&fields, ACCESSION, "accession")?.to_string(),
        protein_checksum: required(&fields, CHECKSUM, "checksum")?.to_string(),
        sequence_score: optional(&fields, SEQ_SCORE, "sequence score")?,
        sequence_evalue: optional(&fields, SEQ_EVALUE, "sequence evalue")?,
        location,
    })
}

fn field<'a>(fields: &[&'a str], index: usize) -> Option<&'a str> {
    fields.get(index).copied().filter(|s| !s.is_empty())
}

fn required<'a>(
    fields: &[&'a str],
    index: usize,
    name: &'static str,
) -> Result<&'a str, RecordParseError> {
    field(fields, index).ok_or(RecordParseError::EmptyField(name))
}

fn optional<T: FromStr>(
    fields: &[&str],
    index: usize,
    name: &'static str,
) -> Result<Option<T>, RecordParseError> {
    field(fields, index)
        .map(|s| {
            s.parse::<T>().map_err(|_| RecordParseError::InvalidNumber {
                field: name,
                value: s.to_string(),
            })
        })
        .transpose()
}
