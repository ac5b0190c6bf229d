use std::path::Path;

use crate::core::hit::SequenceHits;
use crate::parsing::{read_to_string, ParseError};
use crate::utils::validation::{canonical_checksum, check_hit_limit};

/// Parse a lookup dump file.
///
/// See [`parse_hits_text`] for the format. Gzip-compressed dumps are read
/// transparently.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_hits_file(path: &Path) -> Result<Vec<SequenceHits>, ParseError> {
    let content = read_to_string(path)?;
    parse_hits_text(&content)
}

/// Parse lookup dump text into per-protein hit containers.
///
/// One hit per line: `checksum<TAB>raw-hit`. Consecutive lines sharing a
/// checksum (compared case-insensitively) are grouped into one container, so
/// the order of containers and of hits within a container follows the file.
/// Blank lines and lines starting with `#` are skipped. Raw hits are not
/// parsed here.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line has no tab separator or an
/// empty field, or `ParseError::TooManyRecords` if the hit limit is exceeded.
pub fn parse_hits_text(text: &str) -> Result<Vec<SequenceHits>, ParseError> {
    let mut containers: Vec<SequenceHits> = Vec::new();
    let mut hit_count = 0;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line_num = i + 1;
        let (checksum, raw_hit) = line
            .split_once('\t')
            .map(|(c, h)| (c.trim(), h.trim()))
            .filter(|(c, h)| !c.is_empty() && !h.is_empty())
            .ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "Line {line_num} is not of the form checksum<TAB>hit"
                ))
            })?;

        if check_hit_limit(hit_count).is_some() {
            return Err(ParseError::TooManyRecords(hit_count));
        }
        hit_count += 1;

        let checksum = canonical_checksum(checksum);
        match containers.last_mut() {
            Some(current) if current.checksum == checksum => {
                current.hits.push(raw_hit.to_string());
            }
            _ => containers.push(SequenceHits::new(checksum).with_hit(raw_hit)),
        }
    }

    Ok(containers)
}
