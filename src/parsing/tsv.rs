use std::path::Path;

use crate::core::protein::Protein;
use crate::parsing::{read_to_string, ParseError};
use crate::utils::validation::{check_protein_limit, is_valid_md5};

/// Parse a protein table with columns: [id,] checksum
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_tsv_file(path: &Path, delimiter: char) -> Result<Vec<Protein>, ParseError> {
    let content = read_to_string(path)?;
    parse_tsv_text(&content, delimiter)
}

/// Parse protein table text with columns: [id,] checksum
///
/// A single column is taken as the checksum. With two or more columns the
/// first is the protein id and the second the checksum.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line has an empty checksum or no
/// proteins are found, or `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_tsv_text(text: &str, delimiter: char) -> Result<Vec<Protein>, ParseError> {
    let mut proteins = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // Split before trimming so a trailing delimiter leaves an empty field
        let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();

        // Check if first non-empty/non-comment line is a header
        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.to_lowercase()).unwrap_or_default();
            if matches!(first.as_str(), "id" | "protein" | "name" | "checksum" | "md5") {
                continue;
            }
        }

        let line_num = i + 1;

        let (id, checksum) = match fields.as_slice() {
            [checksum] => (None, *checksum),
            [id, checksum, ..] => (Some(*id), *checksum),
            [] => unreachable!("split always yields at least one field"),
        };

        if checksum.is_empty() {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has an empty checksum"
            )));
        }

        if !is_valid_md5(checksum) {
            tracing::warn!("Line {line_num}: '{checksum}' is not an MD5 checksum; no lookup hits will match it");
        }

        if check_protein_limit(proteins.len()).is_some() {
            return Err(ParseError::TooManyRecords(proteins.len()));
        }

        let mut protein = Protein::new(checksum);
        if let Some(id) = id.filter(|s| !s.is_empty()) {
            protein = protein.with_id(id);
        }
        proteins.push(protein);
    }

    if proteins.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No proteins found in file".to_string(),
        ));
    }

    Ok(proteins)
}
