//! Patient list reader
//!
//! Reads the ordered list of patient identifiers from a delimited text file.
//! Only the first column is used; any further columns (names, notes) are
//! ignored. A file that cannot be read fails the whole run since a partial
//! list is not usable.

use crate::config::InputConfig;
use crate::domain::{PatientId, PlanvaultError, Result};
use std::fs;
use std::path::Path;

/// Read patient identifiers from `path`
///
/// Blank lines and lines starting with `#` are skipped. Duplicates are kept
/// in place: each line is a separate unit of work.
///
/// # Errors
///
/// Returns [`PlanvaultError::Input`] if the file cannot be read.
///
/// # Example
///
/// ```no_run
/// use planvault::adapters::input::read_patient_ids;
/// use planvault::config::InputConfig;
///
/// let ids = read_patient_ids("patients.csv", &InputConfig::default()).unwrap();
/// println!("{} patients queued", ids.len());
/// ```
pub fn read_patient_ids(path: impl AsRef<Path>, config: &InputConfig) -> Result<Vec<PatientId>> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path).map_err(|e| {
        PlanvaultError::Input(format!(
            "Failed to read patient list {}: {}",
            path.display(),
            e
        ))
    })?;

    let ids = parse_patient_ids(&contents, config);

    tracing::info!(
        path = %path.display(),
        count = ids.len(),
        "Loaded patient list"
    );

    Ok(ids)
}

/// Parse patient identifiers from delimited text
pub fn parse_patient_ids(contents: &str, config: &InputConfig) -> Vec<PatientId> {
    let delimiter = config.delimiter_char();
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);

    let mut lines = contents.lines().enumerate();
    if config.has_header {
        lines.next();
    }

    let mut ids = Vec::new();
    for (index, line) in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match PatientId::new(first_field(trimmed, delimiter)) {
            Ok(id) => ids.push(id),
            Err(e) => {
                tracing::warn!(line = index + 1, error = %e, "Skipping patient list line");
            }
        }
    }

    ids
}

/// First delimited field of `line`
///
/// A field that opens with a double quote runs to the closing quote, so it may
/// contain the delimiter; `""` inside it stands for one quote.
fn first_field(line: &str, delimiter: char) -> String {
    let Some(quoted) = line.strip_prefix('"') else {
        return line
            .split(delimiter)
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
    };

    let mut field = String::new();
    let mut chars = quoted.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '"' {
            field.push(c);
        } else if chars.peek() == Some(&'"') {
            chars.next();
            field.push('"');
        } else {
            break;
        }
    }
    field.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use test_case::test_case;

    fn ids(values: &[PatientId]) -> Vec<&str> {
        values.iter().map(|id| id.as_str()).collect()
    }

    #[test]
    fn test_parse_one_per_line() {
        let parsed = parse_patient_ids("A\nB\nC\n", &InputConfig::default());
        assert_eq!(ids(&parsed), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_parse_first_column_only() {
        let parsed = parse_patient_ids(
            "1001,Doe^Jane,prostate\n1002,Roe^Rich,breast\n",
            &InputConfig::default(),
        );
        assert_eq!(ids(&parsed), vec!["1001", "1002"]);
    }

    #[test]
    fn test_parse_skips_header_blank_and_comments() {
        let config = InputConfig {
            delimiter: ";".to_string(),
            has_header: true,
        };
        let parsed = parse_patient_ids("PatientID;Name\n\n# paused\n\"77\";x\n88\n", &config);
        assert_eq!(ids(&parsed), vec!["77", "88"]);
    }

    #[test]
    fn test_parse_quoted_id_containing_delimiter() {
        let parsed = parse_patient_ids(
            "\"RT,1001\",Doe^Jane\n\"RT \"\"B\"\"\";x\n",
            &InputConfig::default(),
        );
        assert_eq!(ids(&parsed), vec!["RT,1001", "RT \"B\""]);
    }

    #[test_case("P1,rest" => "P1" ; "plain")]
    #[test_case("\"P1\",rest" => "P1" ; "quoted")]
    #[test_case("\"P,1\",rest" => "P,1" ; "quoted with delimiter")]
    #[test_case("\"P\"\"1\"" => "P\"1" ; "escaped quote")]
    #[test_case("\"P1" => "P1" ; "unterminated quote")]
    fn test_first_field(line: &str) -> String {
        first_field(line, ',')
    }

    #[test]
    fn test_parse_keeps_duplicates_in_order() {
        let parsed = parse_patient_ids("B\nA\nB\n", &InputConfig::default());
        assert_eq!(ids(&parsed), vec!["B", "A", "B"]);
    }

    #[test]
    fn test_parse_strips_bom_and_crlf() {
        let parsed = parse_patient_ids("\u{feff}X1\r\nX2\r\n", &InputConfig::default());
        assert_eq!(ids(&parsed), vec!["X1", "X2"]);
    }

    #[test]
    fn test_parse_skips_empty_first_column() {
        let parsed = parse_patient_ids(",orphan\nY\n", &InputConfig::default());
        assert_eq!(ids(&parsed), vec!["Y"]);
    }

    #[test]
    fn test_read_patient_ids_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"P1\nP2\n").unwrap();
        file.flush().unwrap();

        let parsed = read_patient_ids(file.path(), &InputConfig::default()).unwrap();
        assert_eq!(ids(&parsed), vec!["P1", "P2"]);
    }

    #[test]
    fn test_read_patient_ids_missing_file() {
        let result = read_patient_ids("does-not-exist.csv", &InputConfig::default());
        assert!(matches!(result, Err(PlanvaultError::Input(_))));
    }
}
