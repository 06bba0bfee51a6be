//! Labeled training corpus loading.
//!
//! The training corpus is a delimited-record file with a header row and two
//! required columns: `text` (the statement) and `label` (0 = real,
//! 1 = fake). Extra columns are ignored. Documents are ephemeral: they
//! exist only for the duration of a training run.

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use log::debug;

use crate::error::{Result, VeritasError};

/// One labeled training document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledDocument {
    /// Raw statement text.
    pub text: String,
    /// Class label: 0 = real, 1 = fake.
    pub label: u8,
}

/// Load a labeled corpus from a CSV file.
///
/// Columns are located by header name; any columns beyond `text` and
/// `label` are ignored.
///
/// # Errors
///
/// Returns an `InputValidation` error when either required column is
/// missing, a record's text is empty, or a label is not 0 or 1. I/O and
/// CSV framing problems surface as `Io` errors.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<LabeledDocument>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path.as_ref())
        .map_err(into_veritas_error)?;

    let headers = reader.headers().map_err(into_veritas_error)?;
    let text_col = find_column(headers, "text")?;
    let label_col = find_column(headers, "label")?;

    let mut documents = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(into_veritas_error)?;
        // Header is line 1; data starts at line 2.
        let line = row + 2;

        let text = record.get(text_col).unwrap_or("");
        if text.is_empty() {
            return Err(VeritasError::input_validation(format!(
                "empty text field at line {line}"
            )));
        }

        let raw_label = record.get(label_col).unwrap_or("");
        let label = match raw_label {
            "0" => 0,
            "1" => 1,
            other => {
                return Err(VeritasError::input_validation(format!(
                    "label must be 0 or 1, got {other:?} at line {line}"
                )));
            }
        };

        documents.push(LabeledDocument {
            text: text.to_owned(),
            label,
        });
    }

    debug!("loaded {} labeled documents", documents.len());
    Ok(documents)
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| {
            VeritasError::input_validation(format!("corpus is missing the {name:?} column"))
        })
}

fn into_veritas_error(error: csv::Error) -> VeritasError {
    match error.into_kind() {
        csv::ErrorKind::Io(io) => VeritasError::Io(io),
        other => VeritasError::input_validation(format!("malformed CSV record: {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_corpus(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("corpus.csv");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_corpus() {
        let dir = TempDir::new().unwrap();
        let path = write_corpus(
            &dir,
            "text,label\nmiracle cure discovered,1\npeer reviewed research,0\n",
        );

        let documents = load_corpus(&path).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].text, "miracle cure discovered");
        assert_eq!(documents[0].label, 1);
        assert_eq!(documents[1].label, 0);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write_corpus(
            &dir,
            "id,text,label,source\n7,something happened,0,wire\n",
        );

        let documents = load_corpus(&path).unwrap();
        assert_eq!(documents[0].text, "something happened");
        assert_eq!(documents[0].label, 0);
    }

    #[test]
    fn test_missing_label_column() {
        let dir = TempDir::new().unwrap();
        let path = write_corpus(&dir, "text\nsomething happened\n");

        match load_corpus(&path) {
            Err(VeritasError::InputValidation(msg)) => assert!(msg.contains("label")),
            other => panic!("Expected InputValidation, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_label_value() {
        let dir = TempDir::new().unwrap();
        let path = write_corpus(&dir, "text,label\nsomething happened,2\n");

        assert!(matches!(
            load_corpus(&path),
            Err(VeritasError::InputValidation(_))
        ));
    }

    #[test]
    fn test_empty_text_field() {
        let dir = TempDir::new().unwrap();
        let path = write_corpus(&dir, "text,label\n,1\n");

        assert!(matches!(
            load_corpus(&path),
            Err(VeritasError::InputValidation(_))
        ));
    }
}
