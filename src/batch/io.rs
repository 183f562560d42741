//! JSON input and output files for batch runs

use crate::error::{Result, VerifierError};
use crate::facts::{InputRecord, VerificationRecord};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Read the input records; a missing or unparseable file aborts the run
pub fn read_records(path: &Path) -> Result<Vec<InputRecord>> {
    let file = File::open(path).map_err(|e| {
        VerifierError::Input(format!("'{}' could not be opened: {}", path.display(), e))
    })?;

    let records: Vec<InputRecord> = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        VerifierError::Input(format!(
            "could not decode JSON from '{}': {}",
            path.display(),
            e
        ))
    })?;

    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Write verification records as a pretty-printed JSON array
pub fn write_records(path: &Path, records: &[VerificationRecord]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!("Results saved to '{}'", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::Triple;
    use serde_json::json;

    #[test]
    fn test_read_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.json");
        std::fs::write(
            &path,
            r#"[{"title": "Id1", "output": ["A | b | C", 7]}, {"title": "Id2"}]"#,
        )
        .unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].triples.len(), 2);
        assert!(records[1].triples.is_empty());
    }

    #[test]
    fn test_missing_input_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_records(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(VerifierError::Input(_))));
    }

    #[test]
    fn test_unparseable_input_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = read_records(&path);
        assert!(matches!(result, Err(VerifierError::Input(_))));
    }

    #[test]
    fn test_write_records_keeps_non_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let triple = Triple::new("Ålesund", "country", "Norway");
        let records = vec![VerificationRecord::new(
            json!("Id1"),
            &triple,
            "ASK".to_string(),
            false,
        )];

        write_records(&path, &records).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Ålesund"));
        let parsed: Vec<VerificationRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, records);
    }
}
