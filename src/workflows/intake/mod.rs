//! Raw assignment intake from the two historical producers: JSON payloads
//! (snake_case or camelCase spellings) and the legacy headed CSV export.

mod normalizer;
mod raw;

use std::io::Read;
use std::path::Path;

pub use normalizer::{normalize_batch, NormalizedBatch};
pub use raw::{RawAssignment, RawReadinessSubmission, RawWorkerName};

use raw::CsvAssignmentRow;

#[derive(Debug)]
pub enum AssignmentImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for AssignmentImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentImportError::Io(err) => {
                write!(f, "failed to read assignment export: {}", err)
            }
            AssignmentImportError::Csv(err) => write!(f, "invalid assignment CSV data: {}", err),
            AssignmentImportError::Json(err) => write!(f, "invalid assignment JSON data: {}", err),
        }
    }
}

impl std::error::Error for AssignmentImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssignmentImportError::Io(err) => Some(err),
            AssignmentImportError::Csv(err) => Some(err),
            AssignmentImportError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for AssignmentImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for AssignmentImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for AssignmentImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Reads raw assignment exports and hands them to the normalizer. Individual
/// bad records are dropped and counted; only an unreadable or structurally
/// invalid document is an error.
pub struct AssignmentImporter;

impl AssignmentImporter {
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<NormalizedBatch, AssignmentImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(file)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<NormalizedBatch, AssignmentImportError> {
        let records: Vec<RawAssignment> = serde_json::from_reader(reader)?;
        Ok(normalize_batch(records))
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<NormalizedBatch, AssignmentImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<NormalizedBatch, AssignmentImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in csv_reader.deserialize::<CsvAssignmentRow>() {
            records.push(row?.into_raw());
        }

        Ok(normalize_batch(records))
    }
}
