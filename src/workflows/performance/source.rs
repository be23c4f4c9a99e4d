use super::period::Period;
use crate::workflows::intake::RawAssignment;

/// Collaborator seam for fetching raw assignment records. Network transport,
/// retries, and any response caching live behind this trait; the engine only
/// sees the full period's records already in memory.
pub trait AssignmentSource: Send + Sync {
    fn fetch(&self, period: &Period) -> Result<Vec<RawAssignment>, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("assignment source unavailable: {0}")]
    Unavailable(String),
}

/// Source backed by a fixed record set, used by the CLI and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAssignmentSource {
    records: Vec<RawAssignment>,
}

impl InMemoryAssignmentSource {
    pub fn new(records: Vec<RawAssignment>) -> Self {
        Self { records }
    }
}

impl AssignmentSource for InMemoryAssignmentSource {
    fn fetch(&self, _period: &Period) -> Result<Vec<RawAssignment>, SourceError> {
        Ok(self.records.clone())
    }
}
