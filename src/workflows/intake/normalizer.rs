use tracing::warn;

use super::raw::{parse_date, parse_datetime, RawAssignment};
use crate::workflows::performance::domain::{
    Assignment, AssignmentStatus, ReadinessLevel, WorkerName,
};

/// Outcome of normalizing one fetch of raw records. `dropped` counts the
/// records excluded from every aggregate, surfaced for observability.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBatch {
    pub assignments: Vec<Assignment>,
    pub dropped: usize,
}

/// Validate and coerce raw records into the canonical shape. Invalid records
/// are dropped and logged, never thrown: both historical producers emit
/// partially-broken rows and callers expect partial success.
pub fn normalize_batch(records: Vec<RawAssignment>) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();

    for record in records {
        match normalize_record(record) {
            Some(assignment) => batch.assignments.push(assignment),
            None => batch.dropped += 1,
        }
    }

    batch
}

fn normalize_record(record: RawAssignment) -> Option<Assignment> {
    let worker_id = match non_empty(record.worker_id.as_deref()) {
        Some(id) => id,
        None => {
            warn!("dropping assignment record with missing worker id");
            return None;
        }
    };

    let team_leader_id = match non_empty(record.team_leader_id.as_deref()) {
        Some(id) => id,
        None => {
            warn!(%worker_id, "dropping assignment record with missing team leader id");
            return None;
        }
    };

    let assigned_date = match record.assigned_date.as_deref().and_then(parse_date) {
        Some(date) => date,
        None => {
            warn!(
                %worker_id,
                raw_date = record.assigned_date.as_deref().unwrap_or(""),
                "dropping assignment record with unparsable assigned date"
            );
            return None;
        }
    };

    let status = match record.status.as_deref().and_then(parse_status) {
        Some(status) => status,
        None => {
            warn!(
                %worker_id,
                raw_status = record.status.as_deref().unwrap_or(""),
                "dropping assignment record with unknown status"
            );
            return None;
        }
    };

    let due_time = record.due_time.as_deref().and_then(parse_datetime);
    // A completion timestamp only makes sense on a completed assignment.
    let completed_at = if status == AssignmentStatus::Completed {
        record.completed_at.as_deref().and_then(parse_datetime)
    } else {
        None
    };

    let readiness = record
        .readiness
        .as_ref()
        .and_then(|submission| submission.level.as_deref())
        .and_then(parse_readiness_level);

    let worker_name = record.worker.as_ref().and_then(|name| {
        let first_name = non_empty(name.first_name.as_deref());
        let last_name = non_empty(name.last_name.as_deref());
        if first_name.is_none() && last_name.is_none() {
            return None;
        }
        Some(WorkerName {
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
        })
    });

    Some(Assignment {
        worker_id,
        team_leader_id,
        assigned_date,
        due_time,
        status,
        completed_at,
        readiness,
        worker_name,
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

fn parse_status(value: &str) -> Option<AssignmentStatus> {
    match value.trim().to_ascii_lowercase().as_str() {
        "pending" => Some(AssignmentStatus::Pending),
        "assigned" => Some(AssignmentStatus::Assigned),
        "completed" => Some(AssignmentStatus::Completed),
        "overdue" => Some(AssignmentStatus::Overdue),
        _ => None,
    }
}

fn parse_readiness_level(value: &str) -> Option<ReadinessLevel> {
    match value.trim().to_ascii_lowercase().as_str() {
        "fit" => Some(ReadinessLevel::Fit),
        "minor" => Some(ReadinessLevel::Minor),
        "not_fit" | "not fit" => Some(ReadinessLevel::NotFit),
        _ => None,
    }
}
