use chrono::NaiveDate;

use crate::workflows::intake::{RawAssignment, RawReadinessSubmission, RawWorkerName};
use crate::workflows::performance::domain::{
    Assignment, AssignmentStatus, ReadinessLevel, WorkerName,
};
use crate::workflows::performance::period::Period;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn may_2025() -> Period {
    Period::month("2025-05").expect("valid month")
}

pub(super) fn assignment(
    worker_id: &str,
    team_leader_id: &str,
    assigned: NaiveDate,
    status: AssignmentStatus,
) -> Assignment {
    Assignment {
        worker_id: worker_id.to_string(),
        team_leader_id: team_leader_id.to_string(),
        assigned_date: assigned,
        due_time: None,
        status,
        completed_at: None,
        readiness: None,
        worker_name: None,
    }
}

pub(super) fn completed(
    worker_id: &str,
    team_leader_id: &str,
    assigned: NaiveDate,
    level: ReadinessLevel,
    on_time: bool,
) -> Assignment {
    let due = assigned.and_hms_opt(9, 0, 0).expect("valid time");
    let completed_at = if on_time {
        assigned.and_hms_opt(8, 0, 0)
    } else {
        assigned.and_hms_opt(11, 0, 0)
    };

    Assignment {
        worker_id: worker_id.to_string(),
        team_leader_id: team_leader_id.to_string(),
        assigned_date: assigned,
        due_time: Some(due),
        status: AssignmentStatus::Completed,
        completed_at,
        readiness: Some(level),
        worker_name: None,
    }
}

pub(super) fn named(mut assignment: Assignment, first: &str, last: &str) -> Assignment {
    assignment.worker_name = Some(WorkerName {
        first_name: first.to_string(),
        last_name: last.to_string(),
    });
    assignment
}

/// Ten May assignments for one worker: eight completed (six on time, two
/// late) with readiness levels, one pending, one overdue.
pub(super) fn benchmark_month(worker_id: &str, team_leader_id: &str) -> Vec<Assignment> {
    use ReadinessLevel::{Fit, Minor, NotFit};

    let levels = [Fit, Fit, Minor, NotFit, Fit, Fit, Minor, Fit];
    let mut assignments = Vec::new();

    for (index, level) in levels.into_iter().enumerate() {
        let day = 2 + index as u32;
        let on_time = index < 6;
        assignments.push(completed(
            worker_id,
            team_leader_id,
            date(2025, 5, day),
            level,
            on_time,
        ));
    }

    assignments.push(assignment(
        worker_id,
        team_leader_id,
        date(2025, 5, 12),
        AssignmentStatus::Pending,
    ));
    assignments.push(assignment(
        worker_id,
        team_leader_id,
        date(2025, 5, 13),
        AssignmentStatus::Overdue,
    ));

    assignments
}

pub(super) fn raw(
    worker_id: &str,
    team_leader_id: &str,
    assigned_date: &str,
    status: &str,
) -> RawAssignment {
    RawAssignment {
        worker_id: Some(worker_id.to_string()),
        team_leader_id: Some(team_leader_id.to_string()),
        assigned_date: Some(assigned_date.to_string()),
        due_time: None,
        status: Some(status.to_string()),
        completed_at: None,
        readiness: None,
        worker: None,
    }
}

pub(super) fn raw_completed(
    worker_id: &str,
    team_leader_id: &str,
    assigned_date: &str,
    level: &str,
) -> RawAssignment {
    let mut record = raw(worker_id, team_leader_id, assigned_date, "completed");
    record.completed_at = Some(format!("{assigned_date}T08:00:00Z"));
    record.readiness = Some(RawReadinessSubmission {
        level: Some(level.to_string()),
    });
    record.worker = Some(RawWorkerName {
        first_name: Some("Ana".to_string()),
        last_name: Some("Reyes".to_string()),
    });
    record
}
