use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Assignment-like record as emitted by either historical producer. The older
/// feed spells fields in snake_case, the newer one in camelCase; aliases
/// accept both so consumers never probe field names at runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAssignment {
    #[serde(default, alias = "workerId", deserialize_with = "empty_string_as_none")]
    pub worker_id: Option<String>,
    #[serde(default, alias = "teamLeaderId", deserialize_with = "empty_string_as_none")]
    pub team_leader_id: Option<String>,
    #[serde(default, alias = "assignedDate", deserialize_with = "empty_string_as_none")]
    pub assigned_date: Option<String>,
    #[serde(default, alias = "dueTime", deserialize_with = "empty_string_as_none")]
    pub due_time: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub status: Option<String>,
    #[serde(default, alias = "completedAt", deserialize_with = "empty_string_as_none")]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub readiness: Option<RawReadinessSubmission>,
    #[serde(default)]
    pub worker: Option<RawWorkerName>,
}

/// Linked readiness submission payload; only the severity level matters here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReadinessSubmission {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub level: Option<String>,
}

/// Display name fields, again in either spelling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWorkerName {
    #[serde(default, alias = "firstName", deserialize_with = "empty_string_as_none")]
    pub first_name: Option<String>,
    #[serde(default, alias = "lastName", deserialize_with = "empty_string_as_none")]
    pub last_name: Option<String>,
}

/// Row shape of the legacy CSV export.
#[derive(Debug, Deserialize)]
pub(crate) struct CsvAssignmentRow {
    #[serde(rename = "Worker ID", default, deserialize_with = "empty_string_as_none")]
    worker_id: Option<String>,
    #[serde(
        rename = "Team Leader ID",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    team_leader_id: Option<String>,
    #[serde(
        rename = "Assigned Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    assigned_date: Option<String>,
    #[serde(rename = "Due Time", default, deserialize_with = "empty_string_as_none")]
    due_time: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(
        rename = "Completed At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    completed_at: Option<String>,
    #[serde(
        rename = "Readiness Level",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    readiness_level: Option<String>,
    #[serde(rename = "First Name", default, deserialize_with = "empty_string_as_none")]
    first_name: Option<String>,
    #[serde(rename = "Last Name", default, deserialize_with = "empty_string_as_none")]
    last_name: Option<String>,
}

impl CsvAssignmentRow {
    pub(crate) fn into_raw(self) -> RawAssignment {
        let readiness = self
            .readiness_level
            .map(|level| RawReadinessSubmission { level: Some(level) });
        let worker = if self.first_name.is_some() || self.last_name.is_some() {
            Some(RawWorkerName {
                first_name: self.first_name,
                last_name: self.last_name,
            })
        } else {
            None
        };

        RawAssignment {
            worker_id: self.worker_id,
            team_leader_id: self.team_leader_id,
            assigned_date: self.assigned_date,
            due_time: self.due_time,
            status: self.status,
            completed_at: self.completed_at,
            readiness,
            worker,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub(crate) fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    parse_datetime(trimmed).map(|dt| dt.date())
}

#[cfg(test)]
pub(crate) fn parse_datetime_for_tests(value: &str) -> Option<NaiveDateTime> {
    parse_datetime(value)
}
