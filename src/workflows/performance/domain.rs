use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Canonical assignment record after intake validation: one scheduled
/// work-readiness check-in for one worker on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub worker_id: String,
    pub team_leader_id: String,
    pub assigned_date: NaiveDate,
    pub due_time: Option<NaiveDateTime>,
    pub status: AssignmentStatus,
    pub completed_at: Option<NaiveDateTime>,
    pub readiness: Option<ReadinessLevel>,
    pub worker_name: Option<WorkerName>,
}

impl Assignment {
    /// Completed before the deadline, or completed with no deadline set.
    pub fn is_on_time(&self) -> bool {
        if self.status != AssignmentStatus::Completed {
            return false;
        }
        match (self.due_time, self.completed_at) {
            (None, _) => true,
            (Some(due), Some(done)) => done <= due,
            (Some(_), None) => false,
        }
    }
}

/// Lifecycle status of a scheduled check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Pending,
    Assigned,
    Completed,
    Overdue,
}

impl AssignmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::Assigned => "assigned",
            AssignmentStatus::Completed => "completed",
            AssignmentStatus::Overdue => "overdue",
        }
    }
}

/// Worker's self-reported fitness for work on a submitted check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessLevel {
    Fit,
    Minor,
    NotFit,
}

impl ReadinessLevel {
    pub const fn label(self) -> &'static str {
        match self {
            ReadinessLevel::Fit => "fit",
            ReadinessLevel::Minor => "minor",
            ReadinessLevel::NotFit => "not_fit",
        }
    }

    /// Quality points contributed by one submission at this level.
    pub const fn quality_points(self) -> f64 {
        match self {
            ReadinessLevel::Fit => 100.0,
            ReadinessLevel::Minor => 70.0,
            ReadinessLevel::NotFit => 30.0,
        }
    }
}

/// Display name fields carried through for labeling only, never scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerName {
    pub first_name: String,
    pub last_name: String,
}

impl WorkerName {
    pub fn display_name(&self) -> String {
        let joined = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let joined = joined.trim();
        if joined.is_empty() {
            "Unnamed Worker".to_string()
        } else {
            joined.to_string()
        }
    }
}

/// Raw tallies over a set of assignments. `completed == on_time + late` holds
/// by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentCounts {
    pub total_assignments: usize,
    pub completed: usize,
    pub on_time: usize,
    pub late: usize,
    pub pending: usize,
    pub overdue: usize,
}

impl AssignmentCounts {
    pub fn record(&mut self, assignment: &Assignment) {
        self.total_assignments += 1;
        match assignment.status {
            AssignmentStatus::Completed => {
                self.completed += 1;
                if assignment.is_on_time() {
                    self.on_time += 1;
                } else {
                    self.late += 1;
                }
            }
            AssignmentStatus::Pending => self.pending += 1,
            AssignmentStatus::Overdue => self.overdue += 1,
            AssignmentStatus::Assigned => {}
        }
    }

    pub fn tally<'a, I>(assignments: I) -> Self
    where
        I: IntoIterator<Item = &'a Assignment>,
    {
        let mut counts = Self::default();
        for assignment in assignments {
            counts.record(assignment);
        }
        counts
    }
}

/// Letter grade for worker and team composites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        if score >= 95.0 {
            Grade::A
        } else if score >= 85.0 {
            Grade::B
        } else if score >= 70.0 {
            Grade::C
        } else {
            Grade::D
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }
}

/// Finer-grained grade scale used for calendar-week buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BucketGrade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    D,
    F,
}

impl BucketGrade {
    pub fn from_score(score: f64) -> Self {
        if score >= 95.0 {
            BucketGrade::APlus
        } else if score >= 90.0 {
            BucketGrade::A
        } else if score >= 85.0 {
            BucketGrade::AMinus
        } else if score >= 80.0 {
            BucketGrade::BPlus
        } else if score >= 75.0 {
            BucketGrade::B
        } else if score >= 70.0 {
            BucketGrade::BMinus
        } else if score >= 65.0 {
            BucketGrade::CPlus
        } else if score >= 60.0 {
            BucketGrade::C
        } else if score >= 55.0 {
            BucketGrade::CMinus
        } else if score >= 50.0 {
            BucketGrade::D
        } else {
            BucketGrade::F
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            BucketGrade::APlus => "A+",
            BucketGrade::A => "A",
            BucketGrade::AMinus => "A-",
            BucketGrade::BPlus => "B+",
            BucketGrade::B => "B",
            BucketGrade::BMinus => "B-",
            BucketGrade::CPlus => "C+",
            BucketGrade::C => "C",
            BucketGrade::CMinus => "C-",
            BucketGrade::D => "D",
            BucketGrade::F => "F",
        }
    }
}

/// Marks whether a quality score was computed from readiness submissions or
/// fell back to the fixed baseline, so a baseline is never mistaken for a
/// measured average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityBasis {
    Measured,
    Baseline,
}

impl QualityBasis {
    pub const fn label(self) -> &'static str {
        match self {
            QualityBasis::Measured => "measured",
            QualityBasis::Baseline => "baseline",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn base_assignment(status: AssignmentStatus) -> Assignment {
        Assignment {
            worker_id: "w-1".to_string(),
            team_leader_id: "tl-1".to_string(),
            assigned_date: NaiveDate::from_ymd_opt(2025, 5, 5).expect("valid date"),
            due_time: None,
            status,
            completed_at: None,
            readiness: None,
            worker_name: None,
        }
    }

    #[test]
    fn completion_without_deadline_counts_as_on_time() {
        let mut assignment = base_assignment(AssignmentStatus::Completed);
        assignment.completed_at = NaiveDate::from_ymd_opt(2025, 5, 5)
            .expect("valid date")
            .and_hms_opt(9, 0, 0);
        assert!(assignment.is_on_time());
    }

    #[test]
    fn completion_after_deadline_counts_as_late() {
        let mut assignment = base_assignment(AssignmentStatus::Completed);
        assignment.due_time = NaiveDate::from_ymd_opt(2025, 5, 5)
            .expect("valid date")
            .and_hms_opt(8, 0, 0);
        assignment.completed_at = NaiveDate::from_ymd_opt(2025, 5, 5)
            .expect("valid date")
            .and_hms_opt(8, 30, 0);
        assert!(!assignment.is_on_time());

        let counts = AssignmentCounts::tally(std::slice::from_ref(&assignment));
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.late, 1);
        assert_eq!(counts.on_time, 0);
    }

    #[test]
    fn grade_thresholds_follow_fixed_cutoffs() {
        assert_eq!(Grade::from_score(95.0), Grade::A);
        assert_eq!(Grade::from_score(94.9), Grade::B);
        assert_eq!(Grade::from_score(85.0), Grade::B);
        assert_eq!(Grade::from_score(70.0), Grade::C);
        assert_eq!(Grade::from_score(69.9), Grade::D);
        assert_eq!(Grade::from_score(0.0), Grade::D);
    }

    #[test]
    fn bucket_grades_cover_the_finer_scale() {
        assert_eq!(BucketGrade::from_score(96.0), BucketGrade::APlus);
        assert_eq!(BucketGrade::from_score(90.0), BucketGrade::A);
        assert_eq!(BucketGrade::from_score(85.0), BucketGrade::AMinus);
        assert_eq!(BucketGrade::from_score(80.0), BucketGrade::BPlus);
        assert_eq!(BucketGrade::from_score(75.0), BucketGrade::B);
        assert_eq!(BucketGrade::from_score(70.0), BucketGrade::BMinus);
        assert_eq!(BucketGrade::from_score(65.0), BucketGrade::CPlus);
        assert_eq!(BucketGrade::from_score(60.0), BucketGrade::C);
        assert_eq!(BucketGrade::from_score(55.0), BucketGrade::CMinus);
        assert_eq!(BucketGrade::from_score(50.0), BucketGrade::D);
        assert_eq!(BucketGrade::from_score(49.9), BucketGrade::F);
        assert_eq!(BucketGrade::APlus.label(), "A+");
    }

    #[test]
    fn display_name_falls_back_when_blank() {
        let name = WorkerName {
            first_name: "  ".to_string(),
            last_name: String::new(),
        };
        assert_eq!(name.display_name(), "Unnamed Worker");

        let name = WorkerName {
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
        };
        assert_eq!(name.display_name(), "Ana Reyes");
    }
}
