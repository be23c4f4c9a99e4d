use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::domain::{Assignment, AssignmentCounts, BucketGrade};
use super::formula;
use super::period::MonthPeriod;

/// Metrics for one contiguous 7-day window of a month. The final window is
/// clipped to the last day of the month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekBucket {
    pub week_number: usize,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    #[serde(flatten)]
    pub counts: AssignmentCounts,
    pub completion_rate: f64,
    pub on_time_rate: f64,
    pub overdue_rate: f64,
    pub quality_score: f64,
    pub grade: BucketGrade,
    pub grade_label: &'static str,
    pub trend: Option<f64>,
}

/// Partition a month's assignments into contiguous week buckets.
///
/// The first bucket starts at the later of the first of the month and the
/// earliest assigned date seen anywhere in the data, so a system younger than
/// the month begins mid-month instead of reporting empty lead-in weeks.
/// Membership is by date only; every in-month assignment lands in exactly one
/// bucket.
pub fn weekly_breakdown(assignments: &[Assignment], month: MonthPeriod) -> Vec<WeekBucket> {
    let month_start = month.first_day();
    let month_end = month.last_day();

    let system_start = match assignments.iter().map(|a| a.assigned_date).min() {
        Some(earliest) => earliest,
        None => return Vec::new(),
    };

    let mut week_start = month_start.max(system_start);
    let mut buckets = Vec::new();
    let mut previous_score: Option<f64> = None;

    while week_start <= month_end {
        let week_end = (week_start + Duration::days(6)).min(month_end);

        let counts = AssignmentCounts::tally(
            assignments
                .iter()
                .filter(|a| a.assigned_date >= week_start && a.assigned_date <= week_end),
        );

        let completion_rate = formula::completion_rate(&counts);
        let on_time_rate = formula::percentage(counts.on_time, counts.total_assignments);
        let overdue_rate = formula::percentage(counts.overdue, counts.total_assignments);
        let quality_score = formula::period_bucket_score(&counts);
        let grade = BucketGrade::from_score(quality_score);
        let trend = previous_score.map(|previous| quality_score - previous);

        buckets.push(WeekBucket {
            week_number: buckets.len() + 1,
            starts_on: week_start,
            ends_on: week_end,
            counts,
            completion_rate,
            on_time_rate,
            overdue_rate,
            quality_score,
            grade,
            grade_label: grade.label(),
            trend,
        });

        previous_score = Some(quality_score);
        week_start = week_start + Duration::days(7);
    }

    buckets
}
