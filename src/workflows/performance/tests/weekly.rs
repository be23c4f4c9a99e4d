use super::common::*;
use crate::workflows::performance::domain::{AssignmentStatus, BucketGrade, ReadinessLevel};
use crate::workflows::performance::period::MonthPeriod;
use crate::workflows::performance::weekly::weekly_breakdown;

fn may() -> MonthPeriod {
    MonthPeriod::parse("2025-05").expect("valid month")
}

#[test]
fn buckets_partition_the_month_contiguously() {
    let mut assignments = Vec::new();
    // Data older than the month, so buckets start on the 1st.
    assignments.push(assignment(
        "w-1",
        "tl-1",
        date(2025, 4, 15),
        AssignmentStatus::Completed,
    ));
    for day in [1, 7, 8, 14, 15, 21, 22, 28, 29, 31] {
        assignments.push(completed(
            "w-1",
            "tl-1",
            date(2025, 5, day),
            ReadinessLevel::Fit,
            true,
        ));
    }

    let weeks = weekly_breakdown(&assignments, may());
    assert_eq!(weeks.len(), 5);

    // Contiguous 7-day windows, final one clipped to May 31.
    assert_eq!(weeks[0].starts_on, date(2025, 5, 1));
    assert_eq!(weeks[0].ends_on, date(2025, 5, 7));
    assert_eq!(weeks[3].starts_on, date(2025, 5, 22));
    assert_eq!(weeks[3].ends_on, date(2025, 5, 28));
    assert_eq!(weeks[4].starts_on, date(2025, 5, 29));
    assert_eq!(weeks[4].ends_on, date(2025, 5, 31));
    for pair in weeks.windows(2) {
        assert_eq!(
            pair[1].starts_on,
            pair[0].ends_on + chrono::Duration::days(1)
        );
    }

    // Every in-month assignment lands in exactly one bucket.
    let total_bucketed: usize = weeks.iter().map(|w| w.counts.total_assignments).sum();
    assert_eq!(total_bucketed, 10);
    assert_eq!(weeks[0].counts.total_assignments, 2);
    assert_eq!(weeks[4].counts.total_assignments, 2);

    let week_numbers: Vec<_> = weeks.iter().map(|w| w.week_number).collect();
    assert_eq!(week_numbers, vec![1, 2, 3, 4, 5]);
}

#[test]
fn first_bucket_starts_mid_month_for_a_young_system() {
    let assignments = vec![
        completed("w-1", "tl-1", date(2025, 5, 10), ReadinessLevel::Fit, true),
        completed("w-1", "tl-1", date(2025, 5, 20), ReadinessLevel::Fit, true),
    ];

    let weeks = weekly_breakdown(&assignments, may());
    assert_eq!(weeks[0].starts_on, date(2025, 5, 10));
    assert_eq!(weeks[0].ends_on, date(2025, 5, 16));
    assert_eq!(weeks.last().expect("weeks").ends_on, date(2025, 5, 31));
}

#[test]
fn no_assignments_yields_no_buckets() {
    let weeks = weekly_breakdown(&[], may());
    assert!(weeks.is_empty());
}

#[test]
fn data_entirely_after_the_month_yields_no_buckets() {
    let assignments = vec![completed(
        "w-1",
        "tl-1",
        date(2025, 6, 3),
        ReadinessLevel::Fit,
        true,
    )];
    let weeks = weekly_breakdown(&assignments, may());
    assert!(weeks.is_empty());
}

#[test]
fn bucket_score_blends_completion_timeliness_and_overdue() {
    let mut assignments = Vec::new();
    // Week of May 1-7: 8 completed (6 on time), 1 pending, 1 overdue.
    for index in 0..8u32 {
        assignments.push(completed(
            "w-1",
            "tl-1",
            date(2025, 5, 1 + (index % 7)),
            ReadinessLevel::Fit,
            index < 6,
        ));
    }
    assignments.push(assignment(
        "w-1",
        "tl-1",
        date(2025, 5, 2),
        AssignmentStatus::Pending,
    ));
    assignments.push(assignment(
        "w-1",
        "tl-1",
        date(2025, 5, 3),
        AssignmentStatus::Overdue,
    ));

    let weeks = weekly_breakdown(&assignments, may());
    let first = &weeks[0];
    assert_eq!(first.counts.total_assignments, 10);
    assert_eq!(first.completion_rate, 80.0);
    assert_eq!(first.on_time_rate, 60.0);
    assert_eq!(first.overdue_rate, 10.0);
    // 0.5*80 + 0.3*60 - 0.2*10
    assert_eq!(first.quality_score, 56.0);
    assert_eq!(first.grade, BucketGrade::CMinus);
}

#[test]
fn bucket_grades_use_the_finer_scale() {
    let assignments = vec![
        completed("w-1", "tl-1", date(2025, 5, 2), ReadinessLevel::Fit, true),
        completed("w-1", "tl-1", date(2025, 5, 3), ReadinessLevel::Fit, true),
    ];

    let weeks = weekly_breakdown(&assignments, may());
    // All completed on time: 0.5*100 + 0.3*100 = 80.
    assert_eq!(weeks[0].quality_score, 80.0);
    assert_eq!(weeks[0].grade, BucketGrade::BPlus);
    assert_eq!(weeks[0].grade_label, "B+");
}

#[test]
fn trend_is_defined_from_the_second_bucket_on() {
    let mut assignments = Vec::new();
    // Week 1: all on time. Week 2: all overdue.
    for day in 1..=3 {
        assignments.push(completed(
            "w-1",
            "tl-1",
            date(2025, 5, day),
            ReadinessLevel::Fit,
            true,
        ));
    }
    for day in 8..=10 {
        assignments.push(assignment(
            "w-1",
            "tl-1",
            date(2025, 5, day),
            AssignmentStatus::Overdue,
        ));
    }

    let weeks = weekly_breakdown(&assignments, may());
    assert!(weeks.len() >= 2);
    assert_eq!(weeks[0].trend, None);
    let second = &weeks[1];
    // 80 -> 0 across the first two buckets.
    assert_eq!(second.quality_score, 0.0);
    assert_eq!(second.trend, Some(-80.0));
    assert_eq!(second.grade, BucketGrade::F);
}

#[test]
fn membership_is_by_date_only() {
    let mut late_evening = completed("w-1", "tl-1", date(2025, 5, 7), ReadinessLevel::Fit, true);
    late_evening.due_time = date(2025, 5, 9).and_hms_opt(23, 59, 0);
    late_evening.completed_at = date(2025, 5, 8).and_hms_opt(0, 5, 0);

    let weeks = weekly_breakdown(&[late_evening], may());
    // Assigned May 7: belongs to the first bucket even though the work
    // finished on the 8th.
    assert_eq!(weeks[0].starts_on, date(2025, 5, 7));
    assert_eq!(weeks[0].counts.total_assignments, 1);
}
