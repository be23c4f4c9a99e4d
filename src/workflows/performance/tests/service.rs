use std::sync::Arc;

use super::common::*;
use crate::workflows::performance::insights::InsightKind;
use crate::workflows::performance::period::{MonthPeriod, Period, PeriodError};
use crate::workflows::performance::rank::PageRequest;
use crate::workflows::performance::service::{PerformanceService, ServiceError};
use crate::workflows::performance::source::{
    AssignmentSource, InMemoryAssignmentSource, SourceError,
};
use crate::workflows::intake::RawAssignment;

fn service_with(records: Vec<RawAssignment>) -> PerformanceService<InMemoryAssignmentSource> {
    PerformanceService::new(Arc::new(InMemoryAssignmentSource::new(records)))
}

struct OfflineSource;

impl AssignmentSource for OfflineSource {
    fn fetch(&self, _period: &Period) -> Result<Vec<RawAssignment>, SourceError> {
        Err(SourceError::Unavailable("upstream offline".to_string()))
    }
}

#[test]
fn worker_scoreboard_drops_and_counts_malformed_records() {
    let mut records = vec![
        raw_completed("w-1", "tl-1", "2025-05-05", "fit"),
        raw_completed("w-2", "tl-1", "2025-05-06", "minor"),
    ];
    records.push(raw("", "tl-1", "2025-05-07", "pending"));
    records.push(raw("w-3", "tl-1", "not-a-date", "pending"));

    let service = service_with(records);
    let scoreboard = service
        .worker_scoreboard(&may_2025(), &PageRequest::default())
        .expect("scoreboard");

    assert_eq!(scoreboard.dropped_records, 2);
    assert_eq!(scoreboard.workers.total_count, 2);
    assert_eq!(scoreboard.period, "2025-05");
    // Display names flow through from the labeling fields.
    assert!(scoreboard
        .workers
        .items
        .iter()
        .all(|row| row.display_name == "Ana Reyes"));
}

#[test]
fn pagination_is_driven_entirely_by_the_request() {
    let mut records = Vec::new();
    for index in 0..23 {
        records.push(raw_completed(
            &format!("w-{index}"),
            "tl-1",
            "2025-05-05",
            "fit",
        ));
    }

    let service = service_with(records);

    let page = service
        .worker_scoreboard(&may_2025(), &PageRequest::new(1, 10))
        .expect("scoreboard")
        .workers;
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.total_count, 23);

    let clamped = service
        .worker_scoreboard(&may_2025(), &PageRequest::new(5, 10))
        .expect("scoreboard")
        .workers;
    assert_eq!(clamped.page, 3);
    assert_eq!(clamped.items.len(), 3);

    let resized = service
        .worker_scoreboard(&may_2025(), &PageRequest::new(3, 10).resized(5))
        .expect("scoreboard")
        .workers;
    assert_eq!(resized.page, 1);
    assert_eq!(resized.items.len(), 5);
}

#[test]
fn team_scoreboard_and_weekly_report_share_the_same_batch_counts() {
    let records = vec![
        raw_completed("w-1", "tl-1", "2025-05-05", "fit"),
        raw_completed("w-2", "tl-2", "2025-05-06", "not_fit"),
        raw("", "tl-2", "2025-05-06", "pending"),
    ];
    let service = service_with(records);

    let teams = service.team_scoreboard(&may_2025()).expect("teams");
    assert_eq!(teams.teams.len(), 2);
    assert_eq!(teams.dropped_records, 1);
    assert_eq!(teams.organization.team_count, 2);

    let weekly = service
        .weekly_report(MonthPeriod::parse("2025-05").expect("month"))
        .expect("weekly");
    assert_eq!(weekly.dropped_records, 1);
    let total: usize = weekly
        .weeks
        .iter()
        .map(|week| week.counts.total_assignments)
        .sum();
    assert_eq!(total, 2);
}

#[test]
fn worker_insight_reads_a_run_of_months() {
    let mut records = Vec::new();
    // April: mostly overdue. May: everything completed on time.
    for day in ["2025-04-07", "2025-04-08", "2025-04-09"] {
        records.push(raw("w-1", "tl-1", day, "overdue"));
    }
    for day in ["2025-05-05", "2025-05-06", "2025-05-07"] {
        records.push(raw_completed("w-1", "tl-1", day, "fit"));
    }

    let service = service_with(records);
    let months = [
        MonthPeriod::parse("2025-04").expect("month"),
        MonthPeriod::parse("2025-05").expect("month"),
    ];

    let report = service.worker_insight("w-1", &months).expect("insight");
    assert_eq!(report.worker_id, "w-1");
    assert_eq!(report.periods.len(), 2);
    assert_eq!(report.periods[0].period, "2025-04");
    assert!(report.periods[1].composite_score > report.periods[0].composite_score);
    // 100% completion and timeliness in the latest month wins the positive
    // remark over the raw trend.
    assert_eq!(report.insight.kind, InsightKind::ExcellentTimeliness);
}

#[test]
fn worker_insight_requires_at_least_one_month() {
    let service = service_with(Vec::new());
    match service.worker_insight("w-1", &[]) {
        Err(ServiceError::Period(PeriodError::MissingSelector)) => {}
        other => panic!("expected missing selector error, got {other:?}"),
    }
}

#[test]
fn source_failures_surface_as_service_errors() {
    let service = PerformanceService::new(Arc::new(OfflineSource));
    match service.team_scoreboard(&may_2025()) {
        Err(ServiceError::Source(SourceError::Unavailable(message))) => {
            assert!(message.contains("offline"));
        }
        other => panic!("expected source error, got {other:?}"),
    }
}
