//! Deterministic performance scoring over normalized assignment records.
//!
//! Everything here is a pure function of an in-memory record list and a
//! period filter: no I/O, no shared state, recomputed on every request.

pub mod domain;
mod formula;
pub mod insights;
pub mod period;
pub mod rank;
pub mod router;
pub mod scorer;
pub mod service;
pub mod source;
pub mod team;
pub mod weekly;

#[cfg(test)]
mod tests;

pub use insights::{generate_insight, Insight, InsightKind};
pub use period::{MonthPeriod, Period, PeriodError};
pub use rank::{paginate, Page, PageRequest};
pub use router::performance_router;
pub use scorer::{score_worker, worker_scoreboard, WorkerPerformance};
pub use service::{
    build_team_scoreboard, build_weekly_report, build_worker_insight, build_worker_scoreboard,
    PerformanceService, ServiceError, TeamScoreboard, WeeklyReport, WorkerInsightReport,
    WorkerScoreboard,
};
pub use source::{AssignmentSource, InMemoryAssignmentSource, SourceError};
pub use team::{organization_summary, team_scoreboard, OrganizationSummary, TeamPerformance};
pub use weekly::{weekly_breakdown, WeekBucket};
