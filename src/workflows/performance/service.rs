use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::insights::{generate_insight, Insight};
use super::period::{MonthPeriod, Period};
use super::rank::{paginate, Page, PageRequest};
use super::scorer::{score_worker, worker_scoreboard, WorkerPerformance};
use super::source::AssignmentSource;
use super::team::{organization_summary, team_scoreboard, OrganizationSummary, TeamPerformance};
use super::weekly::{weekly_breakdown, WeekBucket};
use crate::workflows::intake::{normalize_batch, NormalizedBatch};

/// Display-ready worker scoreboard for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerScoreboard {
    pub period: String,
    pub organization: OrganizationSummary,
    pub workers: Page<WorkerPerformance>,
    pub dropped_records: usize,
}

/// Display-ready team scoreboard for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamScoreboard {
    pub period: String,
    pub teams: Vec<TeamPerformance>,
    pub organization: OrganizationSummary,
    pub dropped_records: usize,
}

/// Calendar-week breakdown of one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyReport {
    pub month: String,
    pub weeks: Vec<WeekBucket>,
    pub dropped_records: usize,
}

/// Per-period composite history plus the derived remark for one worker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerInsightReport {
    pub worker_id: String,
    pub periods: Vec<PeriodScore>,
    pub insight: Insight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodScore {
    pub period: String,
    pub composite_score: f64,
}

/// Assemble the worker scoreboard from an already-normalized batch.
pub fn build_worker_scoreboard(
    batch: &NormalizedBatch,
    period: &Period,
    page: &PageRequest,
) -> WorkerScoreboard {
    let rows = worker_scoreboard(&batch.assignments, period);
    WorkerScoreboard {
        period: period.label(),
        organization: organization_summary(&batch.assignments, period),
        workers: paginate(rows, page),
        dropped_records: batch.dropped,
    }
}

/// Assemble the team scoreboard from an already-normalized batch.
pub fn build_team_scoreboard(batch: &NormalizedBatch, period: &Period) -> TeamScoreboard {
    TeamScoreboard {
        period: period.label(),
        teams: team_scoreboard(&batch.assignments, period),
        organization: organization_summary(&batch.assignments, period),
        dropped_records: batch.dropped,
    }
}

/// Assemble the weekly breakdown from an already-normalized batch.
pub fn build_weekly_report(batch: &NormalizedBatch, month: MonthPeriod) -> WeeklyReport {
    WeeklyReport {
        month: month.label(),
        weeks: weekly_breakdown(&batch.assignments, month),
        dropped_records: batch.dropped,
    }
}

/// Assemble the insight report for one worker across an ordered run of
/// months (oldest first). Rates for the positive-remark check come from the
/// most recent month.
pub fn build_worker_insight(
    batch: &NormalizedBatch,
    worker_id: &str,
    months: &[MonthPeriod],
) -> WorkerInsightReport {
    let mut periods = Vec::with_capacity(months.len());
    let mut scores = Vec::with_capacity(months.len());
    let mut latest: Option<WorkerPerformance> = None;

    for month in months {
        let performance = score_worker(&batch.assignments, worker_id, &Period::Month(*month));
        periods.push(PeriodScore {
            period: month.label(),
            composite_score: performance.composite_score,
        });
        scores.push(performance.composite_score);
        latest = Some(performance);
    }

    let (completion_rate, on_time_rate) = latest
        .map(|performance| (performance.completion_rate, performance.on_time_rate))
        .unwrap_or((0.0, 0.0));

    WorkerInsightReport {
        worker_id: worker_id.to_string(),
        periods,
        insight: generate_insight(&scores, completion_rate, on_time_rate),
    }
}

/// Service composing the assignment source, normalizer, and scorers.
pub struct PerformanceService<S> {
    source: Arc<S>,
}

impl<S> PerformanceService<S>
where
    S: AssignmentSource + 'static,
{
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    pub fn worker_scoreboard(
        &self,
        period: &Period,
        page: &PageRequest,
    ) -> Result<WorkerScoreboard, ServiceError> {
        let batch = self.normalized(period)?;
        Ok(build_worker_scoreboard(&batch, period, page))
    }

    pub fn team_scoreboard(&self, period: &Period) -> Result<TeamScoreboard, ServiceError> {
        let batch = self.normalized(period)?;
        Ok(build_team_scoreboard(&batch, period))
    }

    pub fn weekly_report(&self, month: MonthPeriod) -> Result<WeeklyReport, ServiceError> {
        let batch = self.normalized(&Period::Month(month))?;
        Ok(build_weekly_report(&batch, month))
    }

    pub fn worker_insight(
        &self,
        worker_id: &str,
        months: &[MonthPeriod],
    ) -> Result<WorkerInsightReport, ServiceError> {
        let period = span_of(months)?;
        let batch = self.normalized(&period)?;
        Ok(build_worker_insight(&batch, worker_id, months))
    }

    fn normalized(&self, period: &Period) -> Result<NormalizedBatch, ServiceError> {
        let records = self.source.fetch(period)?;
        let batch = normalize_batch(records);
        debug!(
            accepted = batch.assignments.len(),
            dropped = batch.dropped,
            "normalized assignment batch"
        );
        Ok(batch)
    }
}

fn span_of(months: &[MonthPeriod]) -> Result<Period, ServiceError> {
    let first = months.first().ok_or(super::period::PeriodError::MissingSelector)?;
    let last = months.last().ok_or(super::period::PeriodError::MissingSelector)?;
    Ok(Period::range(first.first_day(), last.last_day())?)
}

/// Error raised by the performance service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Source(#[from] super::source::SourceError),
    #[error(transparent)]
    Period(#[from] super::period::PeriodError),
}
