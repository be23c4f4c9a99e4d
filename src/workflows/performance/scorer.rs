use std::collections::HashMap;

use serde::Serialize;

use super::domain::{Assignment, AssignmentCounts, Grade, WorkerName};
use super::formula;
use super::period::Period;
use super::rank::{rank_descending, Ranked};

/// Derived scorecard for one worker over one period. Recomputed on every
/// request; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerPerformance {
    pub worker_id: String,
    pub display_name: String,
    pub team_leader_id: String,
    #[serde(flatten)]
    pub counts: AssignmentCounts,
    pub completion_rate: f64,
    pub on_time_rate: f64,
    pub quality_score: f64,
    pub composite_score: f64,
    pub grade: Grade,
    pub grade_label: &'static str,
    pub rank: usize,
}

impl Ranked for WorkerPerformance {
    fn composite_score(&self) -> f64 {
        self.composite_score
    }

    fn set_rank(&mut self, rank: usize) {
        self.rank = rank;
    }
}

/// Score every distinct worker seen in the period, ranked by composite score
/// descending. Ties keep the order workers were first encountered in.
pub fn worker_scoreboard(assignments: &[Assignment], period: &Period) -> Vec<WorkerPerformance> {
    let mut encounter_order: Vec<&str> = Vec::new();
    let mut grouped: HashMap<&str, Vec<&Assignment>> = HashMap::new();

    for assignment in assignments {
        if !period.contains(assignment.assigned_date) {
            continue;
        }
        grouped
            .entry(assignment.worker_id.as_str())
            .or_insert_with(|| {
                encounter_order.push(assignment.worker_id.as_str());
                Vec::new()
            })
            .push(assignment);
    }

    let mut rows: Vec<WorkerPerformance> = encounter_order
        .into_iter()
        .filter_map(|worker_id| grouped.get(worker_id))
        .map(|records| score_records(records))
        .collect();

    rank_descending(&mut rows);
    rows
}

/// Score a single worker for the period. A worker with no assignments yields
/// an all-zero scorecard with grade D; absence of data is not a failure.
pub fn score_worker(
    assignments: &[Assignment],
    worker_id: &str,
    period: &Period,
) -> WorkerPerformance {
    let records: Vec<&Assignment> = assignments
        .iter()
        .filter(|a| a.worker_id == worker_id && period.contains(a.assigned_date))
        .collect();

    if records.is_empty() {
        return empty_performance(worker_id);
    }

    score_records(&records)
}

fn score_records(records: &[&Assignment]) -> WorkerPerformance {
    let first = records[0];
    let counts = AssignmentCounts::tally(records.iter().copied());

    let completion_rate = formula::completion_rate(&counts);
    let on_time_rate = formula::penalized_on_time_rate(&counts);
    let quality_score = formula::quality_score(
        records.iter().filter_map(|a| a.readiness.as_ref()),
        &counts,
    );
    let composite_score =
        formula::individual_composite(&counts, completion_rate, on_time_rate, quality_score);
    let grade = Grade::from_score(composite_score);

    WorkerPerformance {
        worker_id: first.worker_id.clone(),
        display_name: first
            .worker_name
            .as_ref()
            .map(WorkerName::display_name)
            .unwrap_or_else(|| first.worker_id.clone()),
        team_leader_id: first.team_leader_id.clone(),
        counts,
        completion_rate,
        on_time_rate,
        quality_score,
        composite_score,
        grade,
        grade_label: grade.label(),
        rank: 0,
    }
}

fn empty_performance(worker_id: &str) -> WorkerPerformance {
    let grade = Grade::from_score(0.0);
    WorkerPerformance {
        worker_id: worker_id.to_string(),
        display_name: worker_id.to_string(),
        team_leader_id: String::new(),
        counts: AssignmentCounts::default(),
        completion_rate: 0.0,
        on_time_rate: 0.0,
        quality_score: 0.0,
        composite_score: 0.0,
        grade,
        grade_label: grade.label(),
        rank: 0,
    }
}
