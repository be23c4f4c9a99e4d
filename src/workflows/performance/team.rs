use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::domain::{Assignment, AssignmentCounts, Grade, QualityBasis};
use super::formula;
use super::period::Period;
use super::rank::{rank_descending, Ranked};

/// Derived scorecard for one team leader's pooled assignments. Counts are
/// summed across the team's raw assignments first and rates computed second,
/// so small teams with a few strong workers carry no extra weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamPerformance {
    pub team_leader_id: String,
    pub worker_count: usize,
    #[serde(flatten)]
    pub counts: AssignmentCounts,
    pub completion_rate: f64,
    pub on_time_rate: f64,
    pub quality_score: f64,
    pub quality_basis: QualityBasis,
    pub composite_score: f64,
    pub grade: Grade,
    pub grade_label: &'static str,
    pub rank: usize,
}

impl Ranked for TeamPerformance {
    fn composite_score(&self) -> f64 {
        self.composite_score
    }

    fn set_rank(&mut self, rank: usize) {
        self.rank = rank;
    }
}

/// Organization-wide pooled totals for the dashboard header row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizationSummary {
    pub team_count: usize,
    pub worker_count: usize,
    #[serde(flatten)]
    pub counts: AssignmentCounts,
    pub completion_rate: f64,
    pub on_time_rate: f64,
    pub quality_score: f64,
    pub quality_basis: QualityBasis,
    pub composite_score: f64,
    pub grade: Grade,
    pub grade_label: &'static str,
}

/// Score every team leader seen in the period, ranked by composite score
/// descending with ties keeping encounter order.
pub fn team_scoreboard(assignments: &[Assignment], period: &Period) -> Vec<TeamPerformance> {
    let mut encounter_order: Vec<&str> = Vec::new();
    let mut grouped: HashMap<&str, Vec<&Assignment>> = HashMap::new();

    for assignment in assignments {
        if !period.contains(assignment.assigned_date) {
            continue;
        }
        grouped
            .entry(assignment.team_leader_id.as_str())
            .or_insert_with(|| {
                encounter_order.push(assignment.team_leader_id.as_str());
                Vec::new()
            })
            .push(assignment);
    }

    let mut rows: Vec<TeamPerformance> = encounter_order
        .into_iter()
        .filter_map(|leader_id| grouped.get(leader_id).map(|records| (leader_id, records)))
        .map(|(leader_id, records)| score_pool(leader_id, records))
        .collect();

    rank_descending(&mut rows);
    rows
}

/// Pooled totals across every assignment in the period.
pub fn organization_summary(assignments: &[Assignment], period: &Period) -> OrganizationSummary {
    let records: Vec<&Assignment> = assignments
        .iter()
        .filter(|a| period.contains(a.assigned_date))
        .collect();

    let team_count = records
        .iter()
        .map(|a| a.team_leader_id.as_str())
        .collect::<HashSet<_>>()
        .len();
    let pooled = score_pool("organization", &records);

    OrganizationSummary {
        team_count,
        worker_count: pooled.worker_count,
        counts: pooled.counts,
        completion_rate: pooled.completion_rate,
        on_time_rate: pooled.on_time_rate,
        quality_score: pooled.quality_score,
        quality_basis: pooled.quality_basis,
        composite_score: pooled.composite_score,
        grade: pooled.grade,
        grade_label: pooled.grade_label,
    }
}

fn score_pool(leader_id: &str, records: &[&Assignment]) -> TeamPerformance {
    if records.is_empty() {
        // No data is not a failure: an all-zero scorecard, not an error.
        let grade = Grade::from_score(0.0);
        return TeamPerformance {
            team_leader_id: leader_id.to_string(),
            worker_count: 0,
            counts: AssignmentCounts::default(),
            completion_rate: 0.0,
            on_time_rate: 0.0,
            quality_score: 0.0,
            quality_basis: QualityBasis::Baseline,
            composite_score: 0.0,
            grade,
            grade_label: grade.label(),
            rank: 0,
        };
    }

    let counts = AssignmentCounts::tally(records.iter().copied());
    let worker_count = records
        .iter()
        .map(|a| a.worker_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let completion_rate = formula::completion_rate(&counts);
    let on_time_rate = formula::penalized_on_time_rate(&counts);

    let has_levels = records.iter().any(|a| a.readiness.is_some());
    let (quality_score, quality_basis) = if has_levels {
        let measured = formula::quality_score(
            records.iter().filter_map(|a| a.readiness.as_ref()),
            &counts,
        );
        (measured, QualityBasis::Measured)
    } else {
        // Fixed placeholder, marked so it is never read as a computed 0.
        (formula::baseline_quality(), QualityBasis::Baseline)
    };

    let composite_score =
        formula::individual_composite(&counts, completion_rate, on_time_rate, quality_score);
    let grade = Grade::from_score(composite_score);

    TeamPerformance {
        team_leader_id: leader_id.to_string(),
        worker_count,
        counts,
        completion_rate,
        on_time_rate,
        quality_score,
        quality_basis,
        composite_score,
        grade,
        grade_label: grade.label(),
        rank: 0,
    }
}
