//! Rate and composite arithmetic shared by the scorers.
//!
//! The source dashboards disagree on composite weighting, so both readings
//! survive here as named variants: [`individual_composite`] for worker and
//! team scorecards, and [`period_bucket_score`] for calendar-week buckets.
//! Every rate guards the zero-denominator case and yields 0.

use super::domain::{AssignmentCounts, ReadinessLevel};

const INDIVIDUAL_COMPLETION_WEIGHT: f64 = 0.5;
const INDIVIDUAL_ON_TIME_WEIGHT: f64 = 0.25;
const INDIVIDUAL_QUALITY_WEIGHT: f64 = 0.1;
const PENDING_BONUS_CAP: f64 = 5.0;
const OVERDUE_PENALTY_CAP: f64 = 10.0;
const RECOVERY_BONUS: f64 = 3.0;
const RECOVERY_COMPLETION_FLOOR: f64 = 80.0;

const BUCKET_COMPLETION_WEIGHT: f64 = 0.5;
const BUCKET_ON_TIME_WEIGHT: f64 = 0.3;
const BUCKET_OVERDUE_WEIGHT: f64 = 0.2;

const LATE_ON_TIME_PENALTY: f64 = 50.0;
const LATE_QUALITY_PENALTY: f64 = 20.0;
const QUALITY_BASELINE: f64 = 70.0;

/// `part / total * 100`, clamped to `[0, 100]`; `0 / 0 -> 0`.
pub(crate) fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 * 100.0 / total as f64).clamp(0.0, 100.0)
}

/// `part / total` as a plain ratio; `0 / 0 -> 0`.
pub(crate) fn fraction(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64
}

/// Round to one decimal for display-ready composites.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn completion_rate(counts: &AssignmentCounts) -> f64 {
    percentage(counts.completed, counts.total_assignments)
}

/// Timeliness rate for the individual variant. Late completions already count
/// toward completion, so timeliness is discounted separately:
/// `100 * on_time/total - 50 * late/total`, floored at 0.
pub(crate) fn penalized_on_time_rate(counts: &AssignmentCounts) -> f64 {
    let raw = percentage(counts.on_time, counts.total_assignments);
    let penalty = LATE_ON_TIME_PENALTY * fraction(counts.late, counts.total_assignments);
    (raw - penalty).max(0.0)
}

/// Mean of the mapped readiness levels minus `20 * late/total`, floored at 0.
/// The raw mean defaults to the 70-point baseline when no submission carries
/// a level.
pub(crate) fn quality_score<'a, I>(levels: I, counts: &AssignmentCounts) -> f64
where
    I: IntoIterator<Item = &'a ReadinessLevel>,
{
    let mut sum = 0.0;
    let mut graded = 0usize;
    for level in levels {
        sum += level.quality_points();
        graded += 1;
    }

    let mean = if graded == 0 {
        QUALITY_BASELINE
    } else {
        sum / graded as f64
    };

    let penalty = LATE_QUALITY_PENALTY * fraction(counts.late, counts.total_assignments);
    (mean - penalty).max(0.0)
}

/// The fixed placeholder used when a pooled scorecard has no readiness
/// submissions at all.
pub(crate) const fn baseline_quality() -> f64 {
    QUALITY_BASELINE
}

/// Composite variant "individual": weighted blend plus pending/overdue/recovery
/// adjustments, clamped to `[0, 100]` and rounded to one decimal.
pub(crate) fn individual_composite(
    counts: &AssignmentCounts,
    completion: f64,
    on_time: f64,
    quality: f64,
) -> f64 {
    let pending_bonus =
        (PENDING_BONUS_CAP * fraction(counts.pending, counts.total_assignments)).min(PENDING_BONUS_CAP);
    let overdue_penalty = (OVERDUE_PENALTY_CAP
        * fraction(counts.overdue, counts.total_assignments))
    .min(OVERDUE_PENALTY_CAP);
    let recovery_bonus = if completion >= RECOVERY_COMPLETION_FLOOR {
        RECOVERY_BONUS
    } else {
        0.0
    };

    let blended = INDIVIDUAL_COMPLETION_WEIGHT * completion
        + INDIVIDUAL_ON_TIME_WEIGHT * on_time
        + INDIVIDUAL_QUALITY_WEIGHT * quality
        + pending_bonus
        - overdue_penalty
        + recovery_bonus;

    round1(blended.clamp(0.0, 100.0))
}

/// Composite variant "period-bucket": `0.5*completion + 0.3*on_time -
/// 0.2*overdue` over the unpenalized rates, floored at 0. Used for weekly
/// buckets; deliberately not unified with the individual variant.
pub(crate) fn period_bucket_score(counts: &AssignmentCounts) -> f64 {
    let completion = completion_rate(counts);
    let on_time = percentage(counts.on_time, counts.total_assignments);
    let overdue = percentage(counts.overdue, counts.total_assignments);

    let blended = BUCKET_COMPLETION_WEIGHT * completion + BUCKET_ON_TIME_WEIGHT * on_time
        - BUCKET_OVERDUE_WEIGHT * overdue;

    round1(blended.max(0.0))
}
