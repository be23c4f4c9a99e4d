use serde::Serialize;

/// Qualitative reading of a score sequence. Advisory only: insights never
/// feed back into composite scores or grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    StrongUpwardTrend,
    Improving,
    Declining,
    AttentionNeeded,
    Stable,
    ExcellentTimeliness,
}

impl InsightKind {
    pub const fn label(self) -> &'static str {
        match self {
            InsightKind::StrongUpwardTrend => "strong upward trend",
            InsightKind::Improving => "improving",
            InsightKind::Declining => "declining",
            InsightKind::AttentionNeeded => "attention needed",
            InsightKind::Stable => "stable",
            InsightKind::ExcellentTimeliness => "excellent timeliness",
        }
    }
}

/// Display-ready remark derived from per-period scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
    pub message: String,
}

const EXCELLENT_RATE_FLOOR: f64 = 95.0;
const STRONG_DELTA: f64 = 10.0;
const MILD_DELTA: f64 = 5.0;

/// Derive a remark from an oldest-to-newest sequence of per-period scores,
/// plus the latest period's completion and on-time rates.
///
/// Simultaneously high completion and timeliness earn the positive remark
/// outright, preferred over any trend reading; otherwise six or more periods
/// compare the mean of the most recent three against the prior three, and
/// shorter histories fall back to a two-point comparison.
pub fn generate_insight(scores: &[f64], completion_rate: f64, on_time_rate: f64) -> Insight {
    if completion_rate >= EXCELLENT_RATE_FLOOR && on_time_rate >= EXCELLENT_RATE_FLOOR {
        return Insight {
            kind: InsightKind::ExcellentTimeliness,
            delta: None,
            message: format!(
                "excellent timeliness: {completion_rate:.0}% completion with {on_time_rate:.0}% submitted on time"
            ),
        };
    }

    if scores.len() < 2 {
        return Insight {
            kind: InsightKind::Stable,
            delta: None,
            message: "readiness performance is stable; not enough history to read a trend"
                .to_string(),
        };
    }

    let delta = if scores.len() >= 6 {
        let recent = mean(&scores[scores.len() - 3..]);
        let prior = mean(&scores[scores.len() - 6..scores.len() - 3]);
        recent - prior
    } else {
        scores[scores.len() - 1] - scores[0]
    };

    let kind = if delta > STRONG_DELTA {
        InsightKind::StrongUpwardTrend
    } else if delta > MILD_DELTA {
        InsightKind::Improving
    } else if delta < -STRONG_DELTA {
        InsightKind::AttentionNeeded
    } else if delta < -MILD_DELTA {
        InsightKind::Declining
    } else {
        InsightKind::Stable
    };

    let message = match kind {
        InsightKind::StrongUpwardTrend => {
            format!("strong upward trend in work readiness ({delta:+.1} points)")
        }
        InsightKind::Improving => format!("readiness performance is improving ({delta:+.1} points)"),
        InsightKind::AttentionNeeded => {
            format!("attention needed: readiness is declining sharply ({delta:+.1} points)")
        }
        InsightKind::Declining => format!("readiness performance is declining ({delta:+.1} points)"),
        InsightKind::Stable | InsightKind::ExcellentTimeliness => {
            "readiness performance is stable".to_string()
        }
    };

    Insight {
        kind,
        delta: Some(delta),
        message,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
