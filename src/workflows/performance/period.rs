use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar month addressed as `"YYYY-MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthPeriod {
    pub year: i32,
    pub month: u32,
}

impl MonthPeriod {
    pub fn parse(raw: &str) -> Result<Self, PeriodError> {
        let trimmed = raw.trim();
        let (year_part, month_part) = trimmed
            .split_once('-')
            .ok_or_else(|| PeriodError::InvalidMonthFormat(raw.to_string()))?;

        if year_part.len() != 4 || month_part.len() != 2 {
            return Err(PeriodError::InvalidMonthFormat(raw.to_string()));
        }

        let year: i32 = year_part
            .parse()
            .map_err(|_| PeriodError::InvalidMonthFormat(raw.to_string()))?;
        let month: u32 = month_part
            .parse()
            .map_err(|_| PeriodError::InvalidMonthFormat(raw.to_string()))?;

        if !(1..=12).contains(&month) {
            return Err(PeriodError::MonthOutOfRange {
                raw: raw.to_string(),
                month,
            });
        }

        Ok(Self { year, month })
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|first_of_next| first_of_next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// The window metrics are computed over: a calendar month or an explicit
/// inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    Month(MonthPeriod),
    Range { start: NaiveDate, end: NaiveDate },
}

impl Period {
    pub fn month(raw: &str) -> Result<Self, PeriodError> {
        MonthPeriod::parse(raw).map(Period::Month)
    }

    pub fn range(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        if start > end {
            return Err(PeriodError::InvertedRange { start, end });
        }
        Ok(Period::Range { start, end })
    }

    pub fn starts_on(&self) -> NaiveDate {
        match self {
            Period::Month(month) => month.first_day(),
            Period::Range { start, .. } => *start,
        }
    }

    pub fn ends_on(&self) -> NaiveDate {
        match self {
            Period::Month(month) => month.last_day(),
            Period::Range { end, .. } => *end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.starts_on() && date <= self.ends_on()
    }

    pub fn as_month(&self) -> Option<MonthPeriod> {
        match self {
            Period::Month(month) => Some(*month),
            Period::Range { .. } => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Period::Month(month) => month.label(),
            Period::Range { start, end } => format!("{start} to {end}"),
        }
    }
}

/// Structurally invalid period input. This is the only caller error the
/// engine raises; sparse or absent data never is one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeriodError {
    #[error("period '{0}' must use the YYYY-MM format")]
    InvalidMonthFormat(String),
    #[error("period '{raw}' names month {month}, expected 1 through 12")]
    MonthOutOfRange { raw: String, month: u32 },
    #[error("period start {start} falls after end {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
    #[error("a period is required: pass a month or an explicit start and end")]
    MissingSelector,
    #[error("a calendar month is required for weekly breakdowns")]
    MonthRequired,
}

impl Period {
    /// Resolve the period selector of an API request: a `"YYYY-MM"` month, or
    /// an explicit start/end pair. Exactly one form must be present.
    pub fn resolve(
        month: Option<&str>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, PeriodError> {
        match (month, start, end) {
            (Some(raw), None, None) => Period::month(raw),
            (None, Some(start), Some(end)) => Period::range(start, end),
            _ => Err(PeriodError::MissingSelector),
        }
    }
}

impl MonthPeriod {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}
