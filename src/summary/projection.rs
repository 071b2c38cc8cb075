use tracing::debug;

use crate::ledger::{color::Color, validator::Rejection};

use super::aggregator::PeriodSummary;

const DAYS_IN_YEAR: f64 = 365.;
const DAYS_IN_WEEK: f64 = 7.;

/// Age span of a projection. Can only be built with `start >= 0` and `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    start: i64,
    end: i64,
}

impl AgeRange {
    pub fn new(start: i64, end: i64) -> Result<Self, Rejection> {
        if start < 0 || end <= start {
            Err(Rejection::InvalidAgeRange)
        } else {
            Ok(Self { start, end })
        }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn years(&self) -> i64 {
        self.end - self.start
    }
}

/// Hours one activity takes over several horizons, rounded to whole hours.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub label: String,
    pub color: Option<Color>,
    pub average_daily_hours: f64,
    pub lifetime_hours: i64,
    pub yearly_hours: i64,
    pub monthly_hours: i64,
    pub weekly_hours: i64,
}

/// Projects every summary entry over `ages`. `days_in_month` is the length of the month the
/// monthly column refers to, normally the current one.
pub fn project(summary: &PeriodSummary, ages: AgeRange, days_in_month: u32) -> Vec<Projection> {
    debug!(
        "Projecting {} activities from {} to {}",
        summary.len(),
        ages.start(),
        ages.end()
    );
    summary
        .entries()
        .iter()
        .map(|entry| {
            let daily = entry.average_daily_hours();
            Projection {
                label: entry.label.clone(),
                color: entry.color,
                average_daily_hours: daily,
                lifetime_hours: round_hours(daily * ages.years() as f64 * DAYS_IN_YEAR),
                yearly_hours: round_hours(daily * DAYS_IN_YEAR),
                monthly_hours: round_hours(daily * days_in_month as f64),
                weekly_hours: round_hours(daily * DAYS_IN_WEEK),
            }
        })
        .collect()
}

/// Same as [project], but takes raw ages and refuses a span that isn't increasing.
pub fn project_ages(
    summary: &PeriodSummary,
    age_start: i64,
    age_end: i64,
    days_in_month: u32,
) -> Result<Vec<Projection>, Rejection> {
    let ages = AgeRange::new(age_start, age_end)?;
    Ok(project(summary, ages, days_in_month))
}

/// Nearest integer, ties away from zero.
fn round_hours(hours: f64) -> i64 {
    hours.round() as i64
}
