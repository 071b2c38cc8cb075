//! Plain text rendering of ledgers, summaries and projections for the terminal.

use ansi_term::Colour;

use crate::{
    ledger::{color::Color, row::Row, ActivityLedger},
    summary::{aggregator::PeriodSummary, projection::Projection},
    utils::percentage::share_of_day,
};

/// Paints `label` with its palette color when `colored` is set.
fn paint(label: &str, color: Option<Color>, colored: bool) -> String {
    match color {
        Some(Color { r, g, b }) if colored => Colour::RGB(r, g, b).paint(label).to_string(),
        Some(_) | None => label.to_string(),
    }
}

/// Rows of a ledger with their hours and share of the day. The draft row is skipped.
pub fn ledger_lines(ledger: &ActivityLedger, colored: bool) -> Vec<String> {
    ledger
        .rows()
        .into_iter()
        .filter_map(|row| match row {
            Row::Capacity(capacity) => Some(format!(
                "{}\t{}\t{}",
                capacity.hours,
                share_of_day(capacity.hours),
                paint("remaining", Some(ledger.capacity_color()), colored)
            )),
            Row::Activity(activity) => Some(format!(
                "{}\t{}\t{}",
                activity.hours,
                share_of_day(activity.hours),
                paint(&activity.label, activity.color, colored)
            )),
            Row::Draft(_) => None,
        })
        .collect()
}

pub fn summary_lines(summary: &PeriodSummary, colored: bool) -> Vec<String> {
    summary
        .entries()
        .iter()
        .map(|entry| {
            format!(
                "{:.2}\t{}\t{}",
                entry.average_daily_hours(),
                entry.periods_counted,
                paint(&entry.label, entry.color, colored)
            )
        })
        .collect()
}

/// Projection table with a header. Empty when there is nothing to project.
pub fn projection_lines(projections: &[Projection], colored: bool) -> Vec<String> {
    if projections.is_empty() {
        return vec![];
    }
    std::iter::once("Total\tYearly\tMonthly\tWeekly\tActivity".to_string())
        .chain(projections.iter().map(|v| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                v.lifetime_hours,
                v.yearly_hours,
                v.monthly_hours,
                v.weekly_hours,
                paint(&v.label, v.color, colored)
            )
        }))
        .collect()
}
