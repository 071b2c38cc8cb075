use std::collections::HashMap;

use tracing::trace;

use crate::ledger::{color::Color, row::normalize_label, ActivityLedger};

/// Aggregated time of one activity across several periods.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryEntry {
    /// Label as first seen, with its original case.
    pub label: String,
    pub total_hours: f64,
    /// Color of the first seen allocation.
    pub color: Option<Color>,
    /// Number of periods that contain this activity.
    pub periods_counted: u32,
}

impl SummaryEntry {
    pub fn average_daily_hours(&self) -> f64 {
        self.total_hours / self.periods_counted as f64
    }
}

/// Activities of several periods keyed by case-insensitive label. Entries keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodSummary {
    entries: Vec<SummaryEntry>,
    index: HashMap<String, usize>,
}

impl PeriodSummary {
    pub fn entries(&self) -> &[SummaryEntry] {
        &self.entries
    }

    pub fn get(&self, label: &str) -> Option<&SummaryEntry> {
        self.index
            .get(&normalize_label(label))
            .map(|v| &self.entries[*v])
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn record(&mut self, label: &str, hours: f64, color: Option<Color>) {
        let key = normalize_label(label);
        match self.index.get(&key) {
            Some(position) => {
                let entry = &mut self.entries[*position];
                entry.total_hours += hours;
                entry.periods_counted += 1;
            }
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(SummaryEntry {
                    label: label.to_string(),
                    total_hours: hours,
                    color,
                    periods_counted: 1,
                });
            }
        }
    }
}

/// Folds ledgers, given in period order, into one summary. Only committed activities count,
/// capacity and draft rows are skipped.
pub fn aggregate_periods<'a>(
    ledgers: impl IntoIterator<Item = &'a ActivityLedger>,
) -> PeriodSummary {
    let mut summary = PeriodSummary::default();
    for (period, ledger) in ledgers.into_iter().enumerate() {
        trace!("Aggregating period {period}");
        for activity in ledger.activities() {
            summary.record(&activity.label, activity.hours, activity.color);
        }
    }
    summary
}
