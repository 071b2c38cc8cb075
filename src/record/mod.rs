//! Serializable shape of a plan, as handed to whatever saves or shares it.
//!
//! Storing and sending records is up to the caller. This module only defines the data and turns
//! it back into ledgers, see [loader].

pub mod loader;

use std::{collections::BTreeMap, fmt::Display};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    ledger::{
        color::{Color, ColorAssigner},
        preset::Preset,
        row::Row,
        ActivityLedger,
    },
    summary::aggregator::{aggregate_periods, PeriodSummary},
    utils::time::days_in_month,
};

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Day,
    Week,
    Month,
}

impl Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeUnit::Day => write!(f, "day"),
            TimeUnit::Week => write!(f, "week"),
            TimeUnit::Month => write!(f, "month"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Pie,
    Doughnut,
    Bar,
}

/// Month a month-view plan refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthAnchor {
    pub year: i32,
    /// 1 based.
    pub month: u32,
}

impl MonthAnchor {
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

/// One stored row of a period. Capacity rows are accepted but never trusted, capacity is always
/// recomputed from the activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoredRow {
    Capacity {
        hours: f64,
    },
    Draft {
        #[serde(default)]
        label: String,
        #[serde(default)]
        hours: Option<f64>,
    },
    Activity {
        id: u32,
        label: String,
        hours: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
    },
}

impl From<Row> for StoredRow {
    fn from(value: Row) -> Self {
        match value {
            Row::Capacity(capacity) => StoredRow::Capacity {
                hours: capacity.hours,
            },
            Row::Draft(draft) => StoredRow::Draft {
                label: draft.label,
                hours: draft.hours,
            },
            Row::Activity(activity) => StoredRow::Activity {
                id: activity.id.get(),
                label: activity.label,
                hours: activity.hours,
                color: activity.color,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub time_unit: TimeUnit,
    pub periods: BTreeMap<usize, Vec<StoredRow>>,
    #[serde(default)]
    pub chart_types: BTreeMap<usize, ChartType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<MonthAnchor>,
}

impl PlanRecord {
    pub fn from_json(value: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(value)?)
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Period {period} holds {hours} hours, which is more than a day has")]
    CapacityExceeded { period: usize, hours: f64 },
    #[error("Period {period} doesn't exist in a {unit} with {count} periods")]
    PeriodOutOfRange {
        period: usize,
        unit: TimeUnit,
        count: usize,
    },
    #[error("Month plans need an anchor month")]
    MissingAnchor,
    #[error("{year}-{month} is not a valid month")]
    InvalidAnchor { year: i32, month: u32 },
    #[error("Malformed plan record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Loaded plan: one ledger per period of the time unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    time_unit: TimeUnit,
    anchor: Option<MonthAnchor>,
    ledgers: Vec<ActivityLedger>,
    chart_types: Vec<ChartType>,
}

impl Plan {
    /// Plan with every period starting from `preset`.
    pub fn new(
        time_unit: TimeUnit,
        anchor: Option<MonthAnchor>,
        preset: Preset,
        colors: ColorAssigner,
    ) -> Result<Self, RecordError> {
        let count = period_count(time_unit, anchor)?;
        Ok(Self {
            time_unit,
            anchor,
            ledgers: preset.ledgers(count, colors),
            chart_types: vec![ChartType::default(); count],
        })
    }

    pub fn time_unit(&self) -> TimeUnit {
        self.time_unit
    }

    pub fn anchor(&self) -> Option<MonthAnchor> {
        self.anchor
    }

    pub fn period_count(&self) -> usize {
        self.ledgers.len()
    }

    pub fn ledgers(&self) -> &[ActivityLedger] {
        &self.ledgers
    }

    pub fn ledger(&self, period: usize) -> Option<&ActivityLedger> {
        self.ledgers.get(period)
    }

    pub fn chart_type(&self, period: usize) -> Option<ChartType> {
        self.chart_types.get(period).copied()
    }

    /// Swaps the ledger of a period, usually with the ledger returned by an edit.
    pub fn replace_ledger(
        &mut self,
        period: usize,
        ledger: ActivityLedger,
    ) -> Result<ActivityLedger, RecordError> {
        let count = self.period_count();
        let slot = self
            .ledgers
            .get_mut(period)
            .ok_or(RecordError::PeriodOutOfRange {
                period,
                unit: self.time_unit,
                count,
            })?;
        Ok(std::mem::replace(slot, ledger))
    }

    pub fn set_chart_type(
        &mut self,
        period: usize,
        chart_type: ChartType,
    ) -> Result<(), RecordError> {
        let count = self.period_count();
        let slot = self
            .chart_types
            .get_mut(period)
            .ok_or(RecordError::PeriodOutOfRange {
                period,
                unit: self.time_unit,
                count,
            })?;
        *slot = chart_type;
        Ok(())
    }

    /// Replaces every period with a fresh copy of `preset`.
    pub fn apply_preset(&mut self, preset: Preset) {
        let colors = self
            .ledgers
            .last()
            .map(|v| v.color_assigner())
            .unwrap_or_else(ColorAssigner::random);
        self.ledgers = preset.ledgers(self.ledgers.len(), colors);
    }

    pub fn summary(&self) -> PeriodSummary {
        aggregate_periods(&self.ledgers)
    }

    /// Heading of a period, like "Monday" or "March 5".
    pub fn period_name(&self, period: usize) -> String {
        match self.time_unit {
            TimeUnit::Day => "Today".to_string(),
            TimeUnit::Week => weekday_name(period),
            TimeUnit::Month => self
                .anchor
                .and_then(|v| v.first_day())
                .map(|v| format!("{} {}", v.format("%B"), period + 1))
                .unwrap_or_else(|| format!("Day {}", period + 1)),
        }
    }

    pub fn to_record(&self) -> PlanRecord {
        PlanRecord {
            time_unit: self.time_unit,
            periods: self
                .ledgers
                .iter()
                .enumerate()
                .map(|(period, ledger)| {
                    (
                        period,
                        ledger.rows().into_iter().map(StoredRow::from).collect(),
                    )
                })
                .collect(),
            chart_types: self.chart_types.iter().copied().enumerate().collect(),
            anchor: self.anchor,
        }
    }
}

/// Number of periods a plan of `time_unit` has. Weeks start on Sunday.
pub fn period_count(
    time_unit: TimeUnit,
    anchor: Option<MonthAnchor>,
) -> Result<usize, RecordError> {
    match time_unit {
        TimeUnit::Day => Ok(1),
        TimeUnit::Week => Ok(7),
        TimeUnit::Month => {
            let anchor = anchor.ok_or(RecordError::MissingAnchor)?;
            let first = anchor.first_day().ok_or(RecordError::InvalidAnchor {
                year: anchor.year,
                month: anchor.month,
            })?;
            Ok(days_in_month(first) as usize)
        }
    }
}

fn weekday_name(period: usize) -> String {
    WEEKDAYS[period % WEEKDAYS.len()].to_string()
}
