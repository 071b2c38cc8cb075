use std::{fmt::Display, str::FromStr};

use anyhow::anyhow;
use clap::ValueEnum;

use super::{
    color::ColorAssigner,
    row::{Activity, ActivityId},
    ActivityLedger,
};

/// Starter ledgers a user can begin from.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Preset {
    Student,
    Professional,
    Retired,
    /// Back to an empty day.
    Clear,
}

impl Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Preset::Student => write!(f, "student"),
            Preset::Professional => write!(f, "professional"),
            Preset::Retired => write!(f, "retired"),
            Preset::Clear => write!(f, "clear"),
        }
    }
}

impl FromStr for Preset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|v| v.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow!("Unknown preset {s}"))
    }
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Student,
        Preset::Professional,
        Preset::Retired,
        Preset::Clear,
    ];

    /// Activities of the preset in display order. Every non-clear preset fills the whole day.
    pub fn entries(&self) -> &'static [(&'static str, f64)] {
        match self {
            Preset::Student => &[
                ("sleep", 8.),
                ("breakfast", 0.25),
                ("class", 6.),
                ("lunch", 0.5),
                ("homework", 3.),
                ("dinner", 0.5),
                ("studying", 4.),
                ("relax", 1.75),
            ],
            Preset::Professional => &[
                ("sleep", 8.),
                ("breakfast", 0.5),
                ("work", 8.),
                ("lunch", 0.5),
                ("working out", 1.),
                ("dinner", 0.5),
                ("relaxing", 5.5),
            ],
            Preset::Retired => &[
                ("sleep", 8.),
                ("breakfast", 0.5),
                ("exercise", 2.),
                ("lunch", 0.5),
                ("gardening", 2.),
                ("volunteering", 4.),
                ("reading", 2.),
                ("dinner", 1.),
                ("watching tv", 1.),
                ("taking a walk", 1.),
                ("family time", 2.),
            ],
            Preset::Clear => &[],
        }
    }

    /// Builds the ledger for this preset with freshly derived colors.
    pub fn ledger(&self, colors: ColorAssigner) -> ActivityLedger {
        let activities = self
            .entries()
            .iter()
            .zip(std::iter::successors(Some(ActivityId::FIRST), |v| {
                Some(v.next())
            }))
            .map(|((label, hours), id)| Activity::new(id, *label, *hours))
            .collect();
        ActivityLedger::from_activities(activities, colors)
    }

    /// One ledger per period, each with its own palette.
    pub fn ledgers(&self, periods: usize, colors: ColorAssigner) -> Vec<ActivityLedger> {
        let mut colors = colors;
        (0..periods)
            .map(|_| {
                let ledger = self.ledger(colors);
                colors = ledger.color_assigner();
                ledger
            })
            .collect()
    }
}
