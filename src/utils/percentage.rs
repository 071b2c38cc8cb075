use std::{fmt::Display, ops::Deref};

use crate::ledger::TOTAL_CAPACITY;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Percentage {
    pub fn new_opt(value: f64) -> Option<Percentage> {
        if value < 0. || value.is_nan() {
            None
        } else {
            Some(Percentage(value))
        }
    }
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Part of a whole day taken by `hours`. Negative hours count as none.
pub fn share_of_day(hours: f64) -> Percentage {
    Percentage::new_opt(hours / TOTAL_CAPACITY * 100.).unwrap_or(Percentage(0.))
}
