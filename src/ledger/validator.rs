//! Pure checks that decide whether a proposed edit may be applied to a ledger.
//!
//! Nothing in here mutates the ledger. Every function is a deterministic function of the proposed
//! value and the current rows.

use thiserror::Error;

use super::{
    row::{normalize_label, ActivityId},
    ActivityLedger, HOURS_EPSILON, TOTAL_CAPACITY,
};

/// Reason an edit was refused. The display text is what the user sees next to the row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("What activity do you want to add?")]
    EmptyLabel,
    #[error("You already added {label}!")]
    DuplicateLabel { label: String },
    #[error("How much time do you want to spend on {label}?")]
    MissingHours { label: String },
    #[error("You can't get more time!")]
    NegativeHours,
    #[error("There aren't enough hours in the day!")]
    CapacityExceeded,
    #[error("You can't go back in time!")]
    InvalidAgeRange,
    #[error("There is no activity with id {id}")]
    UnknownActivity { id: ActivityId },
}

/// Values of an `add` request that passed every check.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedActivity {
    pub label: String,
    pub hours: f64,
}

/// Case-insensitive lookup among committed activities, optionally ignoring one of them.
pub fn find_duplicate(
    ledger: &ActivityLedger,
    label: &str,
    except: Option<ActivityId>,
) -> Option<ActivityId> {
    let normalized = normalize_label(label);
    ledger
        .activities()
        .filter(|activity| Some(activity.id) != except)
        .find(|activity| activity.normalized_label() == normalized)
        .map(|activity| activity.id)
}

/// Exactly [TOTAL_CAPACITY] is allowed, anything above it by more than [HOURS_EPSILON] is not.
pub fn check_capacity(projected_total: f64) -> Result<(), Rejection> {
    if exceeds_capacity(projected_total) {
        Err(Rejection::CapacityExceeded)
    } else {
        Ok(())
    }
}

pub fn exceeds_capacity(total: f64) -> bool {
    total > TOTAL_CAPACITY + HOURS_EPSILON
}

pub fn check_not_negative(hours: f64) -> Result<(), Rejection> {
    if hours < 0. {
        Err(Rejection::NegativeHours)
    } else {
        Ok(())
    }
}

/// Validates a new activity. `label` is expected to be trimmed already.
pub fn validate_add(
    ledger: &ActivityLedger,
    label: &str,
    hours: Option<f64>,
) -> Result<AcceptedActivity, Rejection> {
    if label.is_empty() {
        return Err(Rejection::EmptyLabel);
    }
    if find_duplicate(ledger, label, None).is_some() {
        return Err(Rejection::DuplicateLabel {
            label: label.to_string(),
        });
    }
    let hours = match hours {
        Some(hours) if hours.is_finite() && hours != 0. => hours,
        Some(_) | None => {
            return Err(Rejection::MissingHours {
                label: label.to_string(),
            })
        }
    };
    check_not_negative(hours)?;
    check_capacity(ledger.allocated_hours() + hours)?;
    Ok(AcceptedActivity {
        label: label.to_string(),
        hours,
    })
}

/// Validates changing the hours of an activity from `old_hours` to `new_hours`.
pub fn validate_hours_change(
    ledger: &ActivityLedger,
    old_hours: f64,
    new_hours: f64,
) -> Result<(), Rejection> {
    check_not_negative(new_hours)?;
    check_capacity(ledger.allocated_hours() - old_hours + new_hours)
}
