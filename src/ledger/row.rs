use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{color::Color, validator::Rejection};

/// Identifier of a committed activity. Ids are positive and assigned as `1 + max existing id`
/// inside a single ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(u32);

impl ActivityId {
    pub const FIRST: ActivityId = ActivityId(1);

    pub fn new_opt(value: u32) -> Option<ActivityId> {
        if value == 0 {
            None
        } else {
            Some(ActivityId(value))
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn next(&self) -> ActivityId {
        ActivityId(self.0.saturating_add(1))
    }
}

impl Display for ActivityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rejected hours edit of an existing row.
#[derive(Debug, Clone, PartialEq)]
pub struct EditError {
    pub rejection: Rejection,
    /// Hours the user typed. Kept so the row can show them instead of the committed value.
    pub input: f64,
}

/// The "remaining hours" row. There is exactly one per ledger and it is always first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityRow {
    pub hours: f64,
}

/// The row used for entering a new activity. It echoes back rejected values so they can be
/// corrected without retyping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftRow {
    pub label: String,
    pub hours: Option<f64>,
    pub error: Option<Rejection>,
}

impl DraftRow {
    pub fn is_empty(&self) -> bool {
        self.label.is_empty() && self.hours.is_none() && self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: ActivityId,
    pub label: String,
    pub hours: f64,
    pub color: Option<Color>,
    pub error: Option<EditError>,
}

impl Activity {
    pub fn new(id: ActivityId, label: impl Into<String>, hours: f64) -> Self {
        Self {
            id,
            label: label.into(),
            hours,
            color: None,
            error: None,
        }
    }

    /// Key used for every case-insensitive label comparison.
    pub fn normalized_label(&self) -> String {
        normalize_label(&self.label)
    }
}

pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// One displayed row of a ledger.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Capacity(CapacityRow),
    Draft(DraftRow),
    Activity(Activity),
}

impl Row {
    pub fn as_activity(&self) -> Option<&Activity> {
        match self {
            Row::Activity(activity) => Some(activity),
            Row::Capacity(_) | Row::Draft(_) => None,
        }
    }

    pub fn has_error(&self) -> bool {
        match self {
            Row::Capacity(_) => false,
            Row::Draft(draft) => draft.error.is_some(),
            Row::Activity(activity) => activity.error.is_some(),
        }
    }
}
