//! Split a day into activities, then see how much of a lifetime those activities add up to.
//! The crate holds the ledger model used by the user interface: every edit keeps the 24 hours of
//! a day accounted for, and week or month views are folded into a single projection.
//!

pub mod cli;
pub mod ledger;
pub mod record;
pub mod summary;
pub mod utils;

pub use ledger::{
    color::{Color, ColorAssigner},
    preset::Preset,
    row::{Activity, ActivityId, DraftRow, Row},
    validator::Rejection,
    ActivityLedger, EditStatus, FocusTarget, LedgerEdit, TOTAL_CAPACITY,
};
pub use record::{Plan, PlanRecord, RecordError, TimeUnit};
pub use summary::{
    aggregator::{aggregate_periods, PeriodSummary, SummaryEntry},
    projection::{project, project_ages, AgeRange, Projection},
};
