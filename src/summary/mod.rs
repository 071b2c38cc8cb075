//! Cross-period view of ledgers: folding a week or month of days into one weighted summary, and
//! projecting that summary over a span of years.

pub mod aggregator;
pub mod projection;
