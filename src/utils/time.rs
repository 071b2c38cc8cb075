use chrono::{Datelike, NaiveDate, NaiveTime};
use now::DateTimeNow;

use super::clock::Clock;

/// Number of days in the month `date` falls into.
pub fn days_in_month(date: NaiveDate) -> u32 {
    date.and_time(NaiveTime::MIN).and_utc().end_of_month().day()
}

/// Length of the month the clock is currently in. Used for monthly projections.
pub fn days_in_current_month(clock: &impl Clock) -> u32 {
    days_in_month(clock.today())
}
