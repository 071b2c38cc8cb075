use std::collections::HashSet;

use tracing::{debug, warn};

use crate::ledger::{
    color::ColorAssigner,
    row::{normalize_label, Activity, ActivityId},
    validator::exceeds_capacity,
    ActivityLedger,
};

use super::{period_count, ChartType, Plan, PlanRecord, RecordError, StoredRow};

impl PlanRecord {
    /// Rebuilds the ledgers of every period. Periods missing from the record start empty.
    pub fn into_plan(self, colors: ColorAssigner) -> Result<Plan, RecordError> {
        let count = period_count(self.time_unit, self.anchor)?;
        if let Some(period) = self
            .periods
            .keys()
            .chain(self.chart_types.keys())
            .find(|v| **v >= count)
        {
            return Err(RecordError::PeriodOutOfRange {
                period: *period,
                unit: self.time_unit,
                count,
            });
        }

        let mut colors = colors;
        let mut periods = self.periods;
        let mut ledgers = Vec::with_capacity(count);
        for period in 0..count {
            let rows = periods.remove(&period).unwrap_or_default();
            let ledger = load_ledger(period, rows, colors)?;
            colors = ledger.color_assigner();
            ledgers.push(ledger);
        }
        let chart_types = (0..count)
            .map(|v| self.chart_types.get(&v).copied().unwrap_or_default())
            .collect::<Vec<ChartType>>();

        debug!("Loaded {} plan with {count} periods", self.time_unit);
        Ok(Plan {
            time_unit: self.time_unit,
            anchor: self.anchor,
            ledgers,
            chart_types,
        })
    }
}

/// Rebuilds one period. Stored capacity is ignored, rows that can't be activities are dropped,
/// activities sharing a label are merged into the first one, and a period that holds more than a
/// day is refused.
pub fn load_ledger(
    period: usize,
    rows: Vec<StoredRow>,
    colors: ColorAssigner,
) -> Result<ActivityLedger, RecordError> {
    let mut activities: Vec<Activity> = vec![];
    let mut stored_ids = vec![];
    let mut draft = None;

    for row in rows {
        match row {
            StoredRow::Capacity { .. } => {}
            StoredRow::Draft { label, hours } => draft = Some((label, hours)),
            StoredRow::Activity {
                id, label, hours, ..
            } => {
                let label = label.trim();
                if label.is_empty() || !hours.is_finite() || hours <= 0. {
                    warn!("Dropping activity {id} '{label}' ({hours} hours) in period {period}");
                    continue;
                }
                let normalized = normalize_label(label);
                match activities
                    .iter_mut()
                    .find(|v| v.normalized_label() == normalized)
                {
                    Some(existing) => {
                        warn!(
                            "Merging duplicate '{label}' into '{}' in period {period}",
                            existing.label
                        );
                        existing.hours += hours;
                    }
                    None => {
                        stored_ids.push(ActivityId::new_opt(id));
                        activities.push(Activity::new(ActivityId::FIRST, label, hours));
                    }
                }
            }
        }
    }

    let hours = activities.iter().map(|v| v.hours).sum::<f64>();
    if exceeds_capacity(hours) {
        return Err(RecordError::CapacityExceeded { period, hours });
    }

    assign_ids(&mut activities, &stored_ids);
    let ledger = ActivityLedger::from_activities(activities, colors);
    Ok(match draft {
        Some((label, hours)) => ledger.with_draft_values(label, hours),
        None => ledger,
    })
}

/// Keeps stored ids when they are valid and unique, gives every other activity a fresh one after
/// the largest kept id.
fn assign_ids(activities: &mut [Activity], stored_ids: &[Option<ActivityId>]) {
    let mut seen = HashSet::new();
    let kept = stored_ids
        .iter()
        .map(|v| v.filter(|id| seen.insert(*id)))
        .collect::<Vec<_>>();
    let mut next = kept
        .iter()
        .flatten()
        .max()
        .map_or(ActivityId::FIRST, |v| v.next());
    for (activity, kept) in activities.iter_mut().zip(kept) {
        activity.id = match kept {
            Some(id) => id,
            None => {
                let id = next;
                next = next.next();
                id
            }
        };
    }
}
