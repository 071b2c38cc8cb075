//! The activity ledger of a single period. A ledger splits [TOTAL_CAPACITY] hours between named
//! activities and keeps the unassigned rest as the capacity row.
//!
//! Ledgers are immutable snapshots. Every edit returns a [LedgerEdit] holding a brand new ledger,
//! so a caller can compare the old and new snapshot to decide what changed.
//!
//! Invariants kept by every edit:
//! - `capacity + Σ activity hours == TOTAL_CAPACITY`, up to [HOURS_EPSILON];
//! - the draft row exists iff `capacity > 0`, and it is always the last row;
//! - at most one row carries an error.

pub mod color;
pub mod preset;
pub mod row;
pub mod validator;

use color::{ColorAssigner, CAPACITY_COLOR};
use row::{Activity, ActivityId, CapacityRow, DraftRow, EditError, Row};
use tracing::{debug, trace};
use validator::{
    check_capacity, check_not_negative, find_duplicate, validate_add, validate_hours_change,
    Rejection,
};

/// Hours in one period.
pub const TOTAL_CAPACITY: f64 = 24.;

/// Float noise tolerated when summing hours. Remaining capacity below it counts as none.
pub const HOURS_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityLedger {
    capacity: f64,
    activities: Vec<Activity>,
    draft: Option<DraftRow>,
    colors: ColorAssigner,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditStatus {
    Applied,
    /// The edit didn't change anything, the returned ledger equals the input.
    Unchanged,
    Rejected(Rejection),
}

/// Input the user interface should focus after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    DraftLabel,
    DraftHours,
    ActivityHours(ActivityId),
}

/// Result of any ledger edit.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEdit {
    pub ledger: ActivityLedger,
    pub status: EditStatus,
    pub focus: Option<FocusTarget>,
}

pub type AddResult = LedgerEdit;
pub type RenameResult = LedgerEdit;
pub type SetHoursResult = LedgerEdit;
pub type MergeResult = LedgerEdit;
pub type RemoveResult = LedgerEdit;

impl LedgerEdit {
    pub fn is_applied(&self) -> bool {
        self.status == EditStatus::Applied
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match &self.status {
            EditStatus::Rejected(rejection) => Some(rejection),
            EditStatus::Applied | EditStatus::Unchanged => None,
        }
    }

    fn unchanged(ledger: &ActivityLedger) -> Self {
        Self {
            ledger: ledger.clone(),
            status: EditStatus::Unchanged,
            focus: None,
        }
    }
}

impl Default for ActivityLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityLedger {
    /// Empty ledger with a randomly placed palette.
    pub fn new() -> Self {
        Self::with_colors(ColorAssigner::random())
    }

    /// Empty ledger with a deterministic palette sequence.
    pub fn seeded(seed: f64) -> Self {
        Self::with_colors(ColorAssigner::seeded(seed))
    }

    pub fn with_colors(colors: ColorAssigner) -> Self {
        Self {
            capacity: TOTAL_CAPACITY,
            activities: vec![],
            draft: Some(DraftRow::default()),
            colors,
        }
    }

    /// Builds a ledger out of already validated activities. Capacity is derived from them and
    /// colors are assigned. Callers must make sure the hours don't exceed [TOTAL_CAPACITY].
    pub(crate) fn from_activities(activities: Vec<Activity>, colors: ColorAssigner) -> Self {
        let mut ledger = Self {
            capacity: TOTAL_CAPACITY,
            activities,
            draft: None,
            colors,
        };
        ledger.settle();
        ledger
    }

    /// Puts previously typed values back into the draft row. Does nothing when the day is full.
    pub(crate) fn with_draft_values(mut self, label: String, hours: Option<f64>) -> Self {
        if let Some(draft) = self.draft.as_mut() {
            draft.label = label;
            draft.hours = hours;
        }
        self
    }

    /// Remaining unassigned hours.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter()
    }

    pub fn activity(&self, id: ActivityId) -> Option<&Activity> {
        self.activities.iter().find(|v| v.id == id)
    }

    pub fn draft(&self) -> Option<&DraftRow> {
        self.draft.as_ref()
    }

    /// Sum of the hours of all committed activities.
    pub fn allocated_hours(&self) -> f64 {
        self.activities.iter().map(|v| v.hours).sum()
    }

    pub fn color_assigner(&self) -> ColorAssigner {
        self.colors
    }

    /// All rows in display order: capacity, activities, then the draft if present.
    pub fn rows(&self) -> Vec<Row> {
        std::iter::once(Row::Capacity(CapacityRow {
            hours: self.capacity,
        }))
        .chain(self.activities.iter().cloned().map(Row::Activity))
        .chain(self.draft.iter().cloned().map(Row::Draft))
        .collect()
    }

    /// Color of the capacity row.
    pub fn capacity_color(&self) -> color::Color {
        CAPACITY_COLOR
    }

    /// The error currently shown, if any.
    pub fn error(&self) -> Option<&Rejection> {
        self.activities
            .iter()
            .find_map(|v| v.error.as_ref().map(|e| &e.rejection))
            .or_else(|| self.draft.as_ref().and_then(|v| v.error.as_ref()))
    }

    /// Commits a new activity from the draft row values.
    pub fn add(&self, label: &str, hours: Option<f64>) -> AddResult {
        let label = label.trim();
        match validate_add(self, label, hours) {
            Ok(accepted) => {
                let mut next = self.begin();
                let id = next.next_id();
                debug!("Adding activity {id} '{}' with {} hours", accepted.label, accepted.hours);
                next.activities
                    .push(Activity::new(id, accepted.label, accepted.hours));
                // The draft is recreated empty at the end if capacity is left.
                next.draft = None;
                let mut edit = next.commit();
                if edit.ledger.draft.is_some() {
                    edit.focus = Some(FocusTarget::DraftLabel);
                }
                edit
            }
            Err(rejection) => {
                let (label, hours) = match &rejection {
                    Rejection::EmptyLabel => (String::new(), hours),
                    Rejection::MissingHours { .. } => (label.to_string(), None),
                    _ => (label.to_string(), hours),
                };
                self.reject_draft(rejection, label, hours)
            }
        }
    }

    /// Renames an activity. Renaming to the label of another activity merges both into that
    /// other activity, and a blank label removes the activity.
    pub fn rename_label(&self, id: ActivityId, new_label: &str) -> RenameResult {
        let new_label = new_label.trim();
        let Some(activity) = self.activity(id) else {
            return self.reject_unknown(id);
        };
        if activity.label == new_label {
            return LedgerEdit::unchanged(self);
        }
        if new_label.is_empty() {
            return self.remove(id);
        }
        if let Some(target) = find_duplicate(self, new_label, Some(id)) {
            debug!("Label '{new_label}' already taken by {target}, merging {id} into it");
            return self.merge_hours(target, activity.hours, Some(id));
        }

        let mut next = self.begin();
        if let Some(activity) = next.activity_mut(id) {
            activity.label = new_label.to_string();
        }
        next.commit()
    }

    /// Changes the hours of an activity. Zero hours removes it.
    pub fn set_hours(&self, id: ActivityId, new_hours: f64) -> SetHoursResult {
        let Some(activity) = self.activity(id) else {
            return self.reject_unknown(id);
        };
        let old_hours = activity.hours;
        if let Err(rejection) = check_not_negative(new_hours) {
            return self.reject_activity(id, rejection, new_hours);
        }
        if new_hours == old_hours {
            return LedgerEdit::unchanged(self);
        }
        if !new_hours.is_finite() {
            let rejection = Rejection::MissingHours {
                label: activity.label.clone(),
            };
            return self.reject_activity(id, rejection, new_hours);
        }
        if let Err(rejection) = validate_hours_change(self, old_hours, new_hours) {
            return self.reject_activity(id, rejection, new_hours);
        }
        if new_hours == 0. {
            return self.remove(id);
        }

        let mut next = self.begin();
        if let Some(activity) = next.activity_mut(id) {
            activity.hours = new_hours;
        }
        next.commit()
    }

    /// Adds `amount` hours to `target`. When `source` is given, that activity is removed in the
    /// same edit and its hours are treated as already spent, so capacity only changes by
    /// `amount - source.hours`.
    pub fn merge_hours(
        &self,
        target: ActivityId,
        amount: f64,
        source: Option<ActivityId>,
    ) -> MergeResult {
        if source == Some(target) {
            return LedgerEdit::unchanged(self);
        }
        let Some(target_activity) = self.activity(target) else {
            return self.reject_unknown(target);
        };
        let source_hours = match source {
            Some(source) => match self.activity(source) {
                Some(v) => v.hours,
                None => return self.reject_unknown(source),
            },
            None => 0.,
        };
        let blamed = source.unwrap_or(target);
        if source.is_none() && amount == 0. {
            return LedgerEdit::unchanged(self);
        }
        if !amount.is_finite() {
            let rejection = Rejection::MissingHours {
                label: target_activity.label.clone(),
            };
            return self.reject_activity(blamed, rejection, amount);
        }
        let new_hours = target_activity.hours + amount;
        let checked = check_not_negative(new_hours)
            .and_then(|_| check_capacity(self.allocated_hours() - source_hours + amount));
        if let Err(rejection) = checked {
            return self.reject_activity(blamed, rejection, new_hours);
        }

        debug!("Merging {amount} hours into {target} from {source:?}");
        let mut next = self.begin();
        if let Some(activity) = next.activity_mut(target) {
            activity.hours = new_hours;
        }
        next.activities
            .retain(|v| Some(v.id) != source && !(v.id == target && v.hours == 0.));
        next.commit()
    }

    /// Removes an activity and returns its hours to capacity.
    pub fn remove(&self, id: ActivityId) -> RemoveResult {
        let Some(activity) = self.activity(id) else {
            return self.reject_unknown(id);
        };
        debug!("Removing activity {id} '{}'", activity.label);
        let mut next = self.begin();
        next.activities.retain(|v| v.id != id);
        next.commit()
    }

    fn next_id(&self) -> ActivityId {
        self.activities
            .iter()
            .map(|v| v.id)
            .max()
            .map_or(ActivityId::FIRST, |id| id.next())
    }

    fn activity_mut(&mut self, id: ActivityId) -> Option<&mut Activity> {
        self.activities.iter_mut().find(|v| v.id == id)
    }

    /// Copy of the ledger with every error cleared. Every edit attempt starts here.
    fn begin(&self) -> ActivityLedger {
        let mut next = self.clone();
        for activity in next.activities.iter_mut() {
            activity.error = None;
        }
        if let Some(draft) = next.draft.as_mut() {
            draft.error = None;
        }
        next
    }

    fn commit(mut self) -> LedgerEdit {
        self.settle();
        trace!("Ledger committed with {} hours left", self.capacity);
        LedgerEdit {
            ledger: self,
            status: EditStatus::Applied,
            focus: None,
        }
    }

    /// Derives capacity from the activities, restores draft presence and derives a fresh palette.
    fn settle(&mut self) {
        let capacity = TOTAL_CAPACITY - self.allocated_hours();
        self.capacity = if capacity < HOURS_EPSILON {
            0.
        } else {
            capacity
        };
        if self.capacity > 0. {
            self.draft.get_or_insert_with(DraftRow::default);
        } else {
            self.draft = None;
        }
        let palette = self.colors.palette(self.activities.len());
        for (activity, color) in self.activities.iter_mut().zip(palette) {
            activity.color = Some(color);
        }
    }

    fn reject_draft(&self, rejection: Rejection, label: String, hours: Option<f64>) -> LedgerEdit {
        debug!("Rejected new activity '{label}': {rejection}");
        let focus = match rejection {
            Rejection::EmptyLabel | Rejection::DuplicateLabel { .. } => FocusTarget::DraftLabel,
            _ => FocusTarget::DraftHours,
        };
        let mut next = self.begin();
        // Without a draft row there is nothing to attach the error to.
        let focus = next.draft.as_mut().map(|draft| {
            draft.label = label;
            draft.hours = hours;
            draft.error = Some(rejection.clone());
            focus
        });
        LedgerEdit {
            ledger: next,
            status: EditStatus::Rejected(rejection),
            focus,
        }
    }

    fn reject_activity(&self, id: ActivityId, rejection: Rejection, input: f64) -> LedgerEdit {
        debug!("Rejected edit of activity {id}: {rejection}");
        let mut next = self.begin();
        if let Some(activity) = next.activity_mut(id) {
            activity.error = Some(EditError {
                rejection: rejection.clone(),
                input,
            });
        }
        LedgerEdit {
            ledger: next,
            status: EditStatus::Rejected(rejection),
            focus: Some(FocusTarget::ActivityHours(id)),
        }
    }

    fn reject_unknown(&self, id: ActivityId) -> LedgerEdit {
        debug!("Edit refers to missing activity {id}");
        LedgerEdit {
            ledger: self.begin(),
            status: EditStatus::Rejected(Rejection::UnknownActivity { id }),
            focus: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{
        ledger::{
            row::{ActivityId, Row},
            validator::Rejection,
            ActivityLedger, EditStatus, FocusTarget, LedgerEdit, HOURS_EPSILON, TOTAL_CAPACITY,
        },
        utils::logging::TEST_LOGGING,
    };

    fn id(value: u32) -> ActivityId {
        ActivityId::new_opt(value).unwrap()
    }

    fn applied(edit: LedgerEdit) -> ActivityLedger {
        assert_eq!(edit.status, EditStatus::Applied);
        edit.ledger
    }

    fn with(entries: &[(&str, f64)]) -> ActivityLedger {
        entries
            .iter()
            .fold(ActivityLedger::seeded(0.5), |ledger, (label, hours)| {
                applied(ledger.add(label, Some(*hours)))
            })
    }

    fn assert_invariants(ledger: &ActivityLedger) {
        assert_eq!(ledger.capacity() + ledger.allocated_hours(), TOTAL_CAPACITY);
        assert_eq!(ledger.draft().is_some(), ledger.capacity() > 0.);
        assert!(ledger.rows().iter().filter(|v| v.has_error()).count() <= 1);
    }

    #[test]
    fn fresh_ledger() {
        *TEST_LOGGING;
        let ledger = ActivityLedger::seeded(0.);
        assert_eq!(ledger.capacity(), 24.);
        assert_eq!(ledger.activities().count(), 0);
        assert!(ledger.draft().unwrap().is_empty());
        assert_eq!(ledger.rows().len(), 2);
        assert_invariants(&ledger);
    }

    #[test]
    fn add_appends_and_moves_draft_to_end() {
        let ledger = with(&[("Sleep", 8.), ("Work", 8.)]);
        let rows = ledger.rows();
        assert!(matches!(rows[0], Row::Capacity(c) if c.hours == 8.));
        assert_eq!(rows[1].as_activity().unwrap().label, "Sleep");
        assert_eq!(rows[1].as_activity().unwrap().id, id(1));
        assert_eq!(rows[2].as_activity().unwrap().id, id(2));
        assert!(matches!(&rows[3], Row::Draft(d) if d.is_empty()));
        assert!(ledger.activities().all(|v| v.color.is_some()));
        assert_invariants(&ledger);
    }

    #[test]
    fn add_trims_label_and_focuses_draft() {
        let edit = ActivityLedger::seeded(0.).add("  Read  ", Some(1.));
        assert_eq!(edit.focus, Some(FocusTarget::DraftLabel));
        assert_eq!(edit.ledger.activity(id(1)).unwrap().label, "Read");
    }

    #[test]
    fn ids_continue_from_the_largest() {
        let ledger = with(&[("A", 1.), ("B", 1.), ("C", 1.)]);
        let ledger = applied(ledger.remove(id(2)));
        let ledger = applied(ledger.add("D", Some(1.)));
        assert!(ledger.activity(id(4)).is_some());
        let ledger = applied(ledger.remove(id(4)));
        let ledger = applied(ledger.add("E", Some(1.)));
        assert_eq!(ledger.activity(id(4)).unwrap().label, "E");
    }

    #[test]
    fn filling_the_day_removes_draft() {
        let ledger = applied(ActivityLedger::seeded(0.).add("Sleep", Some(24.)));
        assert_eq!(ledger.capacity(), 0.);
        assert!(ledger.draft().is_none());
        let edit = ledger.add("Eat", Some(0.25));
        assert_eq!(edit.rejection(), Some(&Rejection::CapacityExceeded));
        assert_eq!(edit.focus, None);
        assert_eq!(edit.ledger.activities().count(), 1);
        assert_invariants(&edit.ledger);
    }

    #[test]
    fn rejected_add_keeps_state_and_echoes_input() {
        let before = with(&[("Sleep", 8.)]);
        let edit = before.add("Work", Some(-1.));
        assert_eq!(edit.rejection(), Some(&Rejection::NegativeHours));
        assert_eq!(edit.focus, Some(FocusTarget::DraftHours));
        assert_eq!(
            edit.ledger.activities().collect::<Vec<_>>(),
            before.activities().collect::<Vec<_>>()
        );
        assert_eq!(edit.ledger.capacity(), before.capacity());
        let draft = edit.ledger.draft().unwrap();
        assert_eq!(draft.label, "Work");
        assert_eq!(draft.hours, Some(-1.));
        assert_eq!(draft.error, Some(Rejection::NegativeHours));
    }

    #[test]
    fn rejected_add_echo_per_kind() {
        let ledger = with(&[("Sleep", 8.)]);

        let edit = ledger.add("   ", Some(2.));
        let draft = edit.ledger.draft().unwrap();
        assert_eq!((draft.label.as_str(), draft.hours), ("", Some(2.)));
        assert_eq!(edit.focus, Some(FocusTarget::DraftLabel));

        let edit = ledger.add("Gym", None);
        let draft = edit.ledger.draft().unwrap();
        assert_eq!((draft.label.as_str(), draft.hours), ("Gym", None));
        assert_eq!(
            draft.error,
            Some(Rejection::MissingHours {
                label: "Gym".into()
            })
        );

        let edit = ledger.add("SLEEP", Some(1.));
        assert_eq!(
            edit.rejection(),
            Some(&Rejection::DuplicateLabel {
                label: "SLEEP".into()
            })
        );
    }

    #[test]
    fn next_edit_clears_previous_error() {
        let ledger = with(&[("Sleep", 8.)]);
        let failed = ledger.add("", Some(1.)).ledger;
        assert!(failed.error().is_some());

        let failed_again = failed.set_hours(id(1), -3.).ledger;
        assert_eq!(failed_again.error(), Some(&Rejection::NegativeHours));
        assert_eq!(failed_again.draft().unwrap().error, None);

        let fixed = applied(failed_again.set_hours(id(1), 7.));
        assert_eq!(fixed.error(), None);
        assert_invariants(&fixed);
    }

    #[test]
    fn set_hours_adjusts_capacity() {
        let ledger = applied(with(&[("Sleep", 8.), ("Work", 8.)]).set_hours(id(2), 10.));
        assert_eq!(ledger.capacity(), 6.);
        assert_eq!(ledger.activity(id(2)).unwrap().hours, 10.);
        let ledger = applied(ledger.set_hours(id(2), 16.));
        assert_eq!(ledger.capacity(), 0.);
        assert!(ledger.draft().is_none());
        let ledger = applied(ledger.set_hours(id(2), 15.75));
        assert!(ledger.draft().is_some());
        assert_invariants(&ledger);
    }

    #[test]
    fn set_hours_rejections() {
        let ledger = with(&[("Sleep", 8.), ("Work", 8.)]);

        let edit = ledger.set_hours(id(2), 16.25);
        assert_eq!(edit.rejection(), Some(&Rejection::CapacityExceeded));
        assert_eq!(edit.focus, Some(FocusTarget::ActivityHours(id(2))));
        let activity = edit.ledger.activity(id(2)).unwrap();
        assert_eq!(activity.hours, 8.);
        assert_eq!(activity.error.as_ref().unwrap().input, 16.25);
        assert_eq!(edit.ledger.capacity(), 8.);

        let edit = ledger.set_hours(id(1), -0.25);
        assert_eq!(edit.rejection(), Some(&Rejection::NegativeHours));

        let edit = ledger.set_hours(id(9), 1.);
        assert_eq!(
            edit.rejection(),
            Some(&Rejection::UnknownActivity { id: id(9) })
        );
        assert_eq!(edit.ledger.error(), None);
    }

    #[test]
    fn set_hours_zero_removes() {
        let ledger = applied(with(&[("Sleep", 8.), ("Work", 8.)]).set_hours(id(1), 0.));
        assert!(ledger.activity(id(1)).is_none());
        assert_eq!(ledger.capacity(), 16.);
        assert_invariants(&ledger);
    }

    #[test]
    fn no_op_edits_leave_ledger_untouched() {
        let ledger = with(&[("Sleep", 8.)]);
        let edit = ledger.rename_label(id(1), "Sleep");
        assert_eq!(edit.status, EditStatus::Unchanged);
        assert_eq!(edit.ledger, ledger);

        let edit = ledger.set_hours(id(1), 8.);
        assert_eq!(edit.status, EditStatus::Unchanged);
        assert_eq!(edit.ledger, ledger);
    }

    #[test]
    fn rename_commits_and_recolors() {
        let ledger = with(&[("Sleep", 8.)]);
        let renamed = applied(ledger.rename_label(id(1), "  Nap "));
        assert_eq!(renamed.activity(id(1)).unwrap().label, "Nap");
        assert_ne!(
            renamed.activity(id(1)).unwrap().color,
            ledger.activity(id(1)).unwrap().color
        );
        let case_only = applied(renamed.rename_label(id(1), "NAP"));
        assert_eq!(case_only.activity(id(1)).unwrap().label, "NAP");
    }

    #[test]
    fn rename_to_blank_removes() {
        let ledger = applied(with(&[("Sleep", 8.)]).rename_label(id(1), " "));
        assert_eq!(ledger.activities().count(), 0);
        assert_eq!(ledger.capacity(), 24.);
    }

    #[test]
    fn rename_to_existing_label_merges() {
        let ledger = with(&[("A", 3.), ("B", 2.)]);
        let capacity = ledger.capacity();
        let merged = applied(ledger.rename_label(id(1), "b"));
        let activities = merged.activities().collect::<Vec<_>>();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].label, "B");
        assert_eq!(activities[0].hours, 5.);
        assert_eq!(merged.capacity(), capacity);
        assert_invariants(&merged);
    }

    #[test]
    fn merge_without_source_takes_from_capacity() {
        let ledger = with(&[("A", 3.)]);
        let merged = applied(ledger.merge_hours(id(1), 2., None));
        assert_eq!(merged.activity(id(1)).unwrap().hours, 5.);
        assert_eq!(merged.capacity(), 19.);

        let edit = ledger.merge_hours(id(1), 21.25, None);
        assert_eq!(edit.rejection(), Some(&Rejection::CapacityExceeded));

        let emptied = applied(ledger.merge_hours(id(1), -3., None));
        assert_eq!(emptied.activities().count(), 0);
        assert_invariants(&emptied);

        let edit = ledger.merge_hours(id(1), -4., None);
        assert_eq!(edit.rejection(), Some(&Rejection::NegativeHours));
    }

    #[test]
    fn merge_with_source_moves_hours() {
        let ledger = with(&[("A", 3.), ("B", 2.), ("C", 19.)]);
        assert!(ledger.draft().is_none());
        let merged = applied(ledger.merge_hours(id(2), 3., Some(id(1))));
        assert_eq!(merged.capacity(), 0.);
        assert_eq!(merged.activity(id(2)).unwrap().hours, 5.);
        assert!(merged.activity(id(1)).is_none());

        let partial = applied(ledger.merge_hours(id(2), 1., Some(id(1))));
        assert_eq!(partial.capacity(), 2.);
        assert!(partial.draft().is_some());
        assert_invariants(&partial);

        assert_eq!(
            ledger.merge_hours(id(2), 1., Some(id(2))).status,
            EditStatus::Unchanged
        );
    }

    #[test]
    fn remove_returns_hours_and_restores_draft() {
        let ledger = with(&[("Sleep", 24.)]);
        assert!(ledger.draft().is_none());
        let ledger = applied(ledger.remove(id(1)));
        assert_eq!(ledger.capacity(), 24.);
        assert!(ledger.draft().unwrap().is_empty());
    }

    #[test]
    fn draft_keeps_typed_values_across_other_edits() {
        let ledger = with(&[("Sleep", 8.)]);
        let ledger = ledger.add("Gym", None).ledger;
        let ledger = applied(ledger.set_hours(id(1), 9.));
        let draft = ledger.draft().unwrap();
        assert_eq!(draft.label, "Gym");
        assert_eq!(draft.error, None);
    }

    #[test]
    fn tenths_of_an_hour_fill_the_day() {
        let mut ledger = ActivityLedger::seeded(0.);
        for i in 0..240 {
            assert!(ledger.draft().is_some(), "draft missing before add {i}");
            ledger = applied(ledger.add(&format!("a{i}"), Some(0.1)));
        }
        assert_eq!(ledger.capacity(), 0.);
        assert!(ledger.draft().is_none());
        assert!((ledger.allocated_hours() - TOTAL_CAPACITY).abs() < HOURS_EPSILON);
        assert_eq!(
            ledger.add("more", Some(0.1)).rejection(),
            Some(&Rejection::CapacityExceeded)
        );
    }

    #[test]
    fn shown_capacity_can_always_be_added() {
        let ledger = with(&[("Sleep", 7.3), ("Work", 8.9), ("Commute", 1.7)]);
        let ledger = applied(ledger.set_hours(id(2), 8.45));
        let remaining = ledger.capacity();
        assert!(remaining > 0.);
        let full = applied(ledger.add("Rest", Some(remaining)));
        assert_eq!(full.capacity(), 0.);
        assert!(full.draft().is_none());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(String, f64),
        SetHours(u32, f64),
        Rename(u32, String),
        Merge(u32, f64, Option<u32>),
        Remove(u32),
    }

    fn quarter_hours(max: i32) -> impl Strategy<Value = f64> {
        (-4..=max * 4).prop_map(|v| v as f64 / 4.)
    }

    fn op() -> impl Strategy<Value = Op> {
        let label = prop_oneof![Just("Sleep"), Just("sleep"), Just("Work"), Just("Gym"), Just("")]
            .prop_map(String::from);
        prop_oneof![
            (label.clone(), quarter_hours(24)).prop_map(|(l, h)| Op::Add(l, h)),
            (1u32..6, quarter_hours(24)).prop_map(|(i, h)| Op::SetHours(i, h)),
            (1u32..6, label).prop_map(|(i, l)| Op::Rename(i, l)),
            (1u32..6, quarter_hours(12), proptest::option::of(1u32..6))
                .prop_map(|(i, h, s)| Op::Merge(i, h, s)),
            (1u32..6).prop_map(Op::Remove),
        ]
    }

    fn any_hours(max: f64) -> impl Strategy<Value = f64> {
        prop_oneof![Just(0.), -1.0..0., 0.0..max]
    }

    fn run(ledger: &ActivityLedger, op: Op) -> LedgerEdit {
        match op {
            Op::Add(label, hours) => ledger.add(&label, Some(hours)),
            Op::SetHours(i, hours) => ledger.set_hours(id(i), hours),
            Op::Rename(i, label) => ledger.rename_label(id(i), &label),
            Op::Merge(i, hours, source) => ledger.merge_hours(id(i), hours, source.map(id)),
            Op::Remove(i) => ledger.remove(id(i)),
        }
    }

    proptest! {
        #[test]
        fn invariants_hold_for_any_edit_sequence(ops in prop::collection::vec(op(), 1..40)) {
            let mut ledger = ActivityLedger::seeded(0.1);
            for op in ops {
                let edit = run(&ledger, op);
                if edit.status != EditStatus::Applied {
                    prop_assert_eq!(edit.ledger.capacity(), ledger.capacity());
                    prop_assert_eq!(
                        edit.ledger.activities().map(|v| (v.id, v.hours)).collect::<Vec<_>>(),
                        ledger.activities().map(|v| (v.id, v.hours)).collect::<Vec<_>>()
                    );
                }
                ledger = edit.ledger;
                prop_assert_eq!(ledger.capacity() + ledger.allocated_hours(), TOTAL_CAPACITY);
                prop_assert_eq!(ledger.draft().is_some(), ledger.capacity() > 0.);
                prop_assert!(ledger.capacity() >= 0.);
                prop_assert!(ledger.rows().iter().filter(|v| v.has_error()).count() <= 1);
            }
        }

        #[test]
        fn fractional_hours_keep_capacity_consistent(
            adds in prop::collection::vec(any_hours(6.), 1..30),
            sets in prop::collection::vec((1u32..30, any_hours(12.)), 0..20),
        ) {
            let mut ledger = ActivityLedger::seeded(0.3);
            let ops = adds
                .into_iter()
                .enumerate()
                .map(|(i, hours)| Op::Add(format!("a{i}"), hours))
                .chain(sets.into_iter().map(|(i, hours)| Op::SetHours(i, hours)));
            for op in ops {
                ledger = run(&ledger, op).ledger;
                let sum = ledger.capacity() + ledger.allocated_hours();
                prop_assert!((sum - TOTAL_CAPACITY).abs() < 1e-6);
                prop_assert!(ledger.capacity() >= 0.);
                prop_assert_eq!(ledger.draft().is_some(), ledger.capacity() > 0.);
            }
            if ledger.capacity() > 0. {
                let full = ledger.add("rest", Some(ledger.capacity()));
                prop_assert_eq!(full.status, EditStatus::Applied);
                prop_assert_eq!(full.ledger.capacity(), 0.);
                prop_assert!(full.ledger.draft().is_none());
            }
        }
    }
}
