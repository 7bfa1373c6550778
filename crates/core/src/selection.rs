//! Pointer-driven multi-cell selection over the 7-day by 24-hour week
//! grid.
//!
//! The engine is deliberately independent of any rendering layer: grid
//! layout comes in as an explicit [`GridGeometry`] and voting
//! restrictions as [`EligibilityRules`], so the same state machine can be
//! driven from UI pointer events or directly from tests.
//!
//! A drag is a rectangle between the cell where the pointer went down and
//! the cell it was last seen over. Releasing the pointer toggles every
//! eligible cell in that rectangle: selected cells become unselected and
//! vice versa (symmetric difference, so repeating a drag undoes it).

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Days, NaiveDate, Utc, Weekday};

use crate::models::time_slot::TimeSlot;

pub const DAYS_PER_WEEK: usize = 7;
pub const HOURS_PER_DAY: u8 = 24;

/// A cell position within the displayed week grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridIndex {
    pub day_idx: usize,
    pub hour: u8,
}

/// Declarative pixel layout of the rendered grid: total size plus the
/// width of the leading hour-label column. Rebuilt by the caller whenever
/// the grid is resized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub width_px: f64,
    pub height_px: f64,
    pub label_col_px: f64,
}

impl GridGeometry {
    /// Maps pixel coordinates (relative to the grid's top-left corner)
    /// to a grid cell. Coordinates outside the grid clamp to the nearest
    /// valid cell, so an out-of-range index is never produced.
    pub fn locate(&self, x: f64, y: f64) -> GridIndex {
        let day_width = (self.width_px - self.label_col_px) / DAYS_PER_WEEK as f64;
        let hour_height = self.height_px / f64::from(HOURS_PER_DAY);

        let day_idx = if day_width > 0.0 {
            ((x - self.label_col_px) / day_width).floor()
        } else {
            0.0
        };
        let hour = if hour_height > 0.0 {
            (y / hour_height).floor()
        } else {
            0.0
        };

        GridIndex {
            day_idx: (day_idx.max(0.0) as usize).min(DAYS_PER_WEEK - 1),
            hour: (hour.max(0.0) as u8).min(HOURS_PER_DAY - 1),
        }
    }
}

/// The currently displayed week, anchored on its Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekView {
    monday: NaiveDate,
}

impl WeekView {
    /// The week containing the given date.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            monday: date.week(Weekday::Mon).first_day(),
        }
    }

    /// Initial week to display for an event: the week of the earliest
    /// candidate date that is not yet past, falling back to the earliest
    /// candidate if all are past, then to the current week.
    pub fn initial(date_options: &[DateTime<Utc>], now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let mut days: Vec<NaiveDate> = date_options.iter().map(|d| d.date_naive()).collect();
        days.sort_unstable();
        let target = days
            .iter()
            .find(|d| **d >= today)
            .or_else(|| days.first())
            .copied()
            .unwrap_or(today);
        Self::containing(target)
    }

    pub fn monday(&self) -> NaiveDate {
        self.monday
    }

    /// The seven days of the week, Monday first.
    pub fn days(&self) -> [NaiveDate; DAYS_PER_WEEK] {
        let mut days = [self.monday; DAYS_PER_WEEK];
        for (i, day) in days.iter_mut().enumerate() {
            *day = self.monday + Days::new(i as u64);
        }
        days
    }

    pub fn day_at(&self, day_idx: usize) -> NaiveDate {
        self.monday + Days::new(day_idx.min(DAYS_PER_WEEK - 1) as u64)
    }

    /// Index of the given date within this week, if it falls inside it.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let offset = date.signed_duration_since(self.monday).num_days();
        (0..DAYS_PER_WEEK as i64)
            .contains(&offset)
            .then_some(offset as usize)
    }

    pub fn next_week(&self) -> Self {
        Self {
            monday: self.monday + Days::new(7),
        }
    }

    pub fn prev_week(&self) -> Self {
        Self {
            monday: self.monday - Days::new(7),
        }
    }
}

/// Which cells may be voted on: days must be event candidates and the
/// slot must not already be in the past (the hour currently in progress
/// still counts).
#[derive(Debug, Clone)]
pub struct EligibilityRules {
    allowed_days: HashSet<NaiveDate>,
    now_slot: TimeSlot,
}

impl EligibilityRules {
    pub fn new(date_options: &[DateTime<Utc>], now: DateTime<Utc>) -> Self {
        Self {
            allowed_days: date_options.iter().map(|d| d.date_naive()).collect(),
            now_slot: TimeSlot::from_datetime(now),
        }
    }

    pub fn is_eligible(&self, slot: &TimeSlot) -> bool {
        self.allowed_days.contains(&slot.day) && *slot >= self.now_slot
    }
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    start: GridIndex,
    end: GridIndex,
}

/// Drag state machine over an owned slot selection.
///
/// Slots are stored as absolute calendar dates, so the selection survives
/// week navigation unchanged.
#[derive(Debug, Clone, Default)]
pub struct SelectionEngine {
    selected: BTreeSet<TimeSlot>,
    drag: Option<Drag>,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the selection from previously submitted slot timestamps.
    pub fn load_slots(&mut self, slots: &[DateTime<Utc>]) {
        self.selected = slots.iter().map(|s| TimeSlot::from_datetime(*s)).collect();
    }

    pub fn is_selecting(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_selected(&self, day: NaiveDate, hour: u8) -> bool {
        TimeSlot::new(day, hour)
            .map(|slot| self.selected.contains(&slot))
            .unwrap_or(false)
    }

    pub fn selected(&self) -> impl Iterator<Item = &TimeSlot> {
        self.selected.iter()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.drag = None;
    }

    /// Materializes the selection for submission, in chronological order.
    pub fn selected_datetimes(&self) -> Vec<DateTime<Utc>> {
        self.selected.iter().map(TimeSlot::to_datetime).collect()
    }

    /// Starts a drag. Returns `false` (and stays idle) when the pointer
    /// went down on a cell that is not eligible for voting.
    pub fn pointer_down(
        &mut self,
        geometry: &GridGeometry,
        x: f64,
        y: f64,
        week: &WeekView,
        rules: &EligibilityRules,
    ) -> bool {
        let idx = geometry.locate(x, y);
        let slot = TimeSlot {
            day: week.day_at(idx.day_idx),
            hour: idx.hour,
            minute: 0,
        };
        if !rules.is_eligible(&slot) {
            return false;
        }
        self.drag = Some(Drag {
            start: idx,
            end: idx,
        });
        true
    }

    /// Extends the in-flight drag to the cell under the pointer. No-op
    /// when idle.
    pub fn pointer_move(&mut self, geometry: &GridGeometry, x: f64, y: f64) {
        if let Some(drag) = self.drag.as_mut() {
            drag.end = geometry.locate(x, y);
        }
    }

    /// Completes the drag: toggles every eligible slot in the inclusive
    /// rectangle between drag start and end, then returns to idle.
    /// Releasing outside the grid completes against the last known drag
    /// end. Returns the number of slots toggled.
    pub fn pointer_up(&mut self, week: &WeekView, rules: &EligibilityRules) -> usize {
        let Some(drag) = self.drag.take() else {
            return 0;
        };

        let day_lo = drag.start.day_idx.min(drag.end.day_idx);
        let day_hi = drag.start.day_idx.max(drag.end.day_idx);
        let hour_lo = drag.start.hour.min(drag.end.hour);
        let hour_hi = drag.start.hour.max(drag.end.hour);

        let mut toggled = 0;
        for day_idx in day_lo..=day_hi {
            let day = week.day_at(day_idx);
            for hour in hour_lo..=hour_hi {
                let slot = TimeSlot {
                    day,
                    hour,
                    minute: 0,
                };
                // Cells on non-candidate days or in the past are dropped
                // from the toggle set, not treated as errors.
                if !rules.is_eligible(&slot) {
                    continue;
                }
                if !self.selected.remove(&slot) {
                    self.selected.insert(slot);
                }
                toggled += 1;
            }
        }
        toggled
    }
}
