//! Availability and location-vote aggregation.
//!
//! Every function here is total: empty availability lists, empty place
//! lists, and events whose dates are already past all produce defined
//! "no winner" outputs instead of errors, so callers can run them on any
//! event right up to the moment the cleanup job deletes it.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::event::{AvailabilityEntry, Place};
use crate::models::time_slot::TimeSlot;
use crate::selection::{DAYS_PER_WEEK, HOURS_PER_DAY, WeekView};

/// How many winning slots the result view shows.
pub const WINNING_SLOT_LIMIT: usize = 3;

/// Vote tally for one distinct slot timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotTally {
    pub slot: DateTime<Utc>,
    pub count: usize,
    pub people: Vec<String>,
}

/// Tallies every distinct slot that appears in at least one entry,
/// counting distinct participants and collecting their display names.
/// A participant listing the same slot twice is counted once.
pub fn tally_slots(entries: &[AvailabilityEntry]) -> Vec<SlotTally> {
    let mut tallies: BTreeMap<DateTime<Utc>, SlotTally> = BTreeMap::new();

    for entry in entries {
        let name = entry.display_name();
        let mut seen: HashSet<DateTime<Utc>> = HashSet::new();
        for slot in &entry.available_slots {
            if !seen.insert(*slot) {
                continue;
            }
            let tally = tallies.entry(*slot).or_insert_with(|| SlotTally {
                slot: *slot,
                count: 0,
                people: Vec::new(),
            });
            tally.count += 1;
            if !tally.people.contains(&name) {
                tally.people.push(name.clone());
            }
        }
    }

    tallies.into_values().collect()
}

/// The top slots by vote count, at most [`WINNING_SLOT_LIMIT`] of them.
/// Ties break toward the earliest timestamp, so the ranking is
/// deterministic for any input. Fewer than three voted slots yield a
/// shorter list; none yield an empty one.
pub fn winning_slots(entries: &[AvailabilityEntry]) -> Vec<SlotTally> {
    // tally_slots returns in ascending timestamp order; a stable sort on
    // descending count alone therefore leaves ties earliest-first.
    let mut tallies = tally_slots(entries);
    tallies.sort_by(|a, b| b.count.cmp(&a.count));
    tallies.truncate(WINNING_SLOT_LIMIT);
    tallies
}

/// Plurality winner among the candidate places. The fold replaces the
/// leader only on a strictly greater count, so of tied places the one
/// listed first wins. Returns `None` for an empty candidate list and
/// when no place has received any vote.
pub fn top_location(places: &[Place]) -> Option<&Place> {
    let leader = places
        .iter()
        .fold(None::<&Place>, |leader, place| match leader {
            Some(current) if place.vote_count() > current.vote_count() => Some(place),
            Some(current) => Some(current),
            None => Some(place),
        })?;
    (leader.vote_count() > 0).then_some(leader)
}

/// A location ballot is only presented when there is an actual choice to
/// make. Single-place events auto-select that place; zero-place events
/// need no location vote at all.
pub fn ballot_required(places: &[Place]) -> bool {
    places.len() >= 2
}

/// One cell of the weekly availability heatmap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub count: usize,
    pub people: Vec<String>,
}

/// Per-day-per-hour participant density for one displayed week.
/// `max_count` is scoped to this week, not the whole event, so intensity
/// rescales as the user navigates between weeks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    pub days: [NaiveDate; DAYS_PER_WEEK],
    pub cells: Vec<Vec<HeatmapCell>>,
    pub max_count: usize,
}

impl Heatmap {
    pub fn cell(&self, day_idx: usize, hour: u8) -> Option<&HeatmapCell> {
        self.cells.get(day_idx)?.get(usize::from(hour))
    }

    /// Render intensity in `[0.0, 1.0]`: 0 is fully transparent, 1 is
    /// full saturation. An all-empty grid is uniformly 0.
    pub fn intensity(&self, day_idx: usize, hour: u8) -> f64 {
        if self.max_count == 0 {
            return 0.0;
        }
        self.cell(day_idx, hour)
            .map(|c| c.count as f64 / self.max_count as f64)
            .unwrap_or(0.0)
    }
}

/// Builds the heatmap for the given week from all participants' entries.
/// Slots outside the displayed week are ignored; a participant is counted
/// once per cell even if their slot list repeats it.
pub fn heatmap_for_week(entries: &[AvailabilityEntry], week: &WeekView) -> Heatmap {
    let days = week.days();
    let mut cells =
        vec![vec![HeatmapCell::default(); usize::from(HOURS_PER_DAY)]; DAYS_PER_WEEK];

    for entry in entries {
        let name = entry.display_name();
        let in_week: HashSet<(usize, u8)> = entry
            .available_slots
            .iter()
            .filter_map(|at| {
                let slot = TimeSlot::from_datetime(*at);
                week.index_of(slot.day).map(|day_idx| (day_idx, slot.hour))
            })
            .collect();

        for (day_idx, hour) in in_week {
            let cell = &mut cells[day_idx][usize::from(hour)];
            cell.count += 1;
            cell.people.push(name.clone());
        }
    }

    let max_count = cells
        .iter()
        .flatten()
        .map(|c| c.count)
        .max()
        .unwrap_or(0);

    Heatmap {
        days,
        cells,
        max_count,
    }
}
