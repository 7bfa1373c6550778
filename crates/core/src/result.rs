//! Composes aggregation outputs into the view-model behind the event
//! result page. Pure and stateless: no I/O, safe to recompute per render.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{self, Heatmap, SlotTally};
use crate::models::event::{Event, Place};
use crate::selection::WeekView;

/// One ranked slot, formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinningSlot {
    pub slot: DateTime<Utc>,
    pub label: String,
    pub people: Vec<String>,
}

impl From<SlotTally> for WinningSlot {
    fn from(tally: SlotTally) -> Self {
        Self {
            label: tally.slot.format("%a %d %b %Y, %H:%M").to_string(),
            slot: tally.slot,
            people: tally.people,
        }
    }
}

/// Final result view-model: most-voted location, top time slots, and the
/// heatmap for the requested week. Empty events compose into the
/// "no winner yet" shape (`None` location, empty slot list) rather than
/// failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventResultView {
    pub top_location: Option<Place>,
    pub winning_slots: Vec<WinningSlot>,
    pub heatmap: Heatmap,
}

pub fn compose_result(event: &Event, week: &WeekView) -> EventResultView {
    EventResultView {
        top_location: aggregate::top_location(&event.places).cloned(),
        winning_slots: aggregate::winning_slots(&event.availability)
            .into_iter()
            .map(WinningSlot::from)
            .collect(),
        heatmap: aggregate::heatmap_for_week(&event.availability, week),
    }
}
