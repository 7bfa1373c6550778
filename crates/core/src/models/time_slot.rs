use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{EventError, EventResult};

/// An hour-granularity point in time, the atomic unit of availability
/// voting. Identity is `(day, hour)`; `minute` is carried only so the
/// persisted timestamp can be materialized and is always 0 in current use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimeSlot {
    pub day: NaiveDate,
    pub hour: u8,
    pub minute: u8,
}

impl TimeSlot {
    pub fn new(day: NaiveDate, hour: u8) -> EventResult<Self> {
        if hour > 23 {
            return Err(EventError::Validation(format!(
                "Slot hour must be in 0..=23, got {hour}"
            )));
        }
        Ok(Self { day, hour, minute: 0 })
    }

    /// Truncates an absolute timestamp down to its slot.
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self {
            day: at.date_naive(),
            hour: at.hour() as u8,
            minute: 0,
        }
    }

    /// Materializes the slot as an absolute UTC timestamp.
    pub fn to_datetime(&self) -> DateTime<Utc> {
        let time = NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or(NaiveTime::MIN);
        Utc.from_utc_datetime(&self.day.and_time(time))
    }
}

// Matching ignores the minute field: two slots on the same calendar day
// and hour are the same slot.
impl PartialEq for TimeSlot {
    fn eq(&self, other: &Self) -> bool {
        self.day == other.day && self.hour == other.hour
    }
}

impl Eq for TimeSlot {}

impl PartialOrd for TimeSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.day, self.hour).cmp(&(other.day, other.hour))
    }
}

impl Hash for TimeSlot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.day.hash(state);
        self.hour.hash(state);
    }
}
