use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use whenwhere_core::models::event::{AvailabilityEntry, Event, Geometry, Place};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEvent {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub creator_id: String,
    pub date_options: Vec<DateTime<Utc>>,
    pub share_hash: String,
    pub created_at: DateTime<Utc>,
}

impl DbEvent {
    /// Assembles the aggregate root from its rows.
    pub fn into_event(self, places: Vec<Place>, availability: Vec<AvailabilityEntry>) -> Event {
        Event {
            id: self.id,
            title: self.title,
            description: self.description,
            creator_id: self.creator_id,
            date_options: self.date_options,
            places,
            availability,
            share_hash: self.share_hash,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPlace {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub formatted_address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub votes: Vec<String>,
}

impl DbPlace {
    pub fn into_place(self) -> Place {
        Place {
            name: self.name,
            formatted_address: self.formatted_address,
            geometry: match (self.lat, self.lng) {
                (Some(lat), Some(lng)) => Some(Geometry { lat, lng }),
                _ => None,
            },
            votes: self.votes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAvailabilityEntry {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: String,
    pub username: Option<String>,
    pub available_slots: Vec<DateTime<Utc>>,
    pub voted_place: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DbAvailabilityEntry {
    /// Rehydrates the voted place reference from the event's candidate
    /// list; a vote for a place that no longer exists becomes `None`.
    pub fn into_entry(self, places: &[Place]) -> AvailabilityEntry {
        let voted_location = self
            .voted_place
            .as_deref()
            .and_then(|name| places.iter().find(|p| p.name == name))
            .cloned();
        AvailabilityEntry {
            user_id: self.user_id,
            username: self.username,
            available_slots: self.available_slots,
            voted_location,
        }
    }
}
