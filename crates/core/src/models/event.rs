use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Geographic point attached to a candidate place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub lat: f64,
    pub lng: f64,
}

/// A candidate meeting location with its vote list. `votes` holds the
/// user ids of participants who picked this place; a user id appears at
/// most once per place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub formatted_address: Option<String>,
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub votes: Vec<String>,
}

impl Place {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            formatted_address: None,
            geometry: None,
            votes: Vec::new(),
        }
    }

    /// Set-add semantics: voting twice with the same user id leaves the
    /// vote list unchanged after the first vote.
    pub fn record_vote(&mut self, user_id: &str) {
        if !self.votes.iter().any(|v| v == user_id) {
            self.votes.push(user_id.to_string());
        }
    }

    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }
}

/// One participant's submitted availability for one event: their chosen
/// slots (materialized as absolute timestamps) plus an optional location
/// vote. An event holds at most one entry per `user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    pub user_id: String,
    pub username: Option<String>,
    #[serde(default)]
    pub available_slots: Vec<DateTime<Utc>>,
    pub voted_location: Option<Place>,
}

impl AvailabilityEntry {
    /// Display name with fallbacks: username, then user id, then
    /// "Anonymous" for entries with an empty id.
    pub fn display_name(&self) -> String {
        match &self.username {
            Some(name) if !name.is_empty() => name.clone(),
            _ if !self.user_id.is_empty() => self.user_id.clone(),
            _ => "Anonymous".to_string(),
        }
    }
}

/// Aggregate root for a scheduled event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub creator_id: String,
    pub date_options: Vec<DateTime<Utc>>,
    pub places: Vec<Place>,
    pub availability: Vec<AvailabilityEntry>,
    pub share_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Replaces the participant's existing entry or appends a new one;
    /// re-submission overwrites rather than appending.
    pub fn upsert_availability(&mut self, entry: AvailabilityEntry) {
        match self
            .availability
            .iter_mut()
            .find(|a| a.user_id == entry.user_id)
        {
            Some(existing) => *existing = entry,
            None => self.availability.push(entry),
        }
    }

    /// An event expires once its latest candidate date is strictly in the
    /// past. Events with no date options never expire here; creation
    /// validation rejects them anyway.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.date_options.iter().max().is_some_and(|max| *max < now)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub creator_id: String,
    pub date_options: Vec<DateTime<Utc>>,
    #[serde(default)]
    pub places: Vec<Place>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventResponse {
    pub id: Uuid,
    pub title: String,
    pub share_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAvailabilityRequest {
    pub user_id: String,
    pub username: Option<String>,
    #[serde(default)]
    pub available_slots: Vec<DateTime<Utc>>,
    pub voted_location: Option<Place>,
}
