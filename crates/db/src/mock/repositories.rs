use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;
use whenwhere_core::models::event::{Event, Place};

use crate::models::DbAvailabilityEntry;

// Mock repositories for testing
mock! {
    pub EventRepo {
        pub async fn create_event(
            &self,
            title: &'static str,
            description: Option<&'static str>,
            creator_id: &'static str,
            date_options: Vec<DateTime<Utc>>,
            places: Vec<Place>,
        ) -> eyre::Result<Event>;

        pub async fn get_event_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<Event>>;

        pub async fn get_event_by_share_hash(
            &self,
            share_hash: &'static str,
        ) -> eyre::Result<Option<Event>>;

        pub async fn get_events_created_by(
            &self,
            user_id: &'static str,
        ) -> eyre::Result<Vec<Event>>;

        pub async fn get_events_invited_to(
            &self,
            user_id: &'static str,
        ) -> eyre::Result<Vec<Event>>;

        pub async fn delete_event(
            &self,
            id: Uuid,
        ) -> eyre::Result<bool>;

        pub async fn delete_expired_events(
            &self,
            now: DateTime<Utc>,
        ) -> eyre::Result<Vec<String>>;
    }
}

mock! {
    pub PlaceRepo {
        pub async fn get_places_by_event_id(
            &self,
            event_id: Uuid,
        ) -> eyre::Result<Vec<Place>>;

        pub async fn record_vote(
            &self,
            event_id: Uuid,
            place_name: &'static str,
            user_id: &'static str,
        ) -> eyre::Result<bool>;

        pub async fn clear_vote(
            &self,
            event_id: Uuid,
            user_id: &'static str,
        ) -> eyre::Result<()>;
    }
}

mock! {
    pub AvailabilityRepo {
        pub async fn upsert_availability(
            &self,
            event_id: Uuid,
            user_id: &'static str,
            username: Option<&'static str>,
            available_slots: Vec<DateTime<Utc>>,
            voted_place: Option<&'static str>,
        ) -> eyre::Result<DbAvailabilityEntry>;

        pub async fn get_availability_by_event_id(
            &self,
            event_id: Uuid,
        ) -> eyre::Result<Vec<DbAvailabilityEntry>>;
    }
}
