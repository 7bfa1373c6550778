use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbAvailabilityEntry;

/// Inserts or replaces the participant's entry for the event. Slots are
/// overwritten wholesale; username and voted place are only overwritten
/// when the new submission provides them.
pub async fn upsert_availability(
    pool: &Pool<Postgres>,
    event_id: Uuid,
    user_id: &str,
    username: Option<&str>,
    available_slots: &[DateTime<Utc>],
    voted_place: Option<&str>,
) -> Result<DbAvailabilityEntry> {
    let entry = sqlx::query_as::<_, DbAvailabilityEntry>(
        r#"
        INSERT INTO availability (id, event_id, user_id, username, available_slots, voted_place, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (event_id, user_id) DO UPDATE
        SET username = COALESCE(EXCLUDED.username, availability.username),
            available_slots = EXCLUDED.available_slots,
            voted_place = COALESCE(EXCLUDED.voted_place, availability.voted_place)
        RETURNING id, event_id, user_id, username, available_slots, voted_place, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(event_id)
    .bind(user_id)
    .bind(username)
    .bind(available_slots)
    .bind(voted_place)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(entry)
}

pub async fn get_availability_by_event_id(
    pool: &Pool<Postgres>,
    event_id: Uuid,
) -> Result<Vec<DbAvailabilityEntry>> {
    let entries = sqlx::query_as::<_, DbAvailabilityEntry>(
        r#"
        SELECT id, event_id, user_id, username, available_slots, voted_place, created_at
        FROM availability
        WHERE event_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}
