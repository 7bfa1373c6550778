use chrono::{DateTime, Utc};
use eyre::Result;
use rand::Rng;
use sqlx::{Pool, Postgres};
use uuid::Uuid;
use whenwhere_core::models::event::{Event, Place};

use crate::models::DbEvent;
use crate::repositories::{availability, place};

/// Length of the URL-safe share token.
const SHARE_HASH_LEN: usize = 12;

/// How many times event creation retries on a share-hash collision
/// before giving up. Collisions are vanishingly rare at 12 alphanumeric
/// characters; the uniqueness constraint is the backstop.
const SHARE_HASH_RETRIES: usize = 3;

fn generate_share_hash() -> String {
    rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(SHARE_HASH_LEN)
        .map(char::from)
        .collect()
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23505")
}

pub async fn create_event(
    pool: &Pool<Postgres>,
    title: &str,
    description: Option<&str>,
    creator_id: &str,
    date_options: &[DateTime<Utc>],
    places: &[Place],
) -> Result<DbEvent> {
    let now = Utc::now();

    // Each attempt runs in its own transaction: a failed statement poisons
    // a Postgres transaction, so a share-hash collision rolls the whole
    // attempt back and a place-insert failure never leaves a committed
    // event row behind.
    let mut attempt = 0;
    let event = loop {
        let id = Uuid::new_v4();
        let share_hash = generate_share_hash();

        tracing::debug!(
            "Creating event: id={}, title={}, share_hash={}, places={}",
            id,
            title,
            share_hash,
            places.len()
        );

        let mut tx = pool.begin().await?;

        let inserted = sqlx::query_as::<_, DbEvent>(
            r#"
            INSERT INTO events (id, title, description, creator_id, date_options, share_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, creator_id, date_options, share_hash, created_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(creator_id)
        .bind(date_options)
        .bind(&share_hash)
        .bind(now)
        .fetch_one(&mut *tx)
        .await;

        let event = match inserted {
            Ok(event) => event,
            Err(err) if is_unique_violation(&err) && attempt < SHARE_HASH_RETRIES => {
                tracing::warn!("Share hash collision on {}, regenerating", share_hash);
                attempt += 1;
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        // Candidate places start with empty vote lists regardless of input.
        for candidate in places {
            sqlx::query(
                r#"
                INSERT INTO places (id, event_id, name, formatted_address, lat, lng, votes)
                VALUES ($1, $2, $3, $4, $5, $6, '{}')
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(event.id)
            .bind(&candidate.name)
            .bind(&candidate.formatted_address)
            .bind(candidate.geometry.map(|g| g.lat))
            .bind(candidate.geometry.map(|g| g.lng))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        break event;
    };

    tracing::debug!("Event created successfully: id={}", event.id);
    Ok(event)
}

/// Loads the aggregate root: event row plus its places and availability.
async fn assemble_event(pool: &Pool<Postgres>, row: DbEvent) -> Result<Event> {
    let places = place::get_places_by_event_id(pool, row.id).await?;
    let entries = availability::get_availability_by_event_id(pool, row.id).await?;
    let entries = entries
        .into_iter()
        .map(|e| e.into_entry(&places))
        .collect();
    Ok(row.into_event(places, entries))
}

pub async fn get_event_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Event>> {
    let row = sqlx::query_as::<_, DbEvent>(
        r#"
        SELECT id, title, description, creator_id, date_options, share_hash, created_at
        FROM events
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(assemble_event(pool, row).await?)),
        None => Ok(None),
    }
}

pub async fn get_event_by_share_hash(
    pool: &Pool<Postgres>,
    share_hash: &str,
) -> Result<Option<Event>> {
    tracing::debug!("Getting event by share hash: {}", share_hash);

    let row = sqlx::query_as::<_, DbEvent>(
        r#"
        SELECT id, title, description, creator_id, date_options, share_hash, created_at
        FROM events
        WHERE share_hash = $1
        "#,
    )
    .bind(share_hash)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(assemble_event(pool, row).await?)),
        None => {
            tracing::debug!("No event for share hash: {}", share_hash);
            Ok(None)
        }
    }
}

pub async fn get_events_created_by(pool: &Pool<Postgres>, user_id: &str) -> Result<Vec<Event>> {
    let rows = sqlx::query_as::<_, DbEvent>(
        r#"
        SELECT id, title, description, creator_id, date_options, share_hash, created_at
        FROM events
        WHERE creator_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut events = Vec::with_capacity(rows.len());
    for row in rows {
        events.push(assemble_event(pool, row).await?);
    }
    Ok(events)
}

/// Events the user participates in: any event holding an availability
/// entry under their id.
pub async fn get_events_invited_to(pool: &Pool<Postgres>, user_id: &str) -> Result<Vec<Event>> {
    let rows = sqlx::query_as::<_, DbEvent>(
        r#"
        SELECT e.id, e.title, e.description, e.creator_id, e.date_options, e.share_hash, e.created_at
        FROM events e
        JOIN availability a ON a.event_id = e.id
        WHERE a.user_id = $1
        ORDER BY e.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut events = Vec::with_capacity(rows.len());
    for row in rows {
        events.push(assemble_event(pool, row).await?);
    }
    Ok(events)
}

pub async fn delete_event(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM events
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Deletes every event whose latest candidate date is strictly before
/// `now`. Returns the deleted titles for logging.
pub async fn delete_expired_events(
    pool: &Pool<Postgres>,
    now: DateTime<Utc>,
) -> Result<Vec<String>> {
    let titles = sqlx::query_scalar::<_, String>(
        r#"
        DELETE FROM events
        WHERE (SELECT MAX(d) FROM UNNEST(date_options) AS d) < $1
        RETURNING title
        "#,
    )
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(titles)
}
