use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;
use whenwhere_core::models::event::Place;

use crate::models::DbPlace;

pub async fn get_places_by_event_id(pool: &Pool<Postgres>, event_id: Uuid) -> Result<Vec<Place>> {
    let rows = sqlx::query_as::<_, DbPlace>(
        r#"
        SELECT id, event_id, name, formatted_address, lat, lng, votes
        FROM places
        WHERE event_id = $1
        ORDER BY id ASC
        "#,
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(DbPlace::into_place).collect())
}

/// Appends the voter to the named place's vote list, if the place exists
/// and the voter is not already on it. The guard makes repeat votes for
/// the same place a no-op. Returns whether a row changed.
pub async fn record_vote(
    pool: &Pool<Postgres>,
    event_id: Uuid,
    place_name: &str,
    user_id: &str,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE places
        SET votes = array_append(votes, $3)
        WHERE event_id = $1 AND name = $2 AND NOT ($3 = ANY(votes))
        "#,
    )
    .bind(event_id)
    .bind(place_name)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Removes the user's vote from every place of the event. Run before
/// recording a new vote so a user id appears in at most one vote list.
pub async fn clear_vote(pool: &Pool<Postgres>, event_id: Uuid, user_id: &str) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE places
        SET votes = array_remove(votes, $2)
        WHERE event_id = $1 AND $2 = ANY(votes)
        "#,
    )
    .bind(event_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}
