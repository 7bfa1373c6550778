use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create events table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            title VARCHAR(255) NOT NULL,
            description TEXT NULL,
            creator_id VARCHAR(255) NOT NULL,
            date_options TIMESTAMP WITH TIME ZONE[] NOT NULL,
            share_hash VARCHAR(64) NOT NULL UNIQUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT nonempty_date_options CHECK (cardinality(date_options) > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create places table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS places (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            event_id UUID NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            name VARCHAR(255) NOT NULL,
            formatted_address VARCHAR(512) NULL,
            lat DOUBLE PRECISION NULL,
            lng DOUBLE PRECISION NULL,
            votes TEXT[] NOT NULL DEFAULT '{}',
            UNIQUE (event_id, name)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create availability table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS availability (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            event_id UUID NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            user_id VARCHAR(255) NOT NULL,
            username VARCHAR(255) NULL,
            available_slots TIMESTAMP WITH TIME ZONE[] NOT NULL DEFAULT '{}',
            voted_place VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            UNIQUE (event_id, user_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_events_share_hash ON events(share_hash);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_events_creator_id ON events(creator_id);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_places_event_id ON places(event_id);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_availability_event_id ON availability(event_id);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_availability_user_id ON availability(user_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized");
    Ok(())
}
