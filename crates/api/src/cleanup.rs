//! Expired-event cleanup.
//!
//! An event expires once its latest candidate date has passed; expired
//! events are deleted on a fixed schedule (hourly by default). The rest
//! of the system never assumes an event survives this sweep: every
//! request refetches, and a vanished event surfaces as a 404.

use std::time::Duration;

use eyre::Result;
use sqlx::PgPool;
use tracing::{error, info};

/// Runs one sweep, deleting every event whose latest candidate date is
/// in the past. Returns the number of events deleted.
pub async fn delete_expired_events_once(pool: &PgPool) -> Result<usize> {
    let deleted =
        whenwhere_db::repositories::event::delete_expired_events(pool, chrono::Utc::now()).await?;

    for title in &deleted {
        info!("Deleted expired event \"{}\"", title);
    }
    if !deleted.is_empty() {
        info!("Total deleted events this sweep: {}", deleted.len());
    }

    Ok(deleted.len())
}

/// Sweeps forever at the given interval. Failures are logged and the
/// loop keeps running; a transient database error must not kill the
/// schedule.
pub async fn run_cleanup_loop(pool: PgPool, interval: Duration) {
    info!(
        "Expired-event cleanup scheduled every {} seconds",
        interval.as_secs()
    );
    let mut ticker = tokio::time::interval(interval);
    // The first tick fires immediately; sweeping at startup is harmless.
    loop {
        ticker.tick().await;
        if let Err(err) = delete_expired_events_once(&pool).await {
            error!("Failed to delete expired events: {}", err);
        }
    }
}
