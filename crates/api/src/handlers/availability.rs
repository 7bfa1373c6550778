//! # Availability Handlers
//!
//! Submission of a participant's availability and location vote for an
//! event. One entry per participant per event: re-submission overwrites
//! the stored entry (upsert by user id) rather than appending.
//!
//! ## Vote semantics
//!
//! A participant votes for at most one place. Submitting a vote first
//! clears the participant's id from every vote list of the event, then
//! appends it to the chosen place if that place exists by name. Both
//! steps are idempotent, so voting twice for the same place leaves a
//! single entry, and changing one's vote never leaves the old one
//! behind.

use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use uuid::Uuid;
use whenwhere_core::{
    errors::EventError,
    models::event::{Event, SubmitAvailabilityRequest},
};

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn submit_availability(
    State(state): State<Arc<ApiState>>,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<SubmitAvailabilityRequest>,
) -> Result<Json<Event>, AppError> {
    if payload.user_id.is_empty() {
        return Err(AppError(EventError::Validation(
            "user_id must not be empty".to_string(),
        )));
    }

    let event = whenwhere_db::repositories::event::get_event_by_id(&state.db_pool, event_id)
        .await
        .map_err(EventError::Database)?
        .ok_or_else(|| EventError::NotFound(format!("Event with ID {} not found", event_id)))?;

    // A location vote only counts when it names one of the event's
    // candidate places; anything else is silently ignored, matching the
    // zero-count semantics of absent votes.
    let voted_place = payload
        .voted_location
        .as_ref()
        .map(|p| p.name.as_str())
        .filter(|name| event.places.iter().any(|p| p.name == *name));

    if let Some(place_name) = voted_place {
        whenwhere_db::repositories::place::clear_vote(&state.db_pool, event_id, &payload.user_id)
            .await
            .map_err(EventError::Database)?;
        whenwhere_db::repositories::place::record_vote(
            &state.db_pool,
            event_id,
            place_name,
            &payload.user_id,
        )
        .await
        .map_err(EventError::Database)?;
    }

    whenwhere_db::repositories::availability::upsert_availability(
        &state.db_pool,
        event_id,
        &payload.user_id,
        payload.username.as_deref(),
        &payload.available_slots,
        voted_place,
    )
    .await
    .map_err(EventError::Database)?;

    // Return the refreshed aggregate so the client sees its own write.
    let event = whenwhere_db::repositories::event::get_event_by_id(&state.db_pool, event_id)
        .await
        .map_err(EventError::Database)?
        .ok_or_else(|| EventError::NotFound(format!("Event with ID {} not found", event_id)))?;

    Ok(Json(event))
}
