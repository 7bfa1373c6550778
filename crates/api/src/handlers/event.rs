use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;
use whenwhere_core::{
    errors::EventError,
    models::event::{CreateEventRequest, CreateEventResponse, Event},
};

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn create_event(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<CreateEventResponse>), AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError(EventError::Validation(
            "Event title must not be empty".to_string(),
        )));
    }
    if payload.date_options.is_empty() {
        return Err(AppError(EventError::Validation(
            "Event must have at least one candidate date".to_string(),
        )));
    }
    // Place names are unique per event; catch duplicates up front instead
    // of letting the insert trip the constraint.
    let mut seen = HashSet::new();
    if let Some(duplicate) = payload.places.iter().find(|p| !seen.insert(p.name.as_str())) {
        return Err(AppError(EventError::Validation(format!(
            "Duplicate place name '{}'",
            duplicate.name
        ))));
    }

    let db_event = whenwhere_db::repositories::event::create_event(
        &state.db_pool,
        &payload.title,
        payload.description.as_deref(),
        &payload.creator_id,
        &payload.date_options,
        &payload.places,
    )
    .await
    .map_err(EventError::Database)?;

    let response = CreateEventResponse {
        id: db_event.id,
        title: db_event.title,
        share_hash: db_event.share_hash,
        created_at: db_event.created_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn get_event_by_share_hash(
    State(state): State<Arc<ApiState>>,
    Path(share_hash): Path<String>,
) -> Result<Json<Event>, AppError> {
    let event =
        whenwhere_db::repositories::event::get_event_by_share_hash(&state.db_pool, &share_hash)
            .await
            .map_err(EventError::Database)?
            .ok_or_else(|| {
                EventError::NotFound(format!("Event with share hash {} not found", share_hash))
            })?;

    Ok(Json(event))
}

#[axum::debug_handler]
pub async fn get_events_created_by(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Event>>, AppError> {
    let events =
        whenwhere_db::repositories::event::get_events_created_by(&state.db_pool, &user_id)
            .await
            .map_err(EventError::Database)?;

    Ok(Json(events))
}

#[axum::debug_handler]
pub async fn get_events_invited_to(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Event>>, AppError> {
    let events =
        whenwhere_db::repositories::event::get_events_invited_to(&state.db_pool, &user_id)
            .await
            .map_err(EventError::Database)?;

    Ok(Json(events))
}

// Creator-only deletion; authorization is enforced by the fronting auth
// layer, which owns the identity check.
#[axum::debug_handler]
pub async fn delete_event(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = whenwhere_db::repositories::event::delete_event(&state.db_pool, id)
        .await
        .map_err(EventError::Database)?;

    if !deleted {
        return Err(AppError(EventError::NotFound(format!(
            "Event with ID {} not found",
            id
        ))));
    }

    Ok(StatusCode::NO_CONTENT)
}
