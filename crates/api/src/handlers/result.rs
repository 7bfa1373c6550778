//! # Result Handler
//!
//! Computes the aggregated result for an event: most-voted location, top
//! time slots, and the availability heatmap for a displayed week. The
//! aggregation itself is pure (`whenwhere_core::result::compose_result`);
//! this handler only fetches the event and picks the week.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use whenwhere_core::{
    errors::EventError,
    result::{EventResultView, compose_result},
    selection::WeekView,
};

use crate::{ApiState, middleware::error_handling::AppError};

/// Query parameters for the event result endpoint.
#[derive(Debug, Deserialize)]
pub struct ResultQuery {
    /// Any date inside the week to render the heatmap for
    /// (`YYYY-MM-DD`). Defaults to the event's initial week.
    pub week: Option<String>,
}

/// `GET /api/events/hash/:share_hash/result?week=2025-06-02`
#[axum::debug_handler]
pub async fn get_event_result(
    State(state): State<Arc<ApiState>>,
    Path(share_hash): Path<String>,
    Query(query): Query<ResultQuery>,
) -> Result<Json<EventResultView>, AppError> {
    let event =
        whenwhere_db::repositories::event::get_event_by_share_hash(&state.db_pool, &share_hash)
            .await
            .map_err(EventError::Database)?
            .ok_or_else(|| {
                EventError::NotFound(format!("Event with share hash {} not found", share_hash))
            })?;

    let week = match &query.week {
        Some(raw) => {
            let date = raw.parse::<NaiveDate>().map_err(|_| {
                AppError(EventError::Validation(format!(
                    "Invalid week date '{}', expected YYYY-MM-DD",
                    raw
                )))
            })?;
            WeekView::containing(date)
        }
        None => WeekView::initial(&event.date_options, Utc::now()),
    };

    Ok(Json(compose_result(&event, &week)))
}
