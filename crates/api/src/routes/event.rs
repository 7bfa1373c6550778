use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/events", post(handlers::event::create_event))
        .route(
            "/api/events/hash/:share_hash",
            get(handlers::event::get_event_by_share_hash),
        )
        .route(
            "/api/events/hash/:share_hash/result",
            get(handlers::result::get_event_result),
        )
        .route(
            "/api/events/created/:user_id",
            get(handlers::event::get_events_created_by),
        )
        .route(
            "/api/events/invited/:user_id",
            get(handlers::event::get_events_invited_to),
        )
        .route("/api/events/:id", delete(handlers::event::delete_event))
}
