use axum::{Router, routing::put};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/events/:id/availability",
        put(handlers::availability::submit_availability),
    )
}
