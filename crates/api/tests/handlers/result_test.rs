use axum::Json;
use chrono::{NaiveDate, Utc};
use mockall::predicate;
use pretty_assertions::assert_eq;
use whenwhere_api::middleware::error_handling::AppError;
use whenwhere_core::{
    errors::EventError,
    models::event::AvailabilityEntry,
    result::{EventResultView, compose_result},
    selection::WeekView,
};

use crate::test_utils::{TestContext, at, place_with_votes, sample_event};

/// Mirrors the result handler: resolve by share hash, pick the week from
/// the optional query parameter, and run the pure composer.
async fn test_event_result_wrapper(
    ctx: &mut TestContext,
    share_hash: &'static str,
    week: Option<&str>,
) -> Result<Json<EventResultView>, AppError> {
    let event = ctx
        .event_repo
        .get_event_by_share_hash(share_hash)
        .await?
        .ok_or_else(|| {
            AppError(EventError::NotFound(format!(
                "Event with share hash {} not found",
                share_hash
            )))
        })?;

    let week = match week {
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

#[tokio::test]
async fn test_event_result_composes_winners_and_heatmap() {
    let mut ctx = TestContext::new();
    let mut event = sample_event();
    event.places = vec![
        place_with_votes("Cafe", &["user-1", "user-2"]),
        place_with_votes("Park", &["user-3"]),
    ];
    event.availability = vec![
        AvailabilityEntry {
            user_id: "user-1".to_string(),
            username: Some("Alice".to_string()),
            available_slots: vec![at(2025, 6, 2, 10)],
            voted_location: None,
        },
        AvailabilityEntry {
            user_id: "user-2".to_string(),
            username: Some("Bob".to_string()),
            available_slots: vec![at(2025, 6, 2, 10), at(2025, 6, 3, 14)],
            voted_location: None,
        },
    ];

    let fetched = event.clone();
    ctx.event_repo
        .expect_get_event_by_share_hash()
        .with(predicate::eq("Ab3dE6gH9jK2"))
        .times(1)
        .returning(move |_| Ok(Some(fetched.clone())));

    let Json(view) = test_event_result_wrapper(&mut ctx, "Ab3dE6gH9jK2", Some("2025-06-04"))
        .await
        .expect("result should compose");

    assert_eq!(view.top_location.expect("a winner").name, "Cafe");
    assert_eq!(view.winning_slots.len(), 2);
    assert_eq!(view.winning_slots[0].slot, at(2025, 6, 2, 10));
    assert_eq!(view.winning_slots[0].people, vec!["Alice", "Bob"]);
    assert_eq!(view.winning_slots[1].slot, at(2025, 6, 3, 14));
    // The requested week (containing Wed 2025-06-04) drives the heatmap.
    assert_eq!(view.heatmap.days[0], NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
    assert_eq!(view.heatmap.max_count, 2);
    assert_eq!(view.heatmap.intensity(0, 10), 1.0);
}

#[tokio::test]
async fn test_event_result_on_empty_event_has_no_winners() {
    let mut ctx = TestContext::new();
    let mut event = sample_event();
    event.places = Vec::new();
    event.availability = Vec::new();

    let fetched = event.clone();
    ctx.event_repo
        .expect_get_event_by_share_hash()
        .times(1)
        .returning(move |_| Ok(Some(fetched.clone())));

    let Json(view) = test_event_result_wrapper(&mut ctx, "Ab3dE6gH9jK2", None)
        .await
        .expect("empty events still compose");

    assert!(view.top_location.is_none());
    assert!(view.winning_slots.is_empty());
    assert_eq!(view.heatmap.max_count, 0);
}

#[tokio::test]
async fn test_event_result_not_found() {
    let mut ctx = TestContext::new();

    ctx.event_repo
        .expect_get_event_by_share_hash()
        .times(1)
        .returning(|_| Ok(None));

    let err = test_event_result_wrapper(&mut ctx, "stale-hash00", None)
        .await
        .expect_err("missing event should error");

    assert!(matches!(err.0, EventError::NotFound(_)));
}

#[tokio::test]
async fn test_event_result_rejects_malformed_week() {
    let mut ctx = TestContext::new();
    let event = sample_event();

    ctx.event_repo
        .expect_get_event_by_share_hash()
        .times(1)
        .returning(move |_| Ok(Some(event.clone())));

    let err = test_event_result_wrapper(&mut ctx, "Ab3dE6gH9jK2", Some("not-a-date"))
        .await
        .expect_err("malformed week should be rejected");

    assert!(matches!(err.0, EventError::Validation(_)));
}
