use axum::Json;
use chrono::{DateTime, Utc};
use mockall::predicate;
use pretty_assertions::assert_eq;
use uuid::Uuid;
use whenwhere_api::middleware::error_handling::AppError;
use whenwhere_core::{errors::EventError, models::event::Event};
use whenwhere_db::models::DbAvailabilityEntry;

use crate::test_utils::{TestContext, at, sample_event};

/// Mirrors the submit_availability handler flow against the mocks:
/// validate, resolve the event, clear + append the location vote when it
/// names a known place, then upsert the entry.
async fn test_submit_availability_wrapper(
    ctx: &mut TestContext,
    event_id: Uuid,
    user_id: &'static str,
    username: Option<&'static str>,
    available_slots: Vec<DateTime<Utc>>,
    voted_place: Option<&'static str>,
) -> Result<Json<Event>, AppError> {
    if user_id.is_empty() {
        return Err(AppError(EventError::Validation(
            "user_id must not be empty".to_string(),
        )));
    }

    let event = ctx
        .event_repo
        .get_event_by_id(event_id)
        .await?
        .ok_or_else(|| {
            AppError(EventError::NotFound(format!(
                "Event with ID {} not found",
                event_id
            )))
        })?;

    let voted_place =
        voted_place.filter(|name| event.places.iter().any(|p| p.name == *name));

    if let Some(place_name) = voted_place {
        ctx.place_repo.clear_vote(event_id, user_id).await?;
        ctx.place_repo
            .record_vote(event_id, place_name, user_id)
            .await?;
    }

    ctx.availability_repo
        .upsert_availability(event_id, user_id, username, available_slots, voted_place)
        .await?;

    let event = ctx
        .event_repo
        .get_event_by_id(event_id)
        .await?
        .ok_or_else(|| {
            AppError(EventError::NotFound(format!(
                "Event with ID {} not found",
                event_id
            )))
        })?;
    Ok(Json(event))
}

fn db_entry(event_id: Uuid, user_id: &str, voted_place: Option<&str>) -> DbAvailabilityEntry {
    DbAvailabilityEntry {
        id: Uuid::new_v4(),
        event_id,
        user_id: user_id.to_string(),
        username: None,
        available_slots: Vec::new(),
        voted_place: voted_place.map(|p| p.to_string()),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_submit_availability_upserts_and_records_vote() {
    let mut ctx = TestContext::new();
    let event = sample_event();
    let event_id = event.id;

    let fetched = event.clone();
    ctx.event_repo
        .expect_get_event_by_id()
        .with(predicate::eq(event_id))
        .times(2)
        .returning(move |_| Ok(Some(fetched.clone())));

    // Voting for "Park" clears any prior vote, then appends.
    ctx.place_repo
        .expect_clear_vote()
        .with(predicate::eq(event_id), predicate::eq("user-2"))
        .times(1)
        .returning(|_, _| Ok(()));
    ctx.place_repo
        .expect_record_vote()
        .with(
            predicate::eq(event_id),
            predicate::eq("Park"),
            predicate::eq("user-2"),
        )
        .times(1)
        .returning(|_, _, _| Ok(true));

    ctx.availability_repo
        .expect_upsert_availability()
        .times(1)
        .returning(move |event_id, user_id, _, _, voted_place| {
            Ok(db_entry(event_id, user_id, voted_place))
        });

    let Json(returned) = test_submit_availability_wrapper(
        &mut ctx,
        event_id,
        "user-2",
        Some("Bob"),
        vec![at(2025, 6, 2, 10), at(2025, 6, 3, 14)],
        Some("Park"),
    )
    .await
    .expect("submission should succeed");

    assert_eq!(returned.id, event_id);
}

#[tokio::test]
async fn test_submit_availability_ignores_unknown_place() {
    let mut ctx = TestContext::new();
    let event = sample_event();
    let event_id = event.id;

    let fetched = event.clone();
    ctx.event_repo
        .expect_get_event_by_id()
        .times(2)
        .returning(move |_| Ok(Some(fetched.clone())));

    // A vote naming no candidate place records nothing.
    ctx.place_repo.expect_clear_vote().times(0);
    ctx.place_repo.expect_record_vote().times(0);

    ctx.availability_repo
        .expect_upsert_availability()
        .withf(|_, _, _, _, voted_place| voted_place.is_none())
        .times(1)
        .returning(move |event_id, user_id, _, _, voted_place| {
            Ok(db_entry(event_id, user_id, voted_place))
        });

    test_submit_availability_wrapper(
        &mut ctx,
        event_id,
        "user-2",
        None,
        vec![at(2025, 6, 2, 10)],
        Some("Nonexistent Bar"),
    )
    .await
    .expect("submission should succeed without the vote");
}

#[tokio::test]
async fn test_submit_availability_without_vote_skips_place_repo() {
    let mut ctx = TestContext::new();
    let event = sample_event();
    let event_id = event.id;

    let fetched = event.clone();
    ctx.event_repo
        .expect_get_event_by_id()
        .times(2)
        .returning(move |_| Ok(Some(fetched.clone())));

    ctx.place_repo.expect_clear_vote().times(0);
    ctx.place_repo.expect_record_vote().times(0);

    ctx.availability_repo
        .expect_upsert_availability()
        .times(1)
        .returning(move |event_id, user_id, _, _, voted_place| {
            Ok(db_entry(event_id, user_id, voted_place))
        });

    test_submit_availability_wrapper(
        &mut ctx,
        event_id,
        "user-2",
        None,
        vec![at(2025, 6, 2, 10)],
        None,
    )
    .await
    .expect("slot-only submission should succeed");
}

#[tokio::test]
async fn test_submit_availability_rejects_empty_user_id() {
    let mut ctx = TestContext::new();

    let err = test_submit_availability_wrapper(
        &mut ctx,
        Uuid::new_v4(),
        "",
        None,
        Vec::new(),
        None,
    )
    .await
    .expect_err("empty user_id should be rejected");

    assert!(matches!(err.0, EventError::Validation(_)));
}

#[tokio::test]
async fn test_submit_availability_event_not_found() {
    let mut ctx = TestContext::new();
    let event_id = Uuid::new_v4();

    ctx.event_repo
        .expect_get_event_by_id()
        .with(predicate::eq(event_id))
        .times(1)
        .returning(|_| Ok(None));

    let err = test_submit_availability_wrapper(
        &mut ctx,
        event_id,
        "user-2",
        None,
        vec![at(2025, 6, 2, 10)],
        None,
    )
    .await
    .expect_err("missing event should error");

    assert!(matches!(err.0, EventError::NotFound(_)));
}
