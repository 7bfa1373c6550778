use axum::{Json, http::StatusCode};
use mockall::predicate;
use pretty_assertions::assert_eq;
use uuid::Uuid;
use whenwhere_api::middleware::error_handling::AppError;
use whenwhere_core::{
    errors::EventError,
    models::event::{CreateEventRequest, CreateEventResponse, Event, Place},
};

use crate::test_utils::{TestContext, at, sample_event};

// Test wrappers that exercise the handler logic against mock repositories

async fn test_get_event_wrapper(
    ctx: &mut TestContext,
    share_hash: &'static str,
) -> Result<Json<Event>, AppError> {
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
    Ok(Json(event))
}

async fn test_create_event_wrapper(
    ctx: &mut TestContext,
    request: CreateEventRequest,
) -> Result<Json<CreateEventResponse>, AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError(EventError::Validation(
            "Event title must not be empty".to_string(),
        )));
    }
    if request.date_options.is_empty() {
        return Err(AppError(EventError::Validation(
            "Event must have at least one candidate date".to_string(),
        )));
    }
    let mut seen = std::collections::HashSet::new();
    if let Some(duplicate) = request.places.iter().find(|p| !seen.insert(p.name.as_str())) {
        return Err(AppError(EventError::Validation(format!(
            "Duplicate place name '{}'",
            duplicate.name
        ))));
    }

    let title: &'static str = Box::leak(request.title.clone().into_boxed_str());
    let creator: &'static str = Box::leak(request.creator_id.clone().into_boxed_str());
    let event = ctx
        .event_repo
        .create_event(title, None, creator, request.date_options, request.places)
        .await?;

    Ok(Json(CreateEventResponse {
        id: event.id,
        title: event.title,
        share_hash: event.share_hash,
        created_at: event.created_at,
    }))
}

async fn test_delete_event_wrapper(
    ctx: &mut TestContext,
    id: Uuid,
) -> Result<StatusCode, AppError> {
    let deleted = ctx.event_repo.delete_event(id).await?;
    if !deleted {
        return Err(AppError(EventError::NotFound(format!(
            "Event with ID {} not found",
            id
        ))));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[tokio::test]
async fn test_get_event_by_share_hash_success() {
    let mut ctx = TestContext::new();
    let event = sample_event();
    let expected = event.clone();

    ctx.event_repo
        .expect_get_event_by_share_hash()
        .with(predicate::eq("Ab3dE6gH9jK2"))
        .times(1)
        .returning(move |_| Ok(Some(event.clone())));

    let Json(found) = test_get_event_wrapper(&mut ctx, "Ab3dE6gH9jK2")
        .await
        .expect("event should be found");

    assert_eq!(found, expected);
}

#[tokio::test]
async fn test_get_event_by_share_hash_not_found() {
    let mut ctx = TestContext::new();

    ctx.event_repo
        .expect_get_event_by_share_hash()
        .with(predicate::eq("stale-hash00"))
        .times(1)
        .returning(|_| Ok(None));

    let err = test_get_event_wrapper(&mut ctx, "stale-hash00")
        .await
        .expect_err("missing event should error");

    assert!(matches!(err.0, EventError::NotFound(_)));
}

#[tokio::test]
async fn test_create_event_returns_share_hash() {
    let mut ctx = TestContext::new();
    let created = sample_event();
    let share_hash = created.share_hash.clone();

    ctx.event_repo
        .expect_create_event()
        .times(1)
        .returning(move |_, _, _, _, _| Ok(created.clone()));

    let request = CreateEventRequest {
        title: "Team offsite".to_string(),
        description: None,
        creator_id: "creator-1".to_string(),
        date_options: vec![at(2025, 6, 2, 0)],
        places: Vec::new(),
    };

    let Json(response) = test_create_event_wrapper(&mut ctx, request)
        .await
        .expect("creation should succeed");

    assert_eq!(response.share_hash, share_hash);
    assert_eq!(response.title, "Team offsite");
}

#[tokio::test]
async fn test_create_event_rejects_empty_title() {
    let mut ctx = TestContext::new();

    let request = CreateEventRequest {
        title: "   ".to_string(),
        description: None,
        creator_id: "creator-1".to_string(),
        date_options: vec![at(2025, 6, 2, 0)],
        places: Vec::new(),
    };

    let err = test_create_event_wrapper(&mut ctx, request)
        .await
        .expect_err("blank title should be rejected");

    assert!(matches!(err.0, EventError::Validation(_)));
}

#[tokio::test]
async fn test_create_event_rejects_empty_date_options() {
    let mut ctx = TestContext::new();

    let request = CreateEventRequest {
        title: "Team offsite".to_string(),
        description: None,
        creator_id: "creator-1".to_string(),
        date_options: Vec::new(),
        places: Vec::new(),
    };

    let err = test_create_event_wrapper(&mut ctx, request)
        .await
        .expect_err("empty date options should be rejected");

    assert!(matches!(err.0, EventError::Validation(_)));
}

#[tokio::test]
async fn test_create_event_rejects_duplicate_place_names() {
    let mut ctx = TestContext::new();

    // Two candidates named "Cafe" would trip the per-event uniqueness
    // constraint mid-insert; creation must fail before touching the repo.
    ctx.event_repo.expect_create_event().times(0);

    let request = CreateEventRequest {
        title: "Team offsite".to_string(),
        description: None,
        creator_id: "creator-1".to_string(),
        date_options: vec![at(2025, 6, 2, 0)],
        places: vec![Place::new("Cafe"), Place::new("Park"), Place::new("Cafe")],
    };

    let err = test_create_event_wrapper(&mut ctx, request)
        .await
        .expect_err("duplicate place names should be rejected");

    assert!(matches!(err.0, EventError::Validation(_)));
}

#[tokio::test]
async fn test_delete_event_success() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.event_repo
        .expect_delete_event()
        .with(predicate::eq(id))
        .times(1)
        .returning(|_| Ok(true));

    let status = test_delete_event_wrapper(&mut ctx, id)
        .await
        .expect("deletion should succeed");

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_event_not_found() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.event_repo
        .expect_delete_event()
        .with(predicate::eq(id))
        .times(1)
        .returning(|_| Ok(false));

    let err = test_delete_event_wrapper(&mut ctx, id)
        .await
        .expect_err("missing event should error");

    assert!(matches!(err.0, EventError::NotFound(_)));
}
