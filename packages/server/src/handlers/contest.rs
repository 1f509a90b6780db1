use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use contracts::contests::Contest;
use contracts::response::ApiResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{contest, contest_result};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::contest::{
    CreateContestRequest, UpdateContestRequest, contest_response, validate_create_contest,
    validate_update_contest, validate_window,
};
use crate::state::AppState;
use crate::utils::contest::{
    ensure_contests_enabled, find_active_contest, find_contest, find_contest_for_update, now_ms,
};

#[utoipa::path(
    get,
    path = "/active",
    tag = "Contests",
    operation_id = "getActiveContest",
    summary = "Get the currently active contest",
    description = "Returns the currently active contest, or null data when none is active. Never 404s for 'no active contest'.",
    responses(
        (status = 200, description = "Active contest (nullable)", body = inline(ApiResponse<Option<Contest>>)),
        (status = 503, description = "Contests disabled (CONTESTS_DISABLED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_active_contest(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Option<Contest>>>, AppError> {
    ensure_contests_enabled(&state.config)?;

    let contest = find_active_contest(&state.db, now_ms()).await?;

    Ok(Json(ApiResponse::new(
        "Contest retrieved",
        contest.map(contest_response),
    )))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Contests",
    operation_id = "createContest",
    summary = "Create a new contest",
    description = "Creates a new contest. Requires `contest:create` permission.",
    request_body = CreateContestRequest,
    responses(
        (status = 201, description = "Contest created", body = inline(ApiResponse<Contest>)),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 422, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 503, description = "Contests disabled (CONTESTS_DISABLED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(name = %payload.name))]
pub async fn create_contest(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateContestRequest>,
) -> Result<impl IntoResponse, AppError> {
    ensure_contests_enabled(&state.config)?;
    auth_user.require_permission("contest:create")?;
    validate_create_contest(&payload)?;

    let now = chrono::Utc::now();
    let new_contest = contest::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        description: Set(payload.description),
        start_time: Set(payload.start_time),
        end_time: Set(payload.end_time),
        is_active: Set(payload.is_active.unwrap_or(true)),
        mode: Set(payload.options.mode.as_str().to_string()),
        mode2: Set(payload.options.mode2),
        punctuation: Set(payload.options.punctuation),
        numbers: Set(payload.options.numbers),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_contest.insert(&state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Contest created", contest_response(model))),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Contests",
    operation_id = "getContest",
    summary = "Get a contest by ID",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Contest details", body = inline(ApiResponse<Contest>)),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Contests disabled (CONTESTS_DISABLED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_contest(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Contest>>, AppError> {
    ensure_contests_enabled(&state.config)?;

    let model = find_contest(&state.db, id).await?;
    Ok(Json(ApiResponse::new(
        "Contest retrieved",
        contest_response(model),
    )))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Contests",
    operation_id = "updateContest",
    summary = "Update an existing contest",
    description = "Partially updates a contest using PATCH semantics. Requires `contest:manage` permission. An empty payload returns the current resource unchanged. Cross-field validation keeps endTime after startTime even when updating only one of the two.",
    params(("id" = i32, Path, description = "Contest ID")),
    request_body = UpdateContestRequest,
    responses(
        (status = 200, description = "Contest updated", body = inline(ApiResponse<Contest>)),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 422, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 503, description = "Contests disabled (CONTESTS_DISABLED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_contest(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateContestRequest>,
) -> Result<Json<ApiResponse<Contest>>, AppError> {
    ensure_contests_enabled(&state.config)?;
    auth_user.require_permission("contest:manage")?;
    validate_update_contest(&payload)?;

    if payload == UpdateContestRequest::default() {
        let existing = find_contest(&state.db, id).await?;
        return Ok(Json(ApiResponse::new(
            "Contest updated",
            contest_response(existing),
        )));
    }

    let txn = state.db.begin().await?;
    let existing = find_contest_for_update(&txn, id).await?;

    // Cross-field window validation against existing values
    let effective_start = payload.start_time.unwrap_or(existing.start_time);
    let effective_end = payload.end_time.unwrap_or(existing.end_time);
    validate_window(effective_start, effective_end)?;

    let mut active: contest::ActiveModel = existing.into();

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(start_time) = payload.start_time {
        active.start_time = Set(start_time);
    }
    if let Some(end_time) = payload.end_time {
        active.end_time = Set(end_time);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(options) = payload.options {
        active.mode = Set(options.mode.as_str().to_string());
        active.mode2 = Set(options.mode2);
        active.punctuation = Set(options.punctuation);
        active.numbers = Set(options.numbers);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(ApiResponse::new(
        "Contest updated",
        contest_response(model),
    )))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Contests",
    operation_id = "deleteContest",
    summary = "Delete a contest by ID",
    description = "Permanently deletes a contest and all of its results. Requires `contest:delete` permission.",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 204, description = "Contest deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Contests disabled (CONTESTS_DISABLED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_contest(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ensure_contests_enabled(&state.config)?;
    auth_user.require_permission("contest:delete")?;

    let txn = state.db.begin().await?;
    let _contest = find_contest_for_update(&txn, id).await?;

    contest_result::Entity::delete_many()
        .filter(contest_result::Column::ContestId.eq(id))
        .exec(&txn)
        .await?;
    contest::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
