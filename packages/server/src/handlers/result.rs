use axum::Json;
use axum::extract::{Query, State};
use contracts::contests::AddResultData;
use contracts::response::ApiResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::contest_result;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::handlers::leaderboard::ranked_view_for_contest;
use crate::models::contest::contest_response;
use crate::models::result::{
    AddResultRequest, UserResultsData, result_response, validate_result_payload,
};
use crate::models::shared::resolve_pagination;
use crate::ranking;
use crate::state::AppState;
use crate::utils::contest::{
    ensure_contests_enabled, find_active_contest, find_contest_for_update, is_open, now_ms,
    resolve_contest,
};

/// Standard conversion: 1 WPM = 5 CPM.
const WPM_TO_CPM: f64 = 5.0;

#[derive(serde::Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserResultsQuery {
    /// Target contest; defaults to the currently active one.
    pub contest_id: Option<i32>,
    /// 0-based page index.
    pub page: Option<u64>,
    /// Items per page, clamped to [10, 200].
    pub page_size: Option<u64>,
}

#[utoipa::path(
    post,
    path = "/results",
    tag = "Contests",
    operation_id = "addContestResult",
    summary = "Submit a result to the active contest",
    description = "Appends a result to the caller's attempt history for the active contest. Attempt numbers are 1-based and strictly sequential per user; `cpm` is derived as wpm * 5 when omitted. The returned rank is best-effort and omitted if its computation fails.",
    request_body = AddResultRequest,
    responses(
        (status = 200, description = "Result recorded", body = inline(ApiResponse<AddResultData>)),
        (status = 400, description = "Contest not accepting submissions (CONTEST_CLOSED)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "No active contest (NOT_FOUND)", body = ErrorBody),
        (status = 422, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 503, description = "Contests disabled (CONTESTS_DISABLED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn add_result(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<AddResultRequest>,
) -> Result<Json<ApiResponse<AddResultData>>, AppError> {
    ensure_contests_enabled(&state.config)?;
    validate_result_payload(&payload.result)?;

    let now = now_ms();
    let active = find_active_contest(&state.db, now)
        .await?
        .ok_or_else(|| AppError::NotFound("No active contest found".into()))?;

    let result = payload.result;

    let txn = state.db.begin().await?;
    // The row lock serializes concurrent appends against this contest, which
    // keeps per-user attempt numbers strictly sequential with no gaps.
    let contest = find_contest_for_update(&txn, active.id).await?;
    if !is_open(&contest, now) {
        return Err(AppError::ContestClosed);
    }

    let prior_attempts = contest_result::Entity::find()
        .filter(contest_result::Column::ContestId.eq(contest.id))
        .filter(contest_result::Column::UserId.eq(auth_user.user_id))
        .count(&txn)
        .await?;
    let attempt_number = prior_attempts as i32 + 1;

    let new_result = contest_result::ActiveModel {
        contest_id: Set(contest.id),
        user_id: Set(auth_user.user_id),
        attempt_number: Set(attempt_number),
        wpm: Set(result.wpm),
        raw_wpm: Set(result.raw_wpm),
        cpm: Set(result.cpm.unwrap_or(result.wpm * WPM_TO_CPM)),
        acc: Set(result.acc),
        consistency: Set(result.consistency),
        // Server-assigned; client timestamps are not trusted.
        timestamp: Set(now),
        test_duration: Set(result.test_duration),
        restart_count: Set(result.restart_count),
        incomplete_test_seconds: Set(result.incomplete_test_seconds),
        afk_duration: Set(result.afk_duration),
        bailed_out: Set(result.bailed_out),
    };
    new_result.insert(&txn).await?;
    txn.commit().await?;

    // Best-effort: the submission is already durable, so a rank failure is
    // logged and the field omitted rather than propagated.
    let rank = match ranked_view_for_contest(&state.db, contest.id).await {
        Ok(entries) => ranking::user_entry(&entries, auth_user.user_id).map(|e| e.rank),
        Err(e) => {
            tracing::warn!(
                contest_id = contest.id,
                user_id = auth_user.user_id,
                "Failed to calculate user rank: {e:?}"
            );
            None
        }
    };

    Ok(Json(ApiResponse::new(
        "Contest result added",
        AddResultData {
            inserted_id: uuid::Uuid::new_v4().to_string(),
            attempt_number,
            rank,
        },
    )))
}

#[utoipa::path(
    get,
    path = "/results",
    tag = "Contests",
    operation_id = "getUserContestResults",
    summary = "Get the current user's contest results",
    description = "The caller's full attempt history for a contest, most recent first, with their best result and total attempt count.",
    params(UserResultsQuery),
    responses(
        (status = 200, description = "User results", body = inline(ApiResponse<UserResultsData>)),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Contests disabled (CONTESTS_DISABLED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = auth_user.user_id))]
pub async fn get_user_results(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<UserResultsQuery>,
) -> Result<Json<ApiResponse<UserResultsData>>, AppError> {
    ensure_contests_enabled(&state.config)?;

    let (page_size, offset) = resolve_pagination(query.page, query.page_size);
    let contest = resolve_contest(&state.db, query.contest_id, now_ms()).await?;

    let mut results = contest_result::Entity::find()
        .filter(contest_result::Column::ContestId.eq(contest.id))
        .filter(contest_result::Column::UserId.eq(auth_user.user_id))
        .order_by_asc(contest_result::Column::AttemptNumber)
        .all(&state.db)
        .await?;

    let total_attempts = results.len() as u64;
    let best_result = ranking::best_attempt(&results).cloned().map(result_response);

    // History reads are most-recent-first, unlike the leaderboard's
    // ascending-timestamp tie-break.
    results.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    let page = ranking::page(&results, offset as usize, page_size as usize)
        .into_iter()
        .map(result_response)
        .collect();

    Ok(Json(ApiResponse::new(
        "User contest results retrieved",
        UserResultsData {
            results: page,
            best_result,
            total_attempts,
            contest_info: contest_response(contest),
        },
    )))
}
