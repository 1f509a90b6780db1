use std::collections::HashMap;

use axum::Json;
use axum::extract::{Query, State};
use contracts::contests::LeaderboardEntry;
use contracts::response::ApiResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{contest_result, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::contest::{ContestIdQuery, contest_response};
use crate::models::leaderboard::{LeaderboardData, LeaderboardQuery};
use crate::models::shared::resolve_pagination;
use crate::ranking;
use crate::state::AppState;
use crate::utils::contest::{ensure_contests_enabled, now_ms, resolve_contest};

/// Load every result for a contest and compute the full ranked view.
pub async fn ranked_view_for_contest<C: ConnectionTrait>(
    db: &C,
    contest_id: i32,
) -> Result<Vec<LeaderboardEntry>, AppError> {
    let results = contest_result::Entity::find()
        .filter(contest_result::Column::ContestId.eq(contest_id))
        .order_by_asc(contest_result::Column::UserId)
        .order_by_asc(contest_result::Column::AttemptNumber)
        .all(db)
        .await?;

    let user_ids: Vec<i32> = {
        let mut ids: Vec<i32> = results.iter().map(|r| r.user_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    };

    let profiles: HashMap<i32, user::Model> = if user_ids.is_empty() {
        HashMap::new()
    } else {
        user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect()
    };

    Ok(ranking::ranked_view(&results, &profiles))
}

#[utoipa::path(
    get,
    path = "/leaderboard",
    tag = "Contests",
    operation_id = "getContestLeaderboard",
    summary = "Get the contest leaderboard",
    description = "Ranked best-per-user view of a contest. Ranks cover the full entry set; pagination only selects the returned slice.",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Leaderboard page", body = inline(ApiResponse<LeaderboardData>)),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Contests disabled (CONTESTS_DISABLED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(contest_id = query.contest_id))]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<ApiResponse<LeaderboardData>>, AppError> {
    ensure_contests_enabled(&state.config)?;

    let (page_size, offset) = resolve_pagination(query.page, query.page_size);

    let contest = resolve_contest(&state.db, query.contest_id, now_ms()).await?;
    let entries = ranked_view_for_contest(&state.db, contest.id).await?;

    let count = entries.len() as u64;
    let entries = ranking::page(&entries, offset as usize, page_size as usize);

    Ok(Json(ApiResponse::new(
        "Contest leaderboard retrieved",
        LeaderboardData {
            count,
            page_size,
            entries,
            contest_info: contest_response(contest),
        },
    )))
}

#[utoipa::path(
    get,
    path = "/rank",
    tag = "Contests",
    operation_id = "getContestUserRank",
    summary = "Get the current user's contest rank",
    description = "Returns the caller's leaderboard entry, or null data when they have no results.",
    params(ContestIdQuery),
    responses(
        (status = 200, description = "User rank (nullable)", body = inline(ApiResponse<Option<LeaderboardEntry>>)),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Contests disabled (CONTESTS_DISABLED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = auth_user.user_id))]
pub async fn get_user_rank(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ContestIdQuery>,
) -> Result<Json<ApiResponse<Option<LeaderboardEntry>>>, AppError> {
    ensure_contests_enabled(&state.config)?;

    let contest = resolve_contest(&state.db, query.contest_id, now_ms()).await?;
    let entries = ranked_view_for_contest(&state.db, contest.id).await?;
    let entry = ranking::user_entry(&entries, auth_user.user_id).cloned();

    Ok(Json(ApiResponse::new("User contest rank retrieved", entry)))
}
