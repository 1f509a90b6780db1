use sea_orm::sea_query::LockType;
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect};

use crate::config::AppConfig;
use crate::entity::contest;
use crate::error::AppError;

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Reject the request when the contests feature flag is off.
pub fn ensure_contests_enabled(config: &AppConfig) -> Result<(), AppError> {
    if config.contests.enabled {
        Ok(())
    } else {
        Err(AppError::ContestsDisabled)
    }
}

/// Whether `now` falls inside an optional [start, end] window.
/// Both boundaries are inclusive; a missing bound is unconstrained.
pub fn within_window(start_time: Option<i64>, end_time: Option<i64>, now: i64) -> bool {
    match (start_time, end_time) {
        (Some(start), Some(end)) => start <= now && now <= end,
        (Some(start), None) => now >= start,
        (None, Some(end)) => now <= end,
        (None, None) => true,
    }
}

/// Whether a contest currently accepts submissions.
/// The explicit flag wins over the time window.
pub fn is_open(contest: &contest::Model, now: i64) -> bool {
    contest.is_active && within_window(contest.start_time, contest.end_time, now)
}

/// Find the currently active contest, if any.
///
/// Candidates are contests flagged active whose window holds at `now`. When
/// several qualify, the most recently started wins (start_time DESC, NULLs
/// last, id DESC as a final deterministic key).
pub async fn find_active_contest<C: sea_orm::ConnectionTrait>(
    db: &C,
    now: i64,
) -> Result<Option<contest::Model>, AppError> {
    let candidates = contest::Entity::find()
        .filter(contest::Column::IsActive.eq(true))
        .order_by_with_nulls(
            contest::Column::StartTime,
            Order::Desc,
            sea_orm::sea_query::NullOrdering::Last,
        )
        .order_by_desc(contest::Column::Id)
        .all(db)
        .await?;

    Ok(candidates
        .into_iter()
        .find(|c| within_window(c.start_time, c.end_time, now)))
}

/// Look up a contest by ID, returning 404 if not found.
pub async fn find_contest<C: sea_orm::ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<contest::Model, AppError> {
    contest::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Contest not found".into()))
}

/// Look up a contest by ID under a row lock, for flows that must serialize
/// against concurrent result appends.
pub async fn find_contest_for_update(
    txn: &DatabaseTransaction,
    id: i32,
) -> Result<contest::Model, AppError> {
    contest::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Contest not found".into()))
}

/// Resolve the target contest for read endpoints: explicit ID if given,
/// otherwise the currently active contest. 404 when neither resolves.
pub async fn resolve_contest<C: sea_orm::ConnectionTrait>(
    db: &C,
    contest_id: Option<i32>,
    now: i64,
) -> Result<contest::Model, AppError> {
    match contest_id {
        Some(id) => find_contest(db, id).await,
        None => find_active_contest(db, now)
            .await?
            .ok_or_else(|| AppError::NotFound("Contest not found".into())),
    }
}
