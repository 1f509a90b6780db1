use contracts::contests::{Contest, ContestResult, ResultPayload};
use serde::{Deserialize, Serialize};

use crate::entity::contest_result;
use crate::error::AppError;

/// Body of `POST /contests/results`.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AddResultRequest {
    pub result: ResultPayload,
}

/// Data payload of `GET /contests/results`: the caller's own history.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResultsData {
    /// Most recent first.
    pub results: Vec<ContestResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_result: Option<ContestResult>,
    pub total_attempts: u64,
    pub contest_info: Contest,
}

pub fn validate_result_payload(payload: &ResultPayload) -> Result<(), AppError> {
    if payload.wpm < 0.0 || payload.raw_wpm < 0.0 {
        return Err(AppError::Validation("wpm must be non-negative".into()));
    }
    if let Some(cpm) = payload.cpm
        && cpm < 0.0
    {
        return Err(AppError::Validation("cpm must be non-negative".into()));
    }
    if !(50.0..=100.0).contains(&payload.acc) {
        return Err(AppError::Validation(
            "acc must be between 50 and 100".into(),
        ));
    }
    if !(0.0..=100.0).contains(&payload.consistency) {
        return Err(AppError::Validation(
            "consistency must be between 0 and 100".into(),
        ));
    }
    if payload.test_duration < 1.0 {
        return Err(AppError::Validation("testDuration must be at least 1".into()));
    }
    if payload.restart_count.is_some_and(|v| v < 0)
        || payload.incomplete_test_seconds.is_some_and(|v| v < 0.0)
        || payload.afk_duration.is_some_and(|v| v < 0.0)
    {
        return Err(AppError::Validation(
            "diagnostic fields must be non-negative".into(),
        ));
    }
    Ok(())
}

/// Wire view of a stored result. The transport id is synthesized per read
/// and is not stable; results are keyed by (contest, user, attempt).
pub fn result_response(model: contest_result::Model) -> ContestResult {
    ContestResult {
        id: uuid::Uuid::new_v4().to_string(),
        contest_id: model.contest_id,
        wpm: model.wpm,
        raw_wpm: model.raw_wpm,
        cpm: model.cpm,
        acc: model.acc,
        consistency: model.consistency,
        timestamp: model.timestamp,
        test_duration: model.test_duration,
        attempt_number: model.attempt_number,
        restart_count: model.restart_count,
        incomplete_test_seconds: model.incomplete_test_seconds,
        afk_duration: model.afk_duration,
        bailed_out: model.bailed_out,
    }
}
