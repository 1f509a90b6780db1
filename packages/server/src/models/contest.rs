use std::str::FromStr;

use contracts::contests::{Contest, ContestOptions, Mode};
use serde::Deserialize;

use super::shared::{double_option, validate_name};
use crate::entity::contest;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContestRequest {
    pub name: String,
    pub description: Option<String>,
    /// Epoch milliseconds; omit for an open-ended window.
    pub start_time: Option<i64>,
    /// Epoch milliseconds; omit for an open-ended window.
    pub end_time: Option<i64>,
    /// Defaults to true.
    pub is_active: Option<bool>,
    pub options: ContestOptions,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContestRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub start_time: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub end_time: Option<Option<i64>>,
    pub is_active: Option<bool>,
    pub options: Option<ContestOptions>,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ContestIdQuery {
    /// Target contest; defaults to the currently active one.
    pub contest_id: Option<i32>,
}

pub fn validate_options(options: &ContestOptions) -> Result<(), AppError> {
    match options.mode {
        Mode::Time | Mode::Words => {
            let value: u32 = options
                .mode2
                .parse()
                .map_err(|_| AppError::Validation("mode2 must be a positive integer".into()))?;
            if value == 0 {
                return Err(AppError::Validation("mode2 must be a positive integer".into()));
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn validate_window(start: Option<i64>, end: Option<i64>) -> Result<(), AppError> {
    if let (Some(start), Some(end)) = (start, end)
        && end <= start
    {
        return Err(AppError::Validation(
            "endTime must be after startTime".into(),
        ));
    }
    if start.is_some_and(|t| t < 0) || end.is_some_and(|t| t < 0) {
        return Err(AppError::Validation(
            "startTime and endTime must be non-negative epoch milliseconds".into(),
        ));
    }
    Ok(())
}

pub fn validate_create_contest(req: &CreateContestRequest) -> Result<(), AppError> {
    validate_name(&req.name)?;
    validate_window(req.start_time, req.end_time)?;
    validate_options(&req.options)
}

pub fn validate_update_contest(req: &UpdateContestRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name)?;
    }
    // Each supplied bound is checked on its own; ordering against the
    // stored values is the handler's cross-field check.
    validate_window(req.start_time.flatten(), req.end_time.flatten())?;
    if let Some(ref options) = req.options {
        validate_options(options)?;
    }
    Ok(())
}

/// Wire view of a stored contest. Results are never embedded.
pub fn contest_response(model: contest::Model) -> Contest {
    Contest {
        id: model.id,
        name: model.name,
        description: model.description,
        start_time: model.start_time,
        end_time: model.end_time,
        is_active: model.is_active,
        options: ContestOptions {
            // The column only ever holds values written from a parsed Mode.
            mode: Mode::from_str(&model.mode).unwrap_or(Mode::Time),
            mode2: model.mode2,
            punctuation: model.punctuation,
            numbers: model.numbers,
        },
    }
}
