use contracts::contests::{Contest, LeaderboardEntry};
use serde::{Deserialize, Serialize};

/// Query for `GET /contests/leaderboard`.
#[derive(Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LeaderboardQuery {
    /// Target contest; defaults to the currently active one.
    pub contest_id: Option<i32>,
    /// 0-based page index.
    pub page: Option<u64>,
    /// Items per page, clamped to [10, 200].
    pub page_size: Option<u64>,
}

/// Data payload of `GET /contests/leaderboard`.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardData {
    /// Total entry count across all pages.
    pub count: u64,
    pub page_size: u64,
    pub entries: Vec<LeaderboardEntry>,
    pub contest_info: Contest,
}
