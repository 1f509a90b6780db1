use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One submitted attempt. Append-only: rows are never edited or removed by
/// the submission flow, and attempt numbers are never reused.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contest_result")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub contest_id: i32,
    #[sea_orm(primary_key)]
    pub user_id: i32,
    /// 1-based, strictly sequential per (contest, user).
    #[sea_orm(primary_key)]
    pub attempt_number: i32,

    #[sea_orm(belongs_to, from = "contest_id", to = "id")]
    pub contest: Option<super::contest::Entity>,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: Option<super::user::Entity>,

    pub wpm: f64,
    pub raw_wpm: f64,
    /// Always stored; derived as wpm * 5 when the client omits it.
    pub cpm: f64,
    pub acc: f64,
    pub consistency: f64,
    /// Server-assigned submission time, epoch milliseconds.
    pub timestamp: i64,
    pub test_duration: f64,

    // Diagnostics, kept for analysis only.
    pub restart_count: Option<i32>,
    pub incomplete_test_seconds: Option<f64>,
    pub afk_duration: Option<f64>,
    pub bailed_out: Option<bool>,
}

impl ActiveModelBehavior for ActiveModel {}
