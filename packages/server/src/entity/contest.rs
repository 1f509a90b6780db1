use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contest")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub description: Option<String>,
    /// Epoch milliseconds; NULL means no opening bound.
    pub start_time: Option<i64>,
    /// Epoch milliseconds; NULL means no closing bound.
    pub end_time: Option<i64>,
    /// Explicit enabled flag, independent of the time window.
    pub is_active: bool,

    // Fixed test options, flattened.
    pub mode: String,
    pub mode2: String,
    pub punctuation: bool,
    pub numbers: bool,

    #[sea_orm(has_many)]
    pub results: HasMany<super::contest_result::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
