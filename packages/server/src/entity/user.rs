use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    pub role: String,

    /// Name shown on leaderboards; defaults to the username at registration.
    pub display_name: String,
    pub discord_id: Option<String>,
    pub discord_avatar: Option<String>,
    pub is_premium: bool,

    #[sea_orm(has_many)]
    pub results: HasMany<super::contest_result::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
