use utoipa_axum::{router::OpenApiRouter, routes};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/contests", contest_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn contest_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::contest::get_active_contest))
        .routes(routes!(handlers::contest::create_contest))
        .routes(routes!(
            handlers::contest::get_contest,
            handlers::contest::update_contest,
            handlers::contest::delete_contest
        ))
        .routes(routes!(
            handlers::result::add_result,
            handlers::result::get_user_results
        ))
        .routes(routes!(handlers::leaderboard::get_leaderboard))
        .routes(routes!(handlers::leaderboard::get_user_rank))
}
