pub mod auth;
pub mod contest;
pub mod leaderboard;
pub mod result;
pub mod shared;
