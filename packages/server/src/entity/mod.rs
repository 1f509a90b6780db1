pub mod contest;
pub mod contest_result;
pub mod role;
pub mod role_permission;
pub mod user;
