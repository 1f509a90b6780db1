mod common;

mod auth;
mod contest;
