pub mod contests;
pub mod response;

pub use contests::{
    AddResultData, Contest, ContestOptions, ContestResult, LeaderboardEntry, Mode, ResultPayload,
};
pub use response::ApiResponse;
