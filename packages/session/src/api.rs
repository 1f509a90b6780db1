use async_trait::async_trait;
use contracts::contests::{AddResultData, Contest, ResultPayload};

use crate::error::SessionError;

/// Network port to the contest backend. Calls are asynchronous and never
/// retried; an in-flight call cannot be aborted.
#[async_trait]
pub trait ContestApi {
    /// `GET /contests/active`. `None` mirrors the server's nullable 200.
    async fn get_active_contest(&self) -> Result<Option<Contest>, SessionError>;

    /// `POST /contests/results`.
    async fn submit_result(&self, result: &ResultPayload) -> Result<AddResultData, SessionError>;
}
