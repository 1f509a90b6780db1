use thiserror::Error;

/// Failures surfaced to the UI layer. None of these are retried
/// automatically.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no contest is currently active")]
    NoActiveContest,

    #[error("not currently in a contest")]
    NotInContest,

    #[error("contest API call failed: {0}")]
    Api(String),

    #[error("session storage failed: {0}")]
    Storage(String),

    #[error("failed to serialize session state: {0}")]
    Serialization(#[from] serde_json::Error),
}
