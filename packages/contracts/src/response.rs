use serde::{Deserialize, Serialize};

/// Success envelope shared by every endpoint: `{ message, data }`.
///
/// Error responses use the server's `ErrorBody` instead and never carry `data`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiResponse<T> {
    /// Short human-readable description of the outcome.
    #[schema(example = "Contest retrieved")]
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}
