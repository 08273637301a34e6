use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned for every error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}
