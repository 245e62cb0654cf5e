use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Confirmation body for deletes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Invoice deleted")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Documented shape of every error body. Rendered by `service_core::error::AppError`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Invoice not found")]
    pub message: String,
    /// Present only for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldViolationSchema>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FieldViolationSchema {
    #[schema(example = "address.city")]
    pub field: String,
    #[schema(example = "is required")]
    pub message: String,
}
