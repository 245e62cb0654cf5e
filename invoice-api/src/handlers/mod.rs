pub mod contacts;
pub mod health;
pub mod invoices;
pub mod metrics;

pub use health::health_check;
pub use metrics::metrics;

use service_core::error::AppError;

use crate::services::StoreError;

/// Read and delete failures are server errors, including malformed ids.
pub(crate) fn store_error(err: StoreError) -> AppError {
    match err {
        StoreError::Backend(e) => AppError::from(e),
        other => AppError::DatabaseError(anyhow::anyhow!(other.to_string())),
    }
}

/// Every failure on create and update is reported to the caller as a bad request.
pub(crate) fn write_error(err: StoreError) -> AppError {
    AppError::BadRequest(anyhow::anyhow!(err.to_string()))
}
