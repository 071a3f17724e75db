use crate::storage::StorageError;
use actix_web::HttpResponse;
use bidflow_types::ErrorResponse;
use tracing::error;

pub mod bids;
pub mod health;
pub mod profile;
pub mod tenders;

/// Record-store failures are logged with detail and surfaced to the caller
/// as a generic retryable message.
pub(crate) fn storage_failure(action: &str, e: &StorageError) -> HttpResponse {
    error!(error = %e, action, "storage operation failed");
    HttpResponse::InternalServerError().json(ErrorResponse::new(format!(
        "Failed to {action}. Please try again."
    )))
}
