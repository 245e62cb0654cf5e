use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

use crate::dtos::MessageResponse;
use crate::models::{Invoice, Record};
use crate::startup::AppState;
use crate::utils::ValidatedJson;

const NOT_FOUND: &str = "Invoice not found";

fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!(NOT_FOUND))
}

/// Create a new invoice
#[utoipa::path(
    post,
    path = "/api/invoices",
    request_body = Invoice,
    responses(
        (status = 201, description = "Invoice created successfully", body = Invoice),
        (status = 400, description = "Validation or store error", body = crate::dtos::ErrorResponse)
    ),
    tag = "Invoices"
)]
#[tracing::instrument(skip_all)]
pub async fn create_invoice(
    State(state): State<AppState>,
    ValidatedJson(invoice): ValidatedJson<Invoice>,
) -> Result<impl IntoResponse, AppError> {
    let record = state
        .invoices
        .insert(invoice)
        .await
        .map_err(super::write_error)?;

    tracing::info!(invoice_id = %record.id, "Invoice created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Get all invoices
#[utoipa::path(
    get,
    path = "/api/invoices",
    responses(
        (status = 200, description = "A list of invoices", body = [Invoice]),
        (status = 500, description = "Server error", body = crate::dtos::ErrorResponse)
    ),
    tag = "Invoices"
)]
#[tracing::instrument(skip_all)]
pub async fn list_invoices(
    State(state): State<AppState>,
) -> Result<Json<Vec<Record<Invoice>>>, AppError> {
    let invoices = state
        .invoices
        .find_all()
        .await
        .map_err(super::store_error)?;
    Ok(Json(invoices))
}

/// Retrieve an invoice by ID
#[utoipa::path(
    get,
    path = "/api/invoices/{id}",
    params(("id" = String, Path, description = "The ID of the invoice to retrieve")),
    responses(
        (status = 200, description = "Invoice retrieved successfully", body = Invoice),
        (status = 404, description = "Invoice not found", body = crate::dtos::ErrorResponse),
        (status = 500, description = "Server error", body = crate::dtos::ErrorResponse)
    ),
    tag = "Invoices"
)]
#[tracing::instrument(skip(state))]
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record<Invoice>>, AppError> {
    state
        .invoices
        .find_by_id(&id)
        .await
        .map_err(super::store_error)?
        .map(Json)
        .ok_or_else(not_found)
}

/// Update an invoice by ID
///
/// The body replaces the stored invoice entirely.
#[utoipa::path(
    put,
    path = "/api/invoices/{id}",
    params(("id" = String, Path, description = "The ID of the invoice to update")),
    request_body = Invoice,
    responses(
        (status = 200, description = "Invoice updated successfully", body = Invoice),
        (status = 400, description = "Request or store error", body = crate::dtos::ErrorResponse),
        (status = 404, description = "Invoice not found", body = crate::dtos::ErrorResponse)
    ),
    tag = "Invoices"
)]
#[tracing::instrument(skip(state, invoice))]
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(invoice): ValidatedJson<Invoice>,
) -> Result<Json<Record<Invoice>>, AppError> {
    let record = state
        .invoices
        .replace_by_id(&id, invoice)
        .await
        .map_err(super::write_error)?
        .ok_or_else(not_found)?;

    tracing::info!(invoice_id = %record.id, "Invoice replaced");
    Ok(Json(record))
}

/// Delete an invoice by ID
#[utoipa::path(
    delete,
    path = "/api/invoices/{id}",
    params(("id" = String, Path, description = "The ID of the invoice to delete")),
    responses(
        (status = 200, description = "Invoice deleted successfully", body = MessageResponse),
        (status = 404, description = "Invoice not found", body = crate::dtos::ErrorResponse),
        (status = 500, description = "Server error", body = crate::dtos::ErrorResponse)
    ),
    tag = "Invoices"
)]
#[tracing::instrument(skip(state))]
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .invoices
        .delete_by_id(&id)
        .await
        .map_err(super::store_error)?
        .ok_or_else(not_found)?;

    tracing::info!(invoice_id = %id, "Invoice deleted");
    Ok(Json(MessageResponse::new("Invoice deleted")))
}
