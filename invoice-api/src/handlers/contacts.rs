use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

use crate::dtos::MessageResponse;
use crate::models::{Contact, Record};
use crate::startup::AppState;
use crate::utils::ValidatedJson;

const NOT_FOUND: &str = "Contact not found";

fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!(NOT_FOUND))
}

/// Create a new contact
#[utoipa::path(
    post,
    path = "/api/contacts",
    request_body = Contact,
    responses(
        (status = 201, description = "Contact created", body = Contact),
        (status = 400, description = "Validation or store error", body = crate::dtos::ErrorResponse)
    ),
    tag = "Contacts"
)]
#[tracing::instrument(skip_all)]
pub async fn create_contact(
    State(state): State<AppState>,
    ValidatedJson(contact): ValidatedJson<Contact>,
) -> Result<impl IntoResponse, AppError> {
    let record = state
        .contacts
        .insert(contact)
        .await
        .map_err(super::write_error)?;

    tracing::info!(contact_id = %record.id, "Contact created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Get all contacts
#[utoipa::path(
    get,
    path = "/api/contacts",
    responses(
        (status = 200, description = "A list of contacts", body = [Contact]),
        (status = 500, description = "Server error", body = crate::dtos::ErrorResponse)
    ),
    tag = "Contacts"
)]
#[tracing::instrument(skip_all)]
pub async fn list_contacts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Record<Contact>>>, AppError> {
    let contacts = state
        .contacts
        .find_all()
        .await
        .map_err(super::store_error)?;
    Ok(Json(contacts))
}

/// Retrieve a contact by ID
#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    params(("id" = String, Path, description = "The ID of the contact to retrieve")),
    responses(
        (status = 200, description = "Contact retrieved successfully", body = Contact),
        (status = 404, description = "Contact not found", body = crate::dtos::ErrorResponse),
        (status = 500, description = "Server error", body = crate::dtos::ErrorResponse)
    ),
    tag = "Contacts"
)]
#[tracing::instrument(skip(state))]
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record<Contact>>, AppError> {
    state
        .contacts
        .find_by_id(&id)
        .await
        .map_err(super::store_error)?
        .map(Json)
        .ok_or_else(not_found)
}

/// Update a contact by ID
///
/// The body replaces the stored contact entirely.
#[utoipa::path(
    put,
    path = "/api/contacts/{id}",
    params(("id" = String, Path, description = "The ID of the contact to update")),
    request_body = Contact,
    responses(
        (status = 200, description = "Contact updated successfully", body = Contact),
        (status = 400, description = "Request or store error", body = crate::dtos::ErrorResponse),
        (status = 404, description = "Contact not found", body = crate::dtos::ErrorResponse)
    ),
    tag = "Contacts"
)]
#[tracing::instrument(skip(state, contact))]
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(contact): ValidatedJson<Contact>,
) -> Result<Json<Record<Contact>>, AppError> {
    let record = state
        .contacts
        .replace_by_id(&id, contact)
        .await
        .map_err(super::write_error)?
        .ok_or_else(not_found)?;

    tracing::info!(contact_id = %record.id, "Contact replaced");
    Ok(Json(record))
}

/// Delete a contact by ID
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    params(("id" = String, Path, description = "The ID of the contact to delete")),
    responses(
        (status = 200, description = "Contact deleted successfully", body = MessageResponse),
        (status = 404, description = "Contact not found", body = crate::dtos::ErrorResponse),
        (status = 500, description = "Server error", body = crate::dtos::ErrorResponse)
    ),
    tag = "Contacts"
)]
#[tracing::instrument(skip(state))]
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .contacts
        .delete_by_id(&id)
        .await
        .map_err(super::store_error)?
        .ok_or_else(not_found)?;

    tracing::info!(contact_id = %id, "Contact deleted");
    Ok(Json(MessageResponse::new("Contact deleted")))
}
