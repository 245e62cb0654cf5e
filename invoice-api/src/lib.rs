pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Invoice API",
        description = "API documentation for the Invoice project"
    ),
    paths(
        handlers::health::health_check,
        handlers::invoices::create_invoice,
        handlers::invoices::list_invoices,
        handlers::invoices::get_invoice,
        handlers::invoices::update_invoice,
        handlers::invoices::delete_invoice,
        handlers::contacts::create_contact,
        handlers::contacts::list_contacts,
        handlers::contacts::get_contact,
        handlers::contacts::update_contact,
        handlers::contacts::delete_contact,
    ),
    components(
        schemas(
            models::Address,
            models::Party,
            models::Contact,
            models::Invoice,
            models::Timesheet,
            models::WorkHourEntry,
            dtos::MessageResponse,
            dtos::ErrorResponse,
            dtos::FieldViolationSchema,
        )
    ),
    tags(
        (name = "Invoices", description = "API for managing invoices"),
        (name = "Contacts", description = "API for managing contacts"),
        (name = "Observability", description = "Service health and monitoring"),
    )
)]
pub struct ApiDoc;
