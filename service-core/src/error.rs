use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// A single failed field rule, addressed by its JSON path (`billTo.address.city`,
/// `timesheets[0].weekNumber`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldViolation>),

    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Database error: {0}")]
    DatabaseError(anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::Validation(violations_from(&err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(anyhow::Error::new(err))
    }
}

/// Flattens nested `validator` output into a sorted list of violations keyed by
/// camelCase JSON path.
pub fn violations_from(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut out = Vec::new();
    collect(errors, "", &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldViolation>) {
    for (field, kind) in errors.errors() {
        let path = join_path(prefix, &camel_case(&field.to_string()));
        match kind {
            ValidationErrorsKind::Field(errs) => {
                for err in errs {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed `{}` check", err.code));
                    out.push(FieldViolation {
                        field: path.clone(),
                        message,
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{} {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            message: String,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            errors: Vec<FieldViolation>,
        }

        let (status, message, errors) = match self {
            AppError::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                format!("Validation failed: {}", summarize(&violations)),
                violations,
            ),
            AppError::BadRequest(err) => (StatusCode::BAD_REQUEST, err.to_string(), Vec::new()),
            AppError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string(), Vec::new()),
            AppError::InternalError(err) | AppError::DatabaseError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                err.to_string(),
                Vec::new(),
            ),
            AppError::ConfigError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Configuration error: {}", err),
                Vec::new(),
            ),
        };

        (status, Json(ErrorResponse { message, errors })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::Validate;

    #[derive(Validate)]
    struct Line {
        #[validate(length(min = 1, message = "is required"))]
        week_number: String,
    }

    #[derive(Validate)]
    struct Place {
        #[validate(length(min = 1, message = "is required"))]
        city: String,
    }

    #[derive(Validate)]
    struct Sheet {
        #[validate(length(min = 1, message = "is required"))]
        invoice_number: String,
        #[validate(nested)]
        address: Place,
        #[validate(nested)]
        lines: Vec<Line>,
    }

    #[test]
    fn flattens_nested_and_list_errors_into_camel_case_paths() {
        let sheet = Sheet {
            invoice_number: String::new(),
            address: Place {
                city: String::new(),
            },
            lines: vec![
                Line {
                    week_number: "1".to_string(),
                },
                Line {
                    week_number: String::new(),
                },
            ],
        };

        let errors = sheet.validate().unwrap_err();
        let violations = violations_from(&errors);

        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["address.city", "invoiceNumber", "lines[1].weekNumber"]
        );
        assert!(violations.iter().all(|v| v.message == "is required"));
    }

    #[test]
    fn camel_case_leaves_camel_case_untouched() {
        assert_eq!(camel_case("work_order_number"), "workOrderNumber");
        assert_eq!(camel_case("workOrderNumber"), "workOrderNumber");
        assert_eq!(camel_case("city"), "city");
    }

    #[tokio::test]
    async fn validation_error_renders_400_with_field_list() {
        let err = AppError::Validation(vec![FieldViolation {
            field: "address.city".to_string(),
            message: "is required".to_string(),
        }]);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Validation failed: address.city is required");
        assert_eq!(body["errors"][0]["field"], "address.city");
    }

    #[tokio::test]
    async fn not_found_renders_plain_message() {
        let err = AppError::NotFound(anyhow::anyhow!("Invoice not found"));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "Invoice not found" }));
    }
}
