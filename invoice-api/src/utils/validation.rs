use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use service_core::error::AppError;
use validator::Validate;

/// JSON body extractor that runs the validation pass before the handler sees the payload.
///
/// Both unparseable bodies and rule violations are client errors (400); violations carry
/// the field-level list.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| {
                tracing::debug!(error = %e.body_text(), "Rejected request body");
                AppError::BadRequest(anyhow::anyhow!(e.body_text()))
            })?;

        value.validate().map_err(|e| {
            let err = AppError::from(e);
            tracing::debug!(error = %err, "Request body failed validation");
            err
        })?;

        Ok(ValidatedJson(value))
    }
}
