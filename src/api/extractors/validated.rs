use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::middleware::validate::ValidatedBody;
use crate::services::validation::{FieldError, ValidationError};

/// Typed body of a request that already went through `middleware::validate`.
///
/// Reads the parsed body from extensions, so the content type is not
/// re-checked here. Using it on a route without a validator is a wiring
/// bug and answers 500.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ValidatedBody(body) = parts
            .extensions
            .get::<ValidatedBody>()
            .cloned()
            .ok_or_else(|| AppError::internal("ValidatedJson used on a route without a validator"))?;

        serde_json::from_value(body).map(ValidatedJson).map_err(|e| {
            AppError::Validation(ValidationError::FieldShape {
                rule: std::any::type_name::<T>().to_string(),
                errors: vec![FieldError {
                    path: "body".to_string(),
                    message: e.to_string(),
                }],
            })
        })
    }
}
