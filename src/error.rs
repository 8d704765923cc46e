/*
 * Responsibility
 * - Shared AppError taxonomy (validation, unauthorized, forbidden, not found, too large, internal)
 * - IntoResponse: one envelope `{errors: [{title, detail?}]}` for every failure
 * - RepoError / ValidationError conversions
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::validation::ValidationError;

pub const NOT_AUTHORIZED: &str = "Not Authorized";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub errors: Vec<ErrorObject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorObject {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: None,
        }
    }

    pub fn with_detail(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: Some(detail.into()),
        }
    }
}

/// Why a credential-based request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedKind {
    MissingOrInvalidHeader,
    InvalidCredentials,
    NotVerified,
    NotAdmin,
}

impl UnauthorizedKind {
    pub fn detail(&self) -> &'static str {
        match self {
            Self::MissingOrInvalidHeader => "invalid or missing Authorization header",
            Self::InvalidCredentials => "invalid credentials",
            Self::NotVerified => "email not verified",
            Self::NotAdmin => "not admin",
        }
    }
}

/// Diagnostic attached to 500 responses.
///
/// The body stays `{}`; `middleware::errors` copies this into the body in
/// development only.
#[derive(Debug, Clone)]
pub struct InternalDiagnostic(pub String);

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("unauthorized: {}", .0.detail())]
    Unauthorized(UnauthorizedKind),

    // Guard failures. Never says which condition failed.
    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("payload too large")]
    PayloadTooLarge,

    #[error("internal server error: {reason}")]
    Internal { reason: String },
}

impl AppError {
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let errors = match self {
            AppError::Validation(err) => err
                .errors()
                .into_iter()
                .map(|detail| ErrorObject::with_detail("Invalid", detail))
                .collect(),
            AppError::Unauthorized(kind) => {
                vec![ErrorObject::with_detail(NOT_AUTHORIZED, kind.detail())]
            }
            AppError::Forbidden => vec![ErrorObject::new(NOT_AUTHORIZED)],
            AppError::NotFound => vec![ErrorObject::new("Not Found")],
            AppError::PayloadTooLarge => vec![ErrorObject::new("Payload Too Large")],
            AppError::Internal { reason } => {
                tracing::error!(reason = %reason, "internal error");
                let mut response = (status, Json(serde_json::json!({}))).into_response();
                response.extensions_mut().insert(InternalDiagnostic(reason));
                return response;
            }
        };

        (status, Json(ErrorEnvelope { errors })).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = %e, "user store failure");
        AppError::internal(e.to_string())
    }
}
