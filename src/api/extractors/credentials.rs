/*
 * Responsibility
 * - Parse the Authorization header into Basic credentials or a Bearer token
 * - Scheme names are case-insensitive; Basic splits at the first ':'
 */
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{AppError, UnauthorizedKind};

/// Username/password from `Authorization: Basic ...`.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl BasicCredentials {
    pub fn parse(value: &str) -> Option<Self> {
        let encoded = credentials_for(value, "basic")?;
        let decoded = STANDARD.decode(encoded).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;

        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

impl<S> FromRequestParts<S> for BasicCredentials
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authorization(&parts.headers)
            .and_then(Self::parse)
            .ok_or(AppError::Unauthorized(UnauthorizedKind::MissingOrInvalidHeader))
    }
}

/// Token from `Authorization: Bearer ...`, if that is the scheme used.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    authorization(headers).and_then(|v| credentials_for(v, "bearer"))
}

fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

// `<scheme> <credentials>` → credentials, when the scheme matches.
fn credentials_for<'a>(value: &'a str, scheme: &str) -> Option<&'a str> {
    let (given, rest) = value.trim().split_once(char::is_whitespace)?;
    let rest = rest.trim();
    (given.eq_ignore_ascii_case(scheme) && !rest.is_empty()).then_some(rest)
}
