use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::AuthCtx;

/// Extractor that hands the AuthCtx to handlers.
///
/// The bearer middleware inserts the context for every request; when it is
/// missing (route mounted outside the middleware) the request is anonymous.
impl<S> FromRequestParts<S> for AuthCtx
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<AuthCtx>().cloned().unwrap_or_default())
    }
}
