//! Bearer-token flow: Authorization header → AuthCtx in request extensions.
//!
//! This middleware never rejects a request. A missing header, another
//! scheme, or a token that fails verification (signature, structure,
//! expiry) all produce `AuthCtx::Anonymous`; the route guard decides.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::{AuthCtx, bearer_token};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Attach an AuthCtx to every request handled by `router`.
///
/// ```ignore
/// let router = middleware::auth::access::apply(router, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // from_fn cannot take a State extractor in axum 0.8; pass the state explicitly.
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth_ctx = resolve(&state.auth, req.headers());

    if let Some(username) = auth_ctx.username() {
        tracing::debug!(username = %username, "bearer token accepted");
    }

    // middleware → extractor
    req.extensions_mut().insert(auth_ctx);

    next.run(req).await
}

/// Derive the context from the request headers.
pub fn resolve(auth: &AuthService, headers: &HeaderMap) -> AuthCtx {
    match bearer_token(headers) {
        Some(token) => auth
            .verify_bearer(token)
            .map(AuthCtx::from)
            .unwrap_or_default(),
        None => AuthCtx::Anonymous,
    }
}
