//! Development-only exposure of internal error diagnostics.
//!
//! `AppError::Internal` always renders `{}` and keeps its reason in the
//! response extensions. Outside production this layer turns that reason
//! into a regular error envelope.

use axum::{
    Json, Router,
    middleware,
    response::{IntoResponse, Response},
};

use crate::config::AppEnv;
use crate::error::{ErrorEnvelope, ErrorObject, InternalDiagnostic};

pub fn apply(router: Router, app_env: AppEnv) -> Router {
    if app_env.is_production() {
        return router;
    }
    router.layer(middleware::map_response(expose_diagnostic))
}

async fn expose_diagnostic(response: Response) -> Response {
    let Some(InternalDiagnostic(reason)) = response.extensions().get::<InternalDiagnostic>().cloned()
    else {
        return response;
    };

    let body = ErrorEnvelope {
        errors: vec![ErrorObject::with_detail("Internal Server Error", reason)],
    };
    (response.status(), Json(body)).into_response()
}
