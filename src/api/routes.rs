/*
 * Responsibility
 * - URL structure of the API
 * - Per-route stacking: validator (outer) → guard → handler
 */
use axum::{
    Router,
    routing::{get, patch},
};

use crate::api::handlers::{
    auth::{issue_admin_token, issue_token},
    health::health,
    users::patch_active,
};
use crate::api::rules;
use crate::middleware::auth::{Guard, guard};
use crate::middleware::validate;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/token", get(issue_token))
        .route("/auth/token/admin", get(issue_admin_token))
        .route(
            "/users/{username}/active",
            validate::apply(
                rules::users_patch_active(),
                guard::apply(Guard::OnlyAdmin, patch(patch_active)),
            ),
        )
}
