/*
 * Responsibility
 * - PATCH /users/{username}/active (admin sets a buddy's active flag)
 * - Validation and the admin guard run before this handler
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::users::{PatchActiveRequest, UserActive, UserActiveResponse};
use crate::api::extractors::{AuthCtx, ValidatedJson};
use crate::error::AppError;
use crate::state::AppState;

pub async fn patch_active(
    State(state): State<AppState>,
    auth: AuthCtx,
    Path(username): Path<String>,
    ValidatedJson(req): ValidatedJson<PatchActiveRequest>,
) -> Result<Json<UserActiveResponse>, AppError> {
    if !state.users.set_active(&username, req.active).await? {
        return Err(AppError::NotFound);
    }

    tracing::info!(
        username = %username,
        active = req.active,
        by = auth.username().unwrap_or("-"),
        "buddy active flag updated"
    );

    Ok(Json(UserActiveResponse {
        data: UserActive {
            id: req.id,
            active: req.active,
        },
    }))
}
