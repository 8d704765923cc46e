/*
 * Responsibility
 * - GET /auth/token, GET /auth/token/admin
 * - Basic credentials come from the extractor (401 when missing/invalid)
 */
use axum::{Json, extract::State};

use crate::api::dto::token::TokenResponse;
use crate::api::extractors::BasicCredentials;
use crate::error::AppError;
use crate::services::auth::TokenTier;
use crate::state::AppState;

pub async fn issue_token(
    State(state): State<AppState>,
    creds: BasicCredentials,
) -> Result<Json<TokenResponse>, AppError> {
    issue(&state, &creds, TokenTier::Standard).await
}

pub async fn issue_admin_token(
    State(state): State<AppState>,
    creds: BasicCredentials,
) -> Result<Json<TokenResponse>, AppError> {
    issue(&state, &creds, TokenTier::Admin).await
}

async fn issue(
    state: &AppState,
    creds: &BasicCredentials,
    tier: TokenTier,
) -> Result<Json<TokenResponse>, AppError> {
    let token = state
        .auth
        .issue_token(&creds.username, &creds.password, tier)
        .await?;

    Ok(Json(TokenResponse::new(token)))
}
