/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use argon2::Params;

use crate::config::Config;
use crate::error::AppError;
use crate::repos::store::UserStore;
use crate::services::auth::{AuthService, PasswordVerifier, TokenService};
use crate::services::clock::Clock;

pub fn build_auth_service(
    config: &Config,
    users: Arc<dyn UserStore>,
    clock: Arc<dyn Clock>,
) -> Result<Arc<AuthService>, AppError> {
    build_auth_service_with(config, users, clock, Params::default())
}

/// Same as `build_auth_service` with explicit Argon2 cost for the dummy hash.
pub fn build_auth_service_with(
    config: &Config,
    users: Arc<dyn UserStore>,
    clock: Arc<dyn Clock>,
    password_params: Params,
) -> Result<Arc<AuthService>, AppError> {
    let tokens = TokenService::new(config.jwt_secret.as_bytes(), config.token_ttl, clock);
    let passwords = PasswordVerifier::new(password_params)
        .map_err(|e| AppError::internal(format!("failed to prepare password verifier: {e}")))?;

    Ok(Arc::new(AuthService::new(tokens, passwords, users)))
}
