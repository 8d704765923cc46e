use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::UserRecord;
use crate::error::{AppError, UnauthorizedKind};
use crate::repos::store::UserStore;
use crate::services::auth::claims::VerifiedIdentity;
use crate::services::auth::jwt::{TokenError, TokenService, TokenTier};
use crate::services::auth::password::PasswordVerifier;

/// Credential checks and token issuance/verification.
///
/// - Basic flow: `issue_token` (lookup → password → tier checks → sign)
/// - Bearer flow: `verify_bearer` (pure, no store access)
#[derive(Clone)]
pub struct AuthService {
    tokens: TokenService,
    passwords: PasswordVerifier,
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("tokens", &self.tokens)
            .field("users", &self.users.backend_name())
            .finish()
    }
}

impl AuthService {
    pub fn new(tokens: TokenService, passwords: PasswordVerifier, users: Arc<dyn UserStore>) -> Self {
        Self {
            tokens,
            passwords,
            users,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Look up `username` and check `password`.
    ///
    /// Unknown user and wrong password both yield `InvalidCredentials`.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<UserRecord, AppError> {
        let record = self.users.find_by_username(username).await?;

        let passwords = self.passwords.clone();
        let secret = password.to_string();
        let hash = record.as_ref().map(|r| r.password_hash.clone());

        // Argon2 is CPU-bound; keep it off the async workers.
        let matched = tokio::task::spawn_blocking(move || match hash {
            Some(hash) => passwords.verify(&secret, &hash),
            None => {
                passwords.burn(&secret);
                false
            }
        })
        .await
        .map_err(|e| AppError::internal(format!("password verification task failed: {e}")))?;

        match record {
            Some(record) if matched => Ok(record),
            _ => {
                warn!(username = %username, "invalid credentials");
                Err(AppError::Unauthorized(UnauthorizedKind::InvalidCredentials))
            }
        }
    }

    /// Full Basic-credential flow for one token tier.
    pub async fn issue_token(
        &self,
        username: &str,
        password: &str,
        tier: TokenTier,
    ) -> Result<String, AppError> {
        let record = self.authenticate(username, password).await?;

        let token = self.tokens.issue(&record, tier).inspect_err(|err| {
            if let AppError::Unauthorized(kind) = err {
                warn!(username = %username, reason = kind.detail(), "admin token refused");
            }
        })?;

        info!(username = %username, tier = tier.as_str(), "token issued");
        Ok(token)
    }

    /// Verify a bearer token. Callers degrade to anonymous on any error.
    pub fn verify_bearer(&self, token: &str) -> Result<VerifiedIdentity, TokenError> {
        self.tokens.verify(token).inspect_err(|err| {
            debug!(error = %err, "bearer token rejected");
        })
    }
}
