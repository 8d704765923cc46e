use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Validation};
use thiserror::Error;
use tracing::error;

use crate::domain::UserRecord;
use crate::error::{AppError, UnauthorizedKind};
use crate::services::auth::claims::{AuthClaims, VerifiedIdentity};
use crate::services::clock::Clock;

// base64url of `{"alg":"HS256","typ":"JWT"}`; issued tokens keep this exact header.
const HS256_HEADER: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";

// Errors returned by bearer-token verification.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("token expired at {exp} (now {now})")]
    Expired { exp: i64, now: i64 },

    #[error("invalid claims: {0}")]
    InvalidClaims(&'static str),
}

/// Token lifetimes (seconds). `admin` must be strictly shorter than `standard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTtl {
    pub standard: u64,
    pub admin: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenTier {
    Standard,
    Admin,
}

impl TokenTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Admin => "admin",
        }
    }
}

/// HS256 issuer and verifier sharing one process-wide secret.
///
/// - Key material is intentionally not printable via Debug.
/// - Expiry is checked against the injected `Clock`, not by `jsonwebtoken`.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: TokenTtl,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenService")
            .field("validation", &self.validation)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: TokenTtl, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
            clock,
        }
    }

    /// Issue a token of `tier` for `record`, stamped with the clock's now.
    pub fn issue(&self, record: &UserRecord, tier: TokenTier) -> Result<String, AppError> {
        let issued_at = self.clock.now();
        match tier {
            TokenTier::Standard => self.issue_standard_token_at(record, issued_at),
            TokenTier::Admin => self.issue_admin_token_at(record, issued_at),
        }
    }

    /// Standard token: no admin claim, `exp = iat + ttl.standard`.
    pub fn issue_standard_token_at(
        &self,
        record: &UserRecord,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = AuthClaims::standard(record, issued_at.timestamp(), self.ttl.standard)
            .ok_or_else(|| AppError::internal("token expiry out of range"))?;
        self.sign(&claims)
    }

    /// Admin token: `admin: true`, `exp = iat + ttl.admin`.
    ///
    /// Verification is checked before the admin flag, so an unverified
    /// non-admin gets `NotVerified`.
    pub fn issue_admin_token_at(
        &self,
        record: &UserRecord,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        if !record.verified {
            return Err(AppError::Unauthorized(UnauthorizedKind::NotVerified));
        }
        if !record.admin {
            return Err(AppError::Unauthorized(UnauthorizedKind::NotAdmin));
        }

        let claims = AuthClaims::admin(record, issued_at.timestamp(), self.ttl.admin)
            .ok_or_else(|| AppError::internal("token expiry out of range"))?;
        self.sign(&claims)
    }

    // header.payload.signature, header fixed to `HS256_HEADER`
    fn sign(&self, claims: &AuthClaims) -> Result<String, AppError> {
        let payload = serde_json::to_vec(claims).map_err(|e| {
            error!(error = %e, "failed to serialize claims");
            AppError::internal("failed to sign token")
        })?;
        let message = format!("{HS256_HEADER}.{}", URL_SAFE_NO_PAD.encode(payload));

        let signature = jsonwebtoken::crypto::sign(message.as_bytes(), &self.encoding_key, Algorithm::HS256)
            .map_err(|e| {
                error!(error = %e, "failed to sign JWT");
                AppError::internal("failed to sign token")
            })?;

        Ok(format!("{message}.{signature}"))
    }

    /// Verify signature and structure, returning the raw claims.
    pub fn decode(&self, token: &str) -> Result<AuthClaims, TokenError> {
        let data = jsonwebtoken::decode::<AuthClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    /// Verify signature, expiry and role invariants, then project the claims.
    pub fn verify(&self, token: &str) -> Result<VerifiedIdentity, TokenError> {
        let claims = self.decode(token)?;

        let now = self.clock.now().timestamp();
        if now >= claims.exp {
            return Err(TokenError::Expired {
                exp: claims.exp,
                now,
            });
        }

        VerifiedIdentity::try_from(claims).map_err(TokenError::InvalidClaims)
    }
}
