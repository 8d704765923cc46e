use serde::{Deserialize, Serialize};

use crate::domain::{UserRecord, UserRole};

/// Wire form of the role claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleClaim {
    Buddy,
    Comer,
}

/// Claims carried by a bearer token.
///
/// NOTE:
/// - Field order is the serialization order; issuance must stay byte-stable.
/// - `active` is only present for buddies, `admin` only on admin-tier tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    pub username: String,
    pub verified: bool,
    pub role: RoleClaim,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
    pub iat: i64,
    pub exp: i64,
}

impl AuthClaims {
    /// Snapshot of `record` without any admin grant.
    ///
    /// `None` when `iat + ttl_seconds` does not fit the `exp` claim.
    pub fn standard(record: &UserRecord, iat: i64, ttl_seconds: u64) -> Option<Self> {
        let exp = i64::try_from(ttl_seconds).ok().and_then(|ttl| iat.checked_add(ttl))?;
        let (role, active) = match record.role {
            UserRole::Buddy { active } => (RoleClaim::Buddy, Some(active)),
            UserRole::Comer => (RoleClaim::Comer, None),
        };

        Some(Self {
            username: record.username.clone(),
            verified: record.verified,
            role,
            active,
            admin: None,
            iat,
            exp,
        })
    }

    /// Standard snapshot plus `admin: true`. Eligibility is checked by the caller.
    pub fn admin(record: &UserRecord, iat: i64, ttl_seconds: u64) -> Option<Self> {
        Self::standard(record, iat, ttl_seconds).map(|claims| Self {
            admin: Some(true),
            ..claims
        })
    }
}

/// Identity projected from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub username: String,
    pub verified: bool,
    pub role: UserRole,
    pub admin: bool,
}

impl TryFrom<AuthClaims> for VerifiedIdentity {
    type Error = &'static str;

    fn try_from(claims: AuthClaims) -> Result<Self, Self::Error> {
        if claims.username.trim().is_empty() {
            return Err("empty 'username' claim");
        }

        let role = match (claims.role, claims.active) {
            (RoleClaim::Buddy, Some(active)) => UserRole::Buddy { active },
            (RoleClaim::Buddy, None) => return Err("buddy token without 'active' claim"),
            (RoleClaim::Comer, None) => UserRole::Comer,
            (RoleClaim::Comer, Some(_)) => return Err("comer token with 'active' claim"),
        };

        Ok(Self {
            username: claims.username,
            verified: claims.verified,
            role,
            admin: claims.admin == Some(true),
        })
    }
}
