/*
 * Responsibility
 * - Per-request authentication context as seen by guards and handlers
 * - The bearer middleware builds it and stores it in request extensions
 *
 * Notes
 * - Token verification lives in services; this is only the contract type
 * - Anonymous covers both "no token" and "invalid token"
 */
use crate::domain::UserRole;
use crate::services::auth::VerifiedIdentity;

/// Context attached to every request.
///
/// - `Anonymous`: no bearer token, or one that failed verification
/// - `Logged`: snapshot of the token claims (not re-checked against the store)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthCtx {
    #[default]
    Anonymous,
    Logged(VerifiedIdentity),
}

impl AuthCtx {
    pub fn is_logged(&self) -> bool {
        matches!(self, Self::Logged(_))
    }

    pub fn identity(&self) -> Option<&VerifiedIdentity> {
        match self {
            Self::Logged(identity) => Some(identity),
            Self::Anonymous => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.identity().map(|i| i.username.as_str())
    }

    pub fn role(&self) -> Option<UserRole> {
        self.identity().map(|i| i.role)
    }

    pub fn is_admin(&self) -> bool {
        self.identity().is_some_and(|i| i.admin)
    }
}

impl From<VerifiedIdentity> for AuthCtx {
    fn from(identity: VerifiedIdentity) -> Self {
        Self::Logged(identity)
    }
}
