/*
 * Responsibility
 * - User record as handed over by the credential store
 * - Role model: Buddy carries its own `active` flag, Comer has none
 */
use std::fmt;
use std::str::FromStr;

/// Role of a user. `active` only exists for buddies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Buddy { active: bool },
    Comer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buddy { .. } => "buddy",
            Self::Comer => "comer",
        }
    }

    pub fn is_active_buddy(&self) -> bool {
        matches!(self, Self::Buddy { active: true })
    }

    pub fn is_comer(&self) -> bool {
        matches!(self, Self::Comer)
    }

    /// Rebuild a role from its stored/wire parts.
    ///
    /// A buddy without an explicit flag is inactive; a comer carrying an
    /// `active` value is rejected.
    pub fn from_parts(role: &str, active: Option<bool>) -> Result<Self, UnknownRole> {
        match (role.parse::<RoleKind>()?, active) {
            (RoleKind::Buddy, active) => Ok(Self::Buddy {
                active: active.unwrap_or(false),
            }),
            (RoleKind::Comer, None) => Ok(Self::Comer),
            (RoleKind::Comer, Some(_)) => Err(UnknownRole(format!("{role} with active flag"))),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoleKind {
    Buddy,
    Comer,
}

impl FromStr for RoleKind {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buddy" => Ok(Self::Buddy),
            "comer" => Ok(Self::Comer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Read-only snapshot of a stored user.
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub verified: bool,
    pub role: UserRole,
    pub admin: bool,
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the password hash
        f.debug_struct("UserRecord")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("verified", &self.verified)
            .field("role", &self.role)
            .field("admin", &self.admin)
            .finish()
    }
}
