//! Credential store interface consumed by the authentication core.
use async_trait::async_trait;

use crate::domain::UserRecord;
use crate::repos::error::RepoResult;

/// Lookup (and the one mutation the user routes need) over stored users.
///
/// Implementations own their consistency and retry policy; callers never
/// retry.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    // Returns the store name (for logging).
    fn backend_name(&self) -> &'static str;

    /// `Ok(None)` when no user has this username.
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRecord>>;

    /// Set `active` on a buddy.
    ///
    /// Returns `Ok(false)` when the user does not exist or is not a buddy.
    async fn set_active(&self, username: &str, active: bool) -> RepoResult<bool>;
}
