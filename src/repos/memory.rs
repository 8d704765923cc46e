//! In-process user store, backing the black-box tests.
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::{UserRecord, UserRole};
use crate::repos::error::RepoResult;
use crate::repos::store::UserStore;

#[derive(Clone, Debug, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = UserRecord>) -> Self {
        let store = Self::new();
        for user in users {
            store.insert(user);
        }
        store
    }

    /// Insert or replace a user by username.
    pub fn insert(&self, user: UserRecord) {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users.insert(user.username.clone(), user);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRecord>> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        Ok(users.get(username).cloned())
    }

    async fn set_active(&self, username: &str, active: bool) -> RepoResult<bool> {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        match users.get_mut(username) {
            Some(user) if matches!(user.role, UserRole::Buddy { .. }) => {
                user.role = UserRole::Buddy { active };
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
