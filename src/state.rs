/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - auth: token/credential service (secret + TTLs, immutable after startup)
 *   - users: credential store
 * - Cheap to clone (Arc inside)
 */
use std::sync::Arc;

use crate::repos::store::UserStore;
use crate::services::auth::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>, users: Arc<dyn UserStore>) -> Self {
        Self { auth, users }
    }
}
