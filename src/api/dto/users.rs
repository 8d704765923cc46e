/*
 * Responsibility
 * - Request/response DTOs of the user routes
 * - Shape and identity checks live in api::rules, not here
 */
use serde::{Deserialize, Serialize};

/// Body of `PATCH /users/{username}/active`. `id` must equal the path username.
#[derive(Debug, Deserialize)]
pub struct PatchActiveRequest {
    pub id: String,
    pub active: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserActiveResponse {
    pub data: UserActive,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserActive {
    pub id: String,
    pub active: bool,
}
