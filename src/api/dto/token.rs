use serde::{Deserialize, Serialize};

/// `{ "meta": { "token": "..." } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub meta: TokenMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenMeta {
    pub token: String,
}

impl TokenResponse {
    pub fn new(token: String) -> Self {
        Self {
            meta: TokenMeta { token },
        }
    }
}
