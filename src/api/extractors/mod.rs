mod auth_ctx;
mod credentials;
mod validated;

pub use auth_ctx::AuthCtx;
pub use credentials::{BasicCredentials, bearer_token};
pub use validated::ValidatedJson;
