pub mod claims;
pub mod factory;
pub mod jwt;
pub mod password;
pub mod service;

pub use claims::{AuthClaims, VerifiedIdentity};
pub use factory::{build_auth_service, build_auth_service_with};
pub use jwt::{TokenError, TokenService, TokenTier, TokenTtl};
pub use password::PasswordVerifier;
pub use service::AuthService;
