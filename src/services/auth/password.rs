//! Password verification against stored Argon2 PHC strings.
//!
//! Comparison of the derived hash is constant-time (`argon2` compares
//! outputs with `subtle`). A hash that does not parse is a mismatch, not
//! a fault.
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier as Argon2Verifier, Version};
use tracing::warn;

// Salt for the dummy hash only. Real hashes are produced by the account flow.
const DUMMY_SALT: &[u8] = b"buddy-auth-dummy";
const DUMMY_SECRET: &str = "dummy-password-for-timing";

#[derive(Clone)]
pub struct PasswordVerifier {
    params: Params,
    dummy_hash: String,
}

impl std::fmt::Debug for PasswordVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordVerifier")
            .field("params", &self.params)
            .finish()
    }
}

impl PasswordVerifier {
    /// `params` should match the cost of the stored hashes so that
    /// `burn` takes as long as a real verification.
    pub fn new(params: Params) -> Result<Self, argon2::password_hash::Error> {
        let dummy_hash = hash_with(&params, DUMMY_SECRET, DUMMY_SALT)?;
        Ok(Self { params, dummy_hash })
    }

    /// `true` only when `hash` is a well-formed PHC string matching `secret`.
    pub fn verify(&self, secret: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(error = %err, "stored password hash is malformed");
                return false;
            }
        };

        Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok()
    }

    /// Spend one verification on the dummy hash and discard the result.
    ///
    /// Called when the username is unknown, so the response time does not
    /// tell whether the account exists.
    pub fn burn(&self, secret: &str) {
        let _ = self.verify(secret, &self.dummy_hash);
    }

    /// Hash `secret` with this verifier's parameters.
    pub fn hash(&self, secret: &str, salt: &[u8]) -> Result<String, argon2::password_hash::Error> {
        hash_with(&self.params, secret, salt)
    }
}

fn hash_with(
    params: &Params,
    secret: &str,
    salt: &[u8],
) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::encode_b64(salt)?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone());
    Ok(argon2.hash_password(secret.as_bytes(), &salt)?.to_string())
}
