//! Password hashing
//!
//! Argon2id with a per-password random salt. Plaintext passwords never reach
//! the store.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use thiserror::Error;

/// The hasher itself failed; never a property of the supplied password
#[derive(Debug, Error)]
#[error("password hashing failed")]
pub struct PasswordHashError;

/// Hashes a plaintext password with Argon2id
pub fn hash_password(plain: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|_| PasswordHashError)?;
    Ok(hash.to_string())
}

/// Verifies a plaintext password against a stored hash
///
/// Returns false for both a wrong password and an unparseable hash; the
/// caller reports a single invalid-credentials failure either way.
pub fn verify_password(plain: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}
