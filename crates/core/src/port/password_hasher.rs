// Password Hasher Port (Phase 1)

use crate::error::{AppError, Result};

/// Password hashing interface.
///
/// `verify` returns Ok(false) on a wrong password; Err only for malformed
/// hashes or hasher failures.
pub trait PasswordHasher: Send + Sync {
    /// Hash a raw password into a PHC string
    fn hash(&self, password: &str) -> Result<String>;

    /// Check a raw password against a stored PHC string
    fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

/// Argon2id hasher (production)
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String> {
        use argon2::password_hash::{rand_core::OsRng, SaltString};
        use argon2::PasswordHasher as _;

        let salt = SaltString::generate(&mut OsRng);
        let hash = argon2::Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        use argon2::password_hash::PasswordHash;
        use argon2::PasswordVerifier as _;

        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("stored password hash is malformed: {}", e)))?;
        match argon2::Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::Internal(format!(
                "password verification failed: {}",
                e
            ))),
        }
    }
}

pub mod mocks {
    use super::*;

    /// Reversible fake hasher so unit tests avoid Argon2's cost
    pub struct PlainTextHasher;

    impl PasswordHasher for PlainTextHasher {
        fn hash(&self, password: &str) -> Result<String> {
            Ok(format!("plain${}", password))
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool> {
            Ok(hash == format!("plain${}", password))
        }
    }
}
