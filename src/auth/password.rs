// Password hashing with Argon2id

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};

use crate::auth::error::AuthError;

/// Irreversible password hashing and verification
pub struct PasswordService;

impl PasswordService {
    /// Hash a password with a fresh random salt
    pub fn hash(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::PasswordHash)
    }

    /// Verify a password against a stored hash
    pub fn verify(password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_not_the_password() {
        let hash = PasswordService::hash("password123").unwrap();
        assert_ne!(hash, "password123");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn correct_password_verifies() {
        let hash = PasswordService::hash("password123").unwrap();
        assert!(PasswordService::verify("password123", &hash).unwrap());
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hash = PasswordService::hash("password123").unwrap();
        assert!(!PasswordService::verify("password124", &hash).unwrap());
    }

    #[test]
    fn salts_are_unique_per_hash() {
        let first = PasswordService::hash("password123").unwrap();
        let second = PasswordService::hash("password123").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(PasswordService::verify("password123", "not-a-phc-string").is_err());
    }
}
