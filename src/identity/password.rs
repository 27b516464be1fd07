//! Salted password hashing (Argon2id, PHC string format)

use crate::core::error::{BookshelfError, BookshelfResult};
use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> BookshelfResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| BookshelfError::Internal(format!("password hashing failed: {}", e)))
}

/// Check a password against a stored hash; malformed hashes never match
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("longpass1").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("longpass1", &hash));
        assert!(!verify_password("longpass2", &hash));
    }

    #[test]
    fn test_salts_differ() {
        let a = hash_password("longpass1").unwrap();
        let b = hash_password("longpass1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
