//! Password hashing and verification using Argon2id

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

/// Failures while hashing or checking a password
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),

    #[error("Failed to verify password: {0}")]
    VerificationFailed(String),

    #[error("Invalid password hash format: {0}")]
    InvalidHashFormat(String),
}

/// Hash a password with Argon2id default parameters and a random 16 byte salt
///
/// The PHC string (`$argon2id$v=19$m=19456,t=2,p=1$...`) is what gets stored
/// as `users.password_hash`.
///
/// # Errors
/// * `HashingFailed` - Argon2 rejected the input or parameters
///
/// # Example
/// ```
/// use mudemy_auth::password::hash_password;
///
/// let hash = hash_password("P@ssw0rd123!")?;
/// assert!(hash.starts_with("$argon2id$"));
/// # Ok::<(), mudemy_auth::password::PasswordError>(())
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    Ok(password_hash.to_string())
}

/// Check `password` against a stored PHC hash
///
/// A mismatch is `Ok(false)`, not an error.
///
/// # Errors
/// * `InvalidHashFormat` - `hash` is not a PHC string
/// * `VerificationFailed` - the hash parsed but could not be checked
///
/// # Example
/// ```
/// use mudemy_auth::password::{hash_password, verify_password};
///
/// let hash = hash_password("P@ssw0rd123!")?;
/// assert!(verify_password("P@ssw0rd123!", &hash)?);
/// assert!(!verify_password("p@ssw0rd123!", &hash)?);
/// # Ok::<(), mudemy_auth::password::PasswordError>(())
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHashFormat(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_argon2id_phc_string() {
        let hash = hash_password("Student@2024").expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
        assert!(!hash.contains("Student@2024"));
    }

    #[test]
    fn test_verify_password_correct_and_incorrect() {
        let hash = hash_password("Tutor#Pass1").expect("Failed to hash password");

        assert!(verify_password("Tutor#Pass1", &hash).unwrap());
        assert!(!verify_password("tutor#pass1", &hash).unwrap());
        assert!(!verify_password("Tutor#Pass2", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let result = verify_password("AnyPassword", "plaintext-from-legacy-import");
        assert!(matches!(result, Err(PasswordError::InvalidHashFormat(_))));
    }

    #[test]
    fn test_salts_differ_between_hashes() {
        let first = hash_password("SamePassword1!").unwrap();
        let second = hash_password("SamePassword1!").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("SamePassword1!", &first).unwrap());
        assert!(verify_password("SamePassword1!", &second).unwrap());
    }

    #[test]
    fn test_unicode_password() {
        let password = "Mật_khẩu_123!";
        let hash = hash_password(password).unwrap();
        assert!(verify_password(password, &hash).unwrap());
    }
}
