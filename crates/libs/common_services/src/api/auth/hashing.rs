use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::SysRng;

/// Hash a password using Argon2 with a fresh random salt.
/// # Errors
///
/// * `SaltString::try_from_rng` can return an error if a random salt cannot be generated.
/// * `Argon2::hash_password` can return an error if the password hashing fails.
pub fn hash_password(password: &[u8]) -> color_eyre::Result<String> {
    let argon2 = Argon2::default();
    let salt = SaltString::try_from_rng(&mut SysRng)?;
    let password_hash = argon2.hash_password(password, &salt)?.to_string();
    Ok(password_hash)
}

/// Verify a password against a given hash.
/// # Errors
///
/// * `PasswordHash::new` can return an error if the hash string is invalid.
/// * `Argon2::verify_password` can return an error if the password verification fails.
pub fn verify_password(password: &[u8], hash: &str) -> color_eyre::Result<bool> {
    let parsed_hash = PasswordHash::new(hash)?;
    let verified = Argon2::default()
        .verify_password(password, &parsed_hash)
        .is_ok();
    Ok(verified)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hash = hash_password(b"correct horse battery staple").expect("hashing failed");
        assert!(verify_password(b"correct horse battery staple", &hash).expect("verify failed"));
        assert!(!verify_password(b"wrong password", &hash).expect("verify failed"));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password(b"same input").expect("hashing failed");
        let b = hash_password(b"same input").expect("hashing failed");
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_is_an_error_not_a_panic() {
        assert!(verify_password(b"whatever", "not-a-phc-string").is_err());
    }
}
