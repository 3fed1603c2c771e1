use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, rng};

/// Raw entropy per session token. 32 bytes gives the 256 bits the token needs
/// to be unguessable.
pub const TOKEN_BYTES: usize = 32;

/// Generates an opaque session token from OS randomness. The token is the
/// whole credential; nothing is derived from it or embedded in it.
#[must_use]
pub fn generate_session_token() -> String {
    let mut raw_bytes = [0u8; TOKEN_BYTES];
    rng().fill_bytes(&mut raw_bytes);
    URL_SAFE_NO_PAD.encode(raw_bytes)
}

/// Cheap shape check so obviously malformed tokens never reach the database.
#[must_use]
pub fn is_plausible_token(token: &str) -> bool {
    match URL_SAFE_NO_PAD.decode(token) {
        Ok(bytes) => bytes.len() == TOKEN_BYTES,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_distinct() {
        assert_ne!(generate_session_token(), generate_session_token());
    }

    #[test]
    fn generated_tokens_pass_the_shape_check() {
        let token = generate_session_token();
        assert!(is_plausible_token(&token));
        // 32 bytes of base64url without padding.
        assert_eq!(token.len(), 43);
    }

    #[test]
    fn garbage_fails_the_shape_check() {
        assert!(!is_plausible_token(""));
        assert!(!is_plausible_token("short"));
        assert!(!is_plausible_token("not base64!!%%"));
        // Right alphabet, wrong length.
        assert!(!is_plausible_token(&URL_SAFE_NO_PAD.encode([0u8; 16])));
    }
}
