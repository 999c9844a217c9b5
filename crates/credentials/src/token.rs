//! State token generation and comparison for the authorization flow.

use rand::Rng;

/// State token length in bytes (produces 32 hex characters).
const STATE_TOKEN_BYTES: usize = 16;

/// Generates a CSPRNG state token as a 32-character lowercase hex string,
/// used to bind an authorization redirect to the request that started it.
pub fn generate_state_token() -> String {
    let mut bytes = [0u8; STATE_TOKEN_BYTES];
    rand::thread_rng().fill(&mut bytes);
    hex::encode(bytes)
}

/// Compares a received token against the expected value.
///
/// Uses constant-time comparison to prevent timing attacks.
pub fn tokens_equal(received: &str, expected: &str) -> bool {
    if received.len() != expected.len() {
        return false;
    }
    let mut diff = 0u8;
    for (a, b) in received.bytes().zip(expected.bytes()) {
        diff |= a ^ b;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_token_length() {
        let token = generate_state_token();
        assert_eq!(token.len(), 32);
    }

    #[test]
    fn generated_token_is_hex() {
        let token = generate_state_token();
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_are_unique() {
        let a = generate_state_token();
        let b = generate_state_token();
        assert_ne!(a, b);
    }

    #[test]
    fn matching_tokens_compare_equal() {
        let token = generate_state_token();
        assert!(tokens_equal(&token, &token));
    }

    #[test]
    fn mismatched_tokens_compare_unequal() {
        let a = generate_state_token();
        let b = generate_state_token();
        assert!(!tokens_equal(&a, &b));
    }

    #[test]
    fn different_lengths_compare_unequal() {
        assert!(!tokens_equal("short", "this_is_longer"));
    }
}
