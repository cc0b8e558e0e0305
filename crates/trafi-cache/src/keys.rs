//! Cache key builders for all TrafiAuth cache entries.
//!
//! Centralising key construction prevents typos and keeps the session
//! namespace from colliding with other uses of the same KV space.

/// Prefix applied to all TrafiAuth cache keys.
const PREFIX: &str = "trafi";

/// Cache key for the currently valid refresh token of an identity.
pub fn refresh_token(identity: &str) -> String {
    format!("{PREFIX}:session:refresh:{identity}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_token_key() {
        assert_eq!(
            refresh_token("a@x.com"),
            "trafi:session:refresh:a@x.com"
        );
    }

    #[test]
    fn test_keys_distinct_per_identity() {
        assert_ne!(refresh_token("a@x.com"), refresh_token("b@x.com"));
    }
}
