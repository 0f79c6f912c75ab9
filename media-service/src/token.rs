//! Access token generation for shareable links.

use uuid::Uuid;

/// Token length in characters. Short enough to share by hand, which
/// makes collisions unlikely but not impossible; the record store's
/// unique index catches the rest.
pub const ACCESS_TOKEN_LEN: usize = 8;

/// Mint a short URL-safe access token (lowercase hex).
pub fn generate_access_token() -> String {
    let id = Uuid::new_v4().simple().to_string();
    id[..ACCESS_TOKEN_LEN].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_shape() {
        let token = generate_access_token();
        assert_eq!(token.len(), ACCESS_TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_tokens_vary() {
        let tokens: HashSet<String> = (0..64).map(|_| generate_access_token()).collect();
        assert!(tokens.len() > 1);
    }
}
