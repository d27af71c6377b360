//! Token claims.

use serde::{Deserialize, Serialize};

/// Claims carried by an access token.
///
/// Kept to the minimum the gate needs: the subject it resolves against the
/// credential store and the expiry it checks on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the username the token was issued for.
    pub sub: String,
    /// Expiry as unix seconds.
    pub exp: i64,
}

impl Claims {
    /// Whether the token has expired as of `now` (unix seconds).
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_expired_at() {
        let claims = Claims {
            sub: "johndoe".to_string(),
            exp: 1_000,
        };
        assert!(!claims.is_expired_at(999));
        assert!(claims.is_expired_at(1_000));
        assert!(claims.is_expired_at(1_001));
    }
}
