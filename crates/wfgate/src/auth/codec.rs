//! Token issue and decode.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::warn;

use super::{AuthError, Claims};

/// Issues and decodes signed access tokens under a fixed HS256 key.
///
/// Decoding verifies signature and structure only. The expiry comparison
/// against current time is a separate, explicit step in the gate (see
/// [`crate::auth::AuthState::validate_token`]), so an expired but
/// well-signed token still decodes here.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    default_ttl: Duration,
}

impl TokenCodec {
    /// Create a codec from the configured signing secret and default TTL.
    pub fn new(secret: &str, default_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            default_ttl,
        }
    }

    /// Issue a token for `subject` with the default TTL.
    pub fn issue(&self, subject: &str) -> Result<String, AuthError> {
        self.issue_with_ttl(subject, self.default_ttl)
    }

    /// Issue a token for `subject` expiring `ttl` from now.
    pub fn issue_with_ttl(&self, subject: &str, ttl: Duration) -> Result<String, AuthError> {
        let claims = Claims {
            sub: subject.to_string(),
            exp: (Utc::now() + ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("encoding token: {e}")))
    }

    /// Verify signature and structure, returning the claims.
    ///
    /// Any signature mismatch or malformed token is `InvalidToken`; partial
    /// data is never returned.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry freshness is checked explicitly by the gate, not here.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                warn!("token validation failed: {e}");
                AuthError::InvalidToken(e.to_string())
            })
    }
}
