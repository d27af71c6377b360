//! User records.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A resolved identity, as returned to authenticated callers.
///
/// Immutable once loaded from the credential store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique username, the token subject.
    pub username: String,
    /// Display name.
    pub full_name: Option<String>,
    /// Email address.
    pub email: Option<String>,
}

/// A stored credential record: an identity plus its password hash.
///
/// Owned by the credential store. The hash never leaves this type except
/// through [`StoredUser::verify_password`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    /// Unique username, the token subject.
    pub username: String,
    /// Display name.
    pub full_name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Password hash (bcrypt).
    pub password_hash: String,
}

impl StoredUser {
    /// The identity portion of this record, safe to hand outside the store.
    pub fn identity(&self) -> Identity {
        Identity {
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
        }
    }

    /// Verify a plaintext password against this user's hash.
    ///
    /// A mismatch is `false`, not an error; so is a malformed hash.
    pub fn verify_password(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.password_hash).unwrap_or(false)
    }
}

/// Hash a password for storage in the credential table.
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    bcrypt::hash(password, cost).context("hashing password")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_user(password: &str) -> StoredUser {
        StoredUser {
            username: "johndoe".to_string(),
            full_name: Some("John Doe".to_string()),
            email: Some("johndoe@example.com".to_string()),
            password_hash: hash_password(password, 4).unwrap(),
        }
    }

    #[test]
    fn test_identity_projection() {
        let user = make_user("pw");
        let identity = user.identity();
        assert_eq!(identity.username, "johndoe");
        assert_eq!(identity.email.as_deref(), Some("johndoe@example.com"));
    }

    #[test]
    fn test_verify_password() {
        let user = make_user("correcthorse");
        assert!(user.verify_password("correcthorse"));
        assert!(!user.verify_password("wronghorse"));
        assert!(!user.verify_password(""));
    }

    #[test]
    fn test_verify_password_malformed_hash() {
        let mut user = make_user("whatever");
        user.password_hash = "not-a-bcrypt-hash".to_string();
        assert!(!user.verify_password("whatever"));
    }

    #[test]
    fn test_hash_password_is_salted() {
        let a = hash_password("samepassword", 4).unwrap();
        let b = hash_password("samepassword", 4).unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("$2"));
    }
}
